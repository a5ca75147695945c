//! Vector math for embedding similarity

use ndarray::ArrayView1;

/// Euclidean length of a vector, accumulated in f64
pub fn norm(v: ArrayView1<f32>) -> f64 {
	dot(v, v).sqrt()
}

/// Dot product accumulated in f64
pub fn dot(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f64 {
	a.iter().zip(b.iter()).map(|(&x, &y)| f64::from(x) * f64::from(y)).sum()
}

/// Cosine similarity [-1.0, 1.0]
///
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
	cosine_with_norms(a, b, norm(a), norm(b))
}

/// Cosine similarity with norms computed ahead of time
pub fn cosine_with_norms(a: ArrayView1<f32>, b: ArrayView1<f32>, norm_a: f64, norm_b: f64) -> f32 {
	let denom = norm_a * norm_b;
	if denom <= 0.0 || !denom.is_finite() {
		return 0.0;
	}

	let sim = dot(a, b) / denom;
	if sim.is_finite() {
		sim.clamp(-1.0, 1.0) as f32
	} else {
		0.0
	}
}
