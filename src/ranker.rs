//! Cosine-similarity ranking over the embedding matrix

use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::core::{cosine_with_norms, norm, MovieId};
use crate::error::{Error, Result};
use crate::storage::EmbeddingStore;

/// Scores queries against every row of a store
#[derive(Clone, Copy)]
pub struct Ranker<'a> {
	store: &'a EmbeddingStore,
}

impl<'a> Ranker<'a> {
	pub fn new(store: &'a EmbeddingStore) -> Self {
		Self { store }
	}

	/// Cosine similarity of the query with each row, in row order
	pub fn scores(&self, query: ArrayView1<f32>) -> Result<Vec<f32>> {
		if query.len() != self.store.dimension() {
			return Err(Error::invalid(format!(
				"query has {} dimensions, embeddings have {}",
				query.len(),
				self.store.dimension()
			)));
		}

		let query_norm = norm(query);
		let matrix = self.store.matrix();

		Ok((0..self.store.len())
			.into_par_iter()
			.map(|row| cosine_with_norms(matrix.row(row), query, self.store.norm_at(row), query_norm))
			.collect())
	}

	/// Top `k` rows by similarity, skipping excluded ids.
	///
	/// Scores are non-increasing; equal scores keep ascending row order.
	/// Returns fewer than `k` results when not enough rows qualify.
	pub fn rank(&self, query: ArrayView1<f32>, exclude: &HashSet<MovieId>, k: usize) -> Result<Vec<(MovieId, f32)>> {
		let scores = self.scores(query)?;
		if k == 0 {
			return Ok(Vec::new());
		}

		let mut order: Vec<usize> = (0..scores.len()).collect();
		// Stable sort: ties stay in row order
		order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

		Ok(order
			.into_iter()
			.map(|row| (self.store.id_at(row), scores[row]))
			.filter(|(id, _)| !exclude.contains(id))
			.take(k)
			.collect())
	}
}

/// Weighted average of vectors: sum(w * v) / sum(w)
///
/// Accumulates in f64; fails if the average does not fit back into f32.
pub fn weighted_query(pairs: &[(ArrayView1<f32>, f32)]) -> Result<Array1<f32>> {
	let Some((first, _)) = pairs.first() else {
		return Err(Error::invalid("no vectors to combine"));
	};

	let dim = first.len();
	let mut sum = Array1::<f64>::zeros(dim);
	let mut total_weight = 0.0_f64;

	for (vector, weight) in pairs {
		if vector.len() != dim {
			return Err(Error::invalid(format!(
				"vector has {} dimensions, expected {}",
				vector.len(),
				dim
			)));
		}
		if !weight.is_finite() {
			return Err(Error::invalid(format!("weight {} is not finite", weight)));
		}
		let weight = f64::from(*weight);
		sum.zip_mut_with(vector, |s, &v| *s += weight * f64::from(v));
		total_weight += weight;
	}

	if total_weight == 0.0 || !total_weight.is_finite() {
		return Err(Error::invalid("sum of weights must be non-zero"));
	}

	let query = sum.mapv(|s| (s / total_weight) as f32);
	if query.iter().any(|v| !v.is_finite()) {
		return Err(Error::invalid("weighted query overflows the embedding range"));
	}

	Ok(query)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::Movie;
	use crate::storage::Snapshot;
	use ndarray::array;

	fn store(items: &[(i64, Vec<f32>)]) -> EmbeddingStore {
		let snapshot = Snapshot::from_items(items.iter().map(|(id, v)| {
			let movie = Movie {
				id: MovieId(*id),
				title: format!("Movie {}", id),
				genres: Vec::new(),
				vote_average: 0.0,
				poster_path: None,
			};
			(movie, v.clone())
		}));
		EmbeddingStore::from_snapshot(snapshot).unwrap()
	}

	fn four() -> EmbeddingStore {
		store(&[
			(10, vec![1.0, 0.0, 0.0]),
			(20, vec![0.9, 0.1, 0.0]),
			(30, vec![0.0, 1.0, 0.0]),
			(40, vec![0.5, 0.5, 0.5]),
		])
	}

	fn ids(results: &[(MovieId, f32)]) -> Vec<i64> {
		results.iter().map(|(id, _)| id.0).collect()
	}

	#[test]
	fn seed_query_returns_closest_others() {
		let store = four();
		let ranker = Ranker::new(&store);
		let seed = store.vector_for(MovieId(10)).unwrap();
		let exclude = HashSet::from([MovieId(10)]);

		let results = ranker.rank(seed, &exclude, 2).unwrap();

		assert_eq!(ids(&results), vec![20, 40]);
		assert!(results[0].1 >= results[1].1);
	}

	#[test]
	fn scores_are_non_increasing_and_capped() {
		let store = four();
		let ranker = Ranker::new(&store);
		let query = array![0.2_f32, 0.7, 0.1];

		for k in 0..6 {
			let results = ranker.rank(query.view(), &HashSet::new(), k).unwrap();
			assert!(results.len() <= k);
			assert!(results.windows(2).all(|w| w[0].1 >= w[1].1));
		}
	}

	#[test]
	fn fewer_rows_than_k_is_not_an_error() {
		let store = four();
		let ranker = Ranker::new(&store);
		let exclude = HashSet::from([MovieId(10), MovieId(20)]);

		let results = ranker.rank(array![1.0_f32, 0.0, 0.0].view(), &exclude, 10).unwrap();
		assert_eq!(results.len(), 2);
	}

	#[test]
	fn ties_break_by_ascending_row() {
		let store = store(&[
			(7, vec![0.0, 1.0]),
			(3, vec![1.0, 0.0]),
			(5, vec![2.0, 0.0]),
			(1, vec![1.0, 0.0]),
		]);
		let ranker = Ranker::new(&store);

		let results = ranker.rank(array![1.0_f32, 0.0].view(), &HashSet::new(), 4).unwrap();
		assert_eq!(ids(&results), vec![3, 5, 1, 7]);
	}

	#[test]
	fn zero_query_scores_everything_zero() {
		let store = four();
		let scores = Ranker::new(&store).scores(array![0.0_f32, 0.0, 0.0].view()).unwrap();
		assert!(scores.iter().all(|s| *s == 0.0));
	}

	#[test]
	fn dimension_mismatch_is_invalid_input() {
		let store = four();
		let err = Ranker::new(&store).rank(array![1.0_f32].view(), &HashSet::new(), 3).unwrap_err();
		assert!(matches!(err, Error::InvalidInput(_)));
	}

	#[test]
	fn ranking_is_idempotent() {
		let store = four();
		let ranker = Ranker::new(&store);
		let query = array![0.3_f32, 0.3, 0.9];
		let a = ranker.rank(query.view(), &HashSet::new(), 3).unwrap();
		let b = ranker.rank(query.view(), &HashSet::new(), 3).unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn equal_weights_give_the_arithmetic_mean() {
		let a = array![1.0_f32, 2.0, 3.0];
		let b = array![3.0_f32, 0.0, -1.0];
		let c = array![2.0_f32, 4.0, 1.0];

		let query = weighted_query(&[(a.view(), 2.5), (b.view(), 2.5), (c.view(), 2.5)]).unwrap();
		let mean = (&a + &b + &c) / 3.0;

		for (q, m) in query.iter().zip(mean.iter()) {
			assert!((q - m).abs() < 1e-6);
		}
	}

	#[test]
	fn weighted_query_leans_toward_heavier_vectors() {
		let a = array![6.0_f32, 0.0];
		let b = array![0.0_f32, 6.0];
		let query = weighted_query(&[(a.view(), 5.0), (b.view(), 1.0)]).unwrap();
		assert_eq!(query, array![5.0_f32, 1.0]);
	}

	#[test]
	fn huge_vectors_rank_by_true_cosine() {
		let store = store(&[
			(1, vec![3e38, 3e38]),
			(2, vec![3e38, 1.0]),
			(3, vec![1.0, 3e38]),
			(4, vec![1.0, 0.0]),
		]);
		let ranker = Ranker::new(&store);
		let seed = store.vector_for(MovieId(1)).unwrap();

		let results = ranker.rank(seed, &HashSet::from([MovieId(1)]), 3).unwrap();
		assert_eq!(results.len(), 3);
		for (_, score) in &results {
			assert!((score - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3);
		}
	}

	#[test]
	fn weighted_query_with_huge_weights_stays_finite() {
		let a = array![3e38_f32, 3e38];
		let b = array![3e38_f32, 1.0];
		let query = weighted_query(&[(a.view(), 3e38), (b.view(), 1.0)]).unwrap();
		assert!(query.iter().all(|v| v.is_finite() && *v > 1e38));
	}

	#[test]
	fn weighted_query_overflowing_f32_is_invalid() {
		let a = array![3e38_f32];
		let b = array![-3e38_f32];
		let err = weighted_query(&[(a.view(), 1.0), (b.view(), -0.999)]).unwrap_err();
		assert!(matches!(err, Error::InvalidInput(msg) if msg.contains("overflows")));
	}

	#[test]
	fn weighted_query_rejects_degenerate_input() {
		let a = array![1.0_f32, 0.0];
		let b = array![0.0_f32, 1.0];
		let short = array![1.0_f32];

		assert!(matches!(weighted_query(&[]), Err(Error::InvalidInput(_))));
		assert!(matches!(weighted_query(&[(a.view(), 1.0), (b.view(), -1.0)]), Err(Error::InvalidInput(_))));
		assert!(matches!(weighted_query(&[(a.view(), 1.0), (short.view(), 1.0)]), Err(Error::InvalidInput(_))));
		assert!(matches!(weighted_query(&[(a.view(), f32::NAN)]), Err(Error::InvalidInput(_))));
	}
}
