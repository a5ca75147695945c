//! # Recommendation Service
//!
//! Looks up seed vectors, ranks the catalogue, and joins results back to
//! movie metadata. Optional enrichment runs after ranking.

pub mod enrich;

pub use enrich::{Enricher, Enrichment, PosterUrls};

use ndarray::ArrayView1;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::core::{Movie, MovieId, RatedMovie};
use crate::error::{Error, Result};
use crate::ranker::{weighted_query, Ranker};
use crate::storage::EmbeddingStore;

/// One recommended movie with its similarity score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
	pub movie_id: MovieId,
	pub title: String,
	pub genres: Vec<String>,
	pub vote_average: f64,
	pub score: f32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub poster_url: Option<String>,
}

impl Recommendation {
	fn new(movie: &Movie, score: f32) -> Self {
		Self {
			movie_id: movie.id,
			title: movie.title.clone(),
			genres: movie.genres.clone(),
			vote_average: movie.vote_average,
			score,
			poster_url: None,
		}
	}
}

/// Shared, read-only recommender. Cheap to clone.
#[derive(Clone)]
pub struct Recommender {
	store: Arc<EmbeddingStore>,
	enricher: Option<Arc<dyn Enricher>>,
}

impl Recommender {
	pub fn new(store: Arc<EmbeddingStore>) -> Self {
		Self { store, enricher: None }
	}

	pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
		self.enricher = Some(enricher);
		self
	}

	pub fn store(&self) -> &EmbeddingStore {
		&self.store
	}

	/// Full metadata table
	pub fn movies(&self) -> &[Movie] {
		self.store.movies()
	}

	/// Movies most similar to `seed`, never including the seed itself
	pub fn similar_to(&self, seed: MovieId, k: usize) -> Result<Vec<Recommendation>> {
		check_k(k)?;

		let query = self.store.vector_for(seed)?;
		let exclude = HashSet::from([seed]);

		tracing::debug!(%seed, k, "ranking by seed movie");
		self.rank_and_join(query, &exclude, k)
	}

	/// Movies most similar to the rating-weighted average of `rated`.
	///
	/// Ids missing from the store are skipped. When nothing usable remains
	/// (no known ids, or their ratings sum to zero) the result is empty.
	/// Every rated id is excluded from the result.
	pub fn recommend_by_ratings(&self, rated: &[RatedMovie], k: usize) -> Result<Vec<Recommendation>> {
		check_k(k)?;

		if let Some(bad) = rated.iter().find(|r| !r.rating.is_finite()) {
			return Err(Error::invalid(format!("rating for movie {} is not a number", bad.movie_id)));
		}

		let mut pairs = Vec::with_capacity(rated.len());
		for r in rated {
			match self.store.vector_for(r.movie_id) {
				Ok(vector) => pairs.push((vector, r.rating)),
				Err(_) => tracing::debug!(movie_id = %r.movie_id, "skipping unknown rated movie"),
			}
		}

		let total: f64 = pairs.iter().map(|(_, w)| f64::from(*w)).sum();
		if pairs.is_empty() || total == 0.0 {
			tracing::debug!(known = pairs.len(), "no usable ratings, returning empty result");
			return Ok(Vec::new());
		}

		let query = weighted_query(&pairs)?;
		let exclude: HashSet<MovieId> = rated.iter().map(|r| r.movie_id).collect();

		tracing::debug!(seeds = pairs.len(), k, "ranking by weighted ratings");
		self.rank_and_join(query.view(), &exclude, k)
	}

	fn rank_and_join(&self, query: ArrayView1<f32>, exclude: &HashSet<MovieId>, k: usize) -> Result<Vec<Recommendation>> {
		let ranked = Ranker::new(&self.store).rank(query, exclude, k)?;

		let mut results = Vec::with_capacity(ranked.len());
		for (id, score) in ranked {
			results.push(Recommendation::new(self.store.metadata_for(id)?, score));
		}

		self.enrich(&mut results);
		Ok(results)
	}

	fn enrich(&self, results: &mut [Recommendation]) {
		let Some(enricher) = &self.enricher else {
			return;
		};
		if results.is_empty() {
			return;
		}

		let ids: Vec<MovieId> = results.iter().map(|r| r.movie_id).collect();
		match enricher.enrich(&ids) {
			Ok(mut extras) => {
				for result in results.iter_mut() {
					if let Some(extra) = extras.remove(&result.movie_id) {
						result.poster_url = extra.poster_url;
					}
				}
			}
			Err(e) => tracing::warn!(error = %e, "enrichment failed, returning plain results"),
		}
	}
}

fn check_k(k: usize) -> Result<()> {
	if k == 0 {
		return Err(Error::invalid("k must be a positive integer"));
	}
	Ok(())
}
