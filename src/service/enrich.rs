//! Optional per-movie extras attached after ranking

use std::collections::HashMap;

use crate::core::MovieId;
use crate::storage::EmbeddingStore;

/// Extra fields for a recommended movie
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
	pub poster_url: Option<String>,
}

/// Looks up extras for a batch of movie ids.
///
/// Ids without extras are simply absent from the returned map.
pub trait Enricher: Send + Sync {
	fn enrich(&self, ids: &[MovieId]) -> anyhow::Result<HashMap<MovieId, Enrichment>>;
}

/// Full poster URLs built from each movie's `poster_path`
pub struct PosterUrls {
	urls: HashMap<MovieId, String>,
}

impl PosterUrls {
	pub fn from_store(store: &EmbeddingStore, base_url: &str) -> Self {
		let base = base_url.trim_end_matches('/');
		let urls = store
			.movies()
			.iter()
			.filter_map(|movie| {
				let path = movie.poster_path.as_deref()?.trim();
				if path.is_empty() {
					return None;
				}
				Some((movie.id, format!("{}/{}", base, path.trim_start_matches('/'))))
			})
			.collect();

		Self { urls }
	}

	pub fn len(&self) -> usize {
		self.urls.len()
	}

	pub fn is_empty(&self) -> bool {
		self.urls.is_empty()
	}
}

impl Enricher for PosterUrls {
	fn enrich(&self, ids: &[MovieId]) -> anyhow::Result<HashMap<MovieId, Enrichment>> {
		Ok(ids
			.iter()
			.filter_map(|id| {
				let url = self.urls.get(id)?;
				Some((*id, Enrichment { poster_url: Some(url.clone()) }))
			})
			.collect())
	}
}
