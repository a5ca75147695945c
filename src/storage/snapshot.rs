//! Snapshot file format and I/O

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::JSON_EXT;
use crate::core::{Movie, MovieId};
use crate::error::{Error, Result};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
	MessagePack,
	Json,
}

impl Format {
	/// `.json` is JSON, everything else MessagePack
	pub fn from_path(path: &Path) -> Self {
		match path.extension().and_then(|e| e.to_str()) {
			Some(ext) if ext.eq_ignore_ascii_case(JSON_EXT) => Format::Json,
			_ => Format::MessagePack,
		}
	}
}

/// Everything the server needs, as written by the embedding pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
	#[serde(default)]
	pub version: String,
	pub embeddings: Vec<Vec<f32>>,
	pub movie_id_to_index: BTreeMap<MovieId, usize>,
	pub index_to_movie_id: BTreeMap<usize, MovieId>,
	pub movies: Vec<Movie>,
}

impl Snapshot {
	/// Build a snapshot where row order follows the iterator order
	pub fn from_items(items: impl IntoIterator<Item = (Movie, Vec<f32>)>) -> Self {
		let mut snapshot = Self {
			version: VERSION.to_string(),
			embeddings: Vec::new(),
			movie_id_to_index: BTreeMap::new(),
			index_to_movie_id: BTreeMap::new(),
			movies: Vec::new(),
		};

		for (row, (movie, vector)) in items.into_iter().enumerate() {
			snapshot.movie_id_to_index.insert(movie.id, row);
			snapshot.index_to_movie_id.insert(row, movie.id);
			snapshot.embeddings.push(vector);
			snapshot.movies.push(movie);
		}

		snapshot
	}

	pub fn dimension(&self) -> usize {
		self.embeddings.first().map(Vec::len).unwrap_or(0)
	}

	pub fn is_current_version(&self) -> bool {
		self.version == VERSION
	}

	/// Read and decode a snapshot file
	pub fn load(path: &Path) -> Result<Self> {
		let bytes = fs::read(path).map_err(|e| Error::load(format!("{}: {}", path.display(), e)))?;
		Self::decode(&bytes, Format::from_path(path))
			.map_err(|e| Error::load(format!("{}: {:#}", path.display(), e)))
	}

	pub fn decode(bytes: &[u8], format: Format) -> anyhow::Result<Self> {
		let snapshot = match format {
			Format::MessagePack => rmp_serde::from_slice(bytes).context("Failed to deserialize snapshot")?,
			Format::Json => serde_json::from_slice(bytes).context("Failed to deserialize snapshot")?,
		};
		Ok(snapshot)
	}

	/// Write the snapshot, creating parent directories as needed
	pub fn save(&self, path: &Path) -> anyhow::Result<()> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).context("Failed to create snapshot directory")?;
		}

		let bytes = match Format::from_path(path) {
			Format::MessagePack => rmp_serde::to_vec_named(self).context("Failed to serialize snapshot")?,
			Format::Json => serde_json::to_vec_pretty(self).context("Failed to serialize snapshot")?,
		};
		fs::write(path, bytes).context("Failed to write snapshot")?;

		Ok(())
	}
}
