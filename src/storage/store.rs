//! In-memory embedding matrix with id lookups and metadata

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::collections::HashMap;
use std::path::Path;

use crate::core::{norm, Movie, MovieId};
use crate::error::{Error, Result};
use crate::storage::Snapshot;

/// Read-only item store built once from a snapshot.
///
/// Row `i` of the matrix belongs to `index_to_id[i]`, and
/// `id_to_index[index_to_id[i]] == i` for every row.
#[derive(Debug)]
pub struct EmbeddingStore {
	matrix: Array2<f32>,
	norms: Array1<f64>,
	id_to_index: HashMap<MovieId, usize>,
	index_to_id: Vec<MovieId>,
	movies: Vec<Movie>,
	movie_rows: HashMap<MovieId, usize>,
}

impl EmbeddingStore {
	/// Load and validate a snapshot file
	pub fn load(path: &Path) -> Result<Self> {
		let snapshot = Snapshot::load(path)?;
		if !snapshot.is_current_version() {
			tracing::debug!(version = %snapshot.version, "snapshot written by a different version");
		}
		Self::from_snapshot(snapshot)
	}

	pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
		let Snapshot {
			embeddings,
			movie_id_to_index,
			index_to_movie_id,
			movies,
			..
		} = snapshot;

		let rows = embeddings.len();
		if rows == 0 {
			return Err(Error::load("snapshot contains no embeddings"));
		}

		let dim = embeddings[0].len();
		if dim == 0 {
			return Err(Error::load("embeddings have zero dimension"));
		}

		let mut flat = Vec::with_capacity(rows * dim);
		for (row, vector) in embeddings.into_iter().enumerate() {
			if vector.len() != dim {
				return Err(Error::load(format!(
					"row {} has {} values, expected {}",
					row,
					vector.len(),
					dim
				)));
			}
			if vector.iter().any(|v| !v.is_finite()) {
				return Err(Error::load(format!("row {} contains a non-finite value", row)));
			}
			flat.extend(vector);
		}

		let matrix = Array2::from_shape_vec((rows, dim), flat).map_err(|e| Error::load(e.to_string()))?;

		if movie_id_to_index.len() != rows || index_to_movie_id.len() != rows {
			return Err(Error::load(format!(
				"mapping sizes ({} id→index, {} index→id) do not match {} rows",
				movie_id_to_index.len(),
				index_to_movie_id.len(),
				rows
			)));
		}

		// BTreeMap keys are unique, so len == rows with all keys < rows covers every row
		let mut index_to_id = Vec::with_capacity(rows);
		for (expected, (&row, &id)) in index_to_movie_id.iter().enumerate() {
			if row != expected {
				return Err(Error::load(format!("index→id mapping is missing row {}", expected)));
			}
			index_to_id.push(id);
		}

		let id_to_index: HashMap<MovieId, usize> = movie_id_to_index.into_iter().collect();
		for (row, id) in index_to_id.iter().enumerate() {
			if id_to_index.get(id) != Some(&row) {
				return Err(Error::load(format!(
					"mappings disagree: row {} maps to id {}, which does not map back",
					row, id
				)));
			}
		}

		let mut movie_rows = HashMap::with_capacity(movies.len());
		for (pos, movie) in movies.iter().enumerate() {
			if movie_rows.insert(movie.id, pos).is_some() {
				return Err(Error::load(format!("movie {} appears twice in the metadata table", movie.id)));
			}
		}

		if let Some(id) = index_to_id.iter().find(|id| !movie_rows.contains_key(id)) {
			return Err(Error::load(format!("movie {} has an embedding but no metadata", id)));
		}

		let norms = matrix.map_axis(Axis(1), norm);

		tracing::debug!(rows, dim, movies = movies.len(), "embedding store ready");

		Ok(Self {
			matrix,
			norms,
			id_to_index,
			index_to_id,
			movies,
			movie_rows,
		})
	}

	/// Number of embedded items
	pub fn len(&self) -> usize {
		self.index_to_id.len()
	}

	pub fn is_empty(&self) -> bool {
		self.index_to_id.is_empty()
	}

	pub fn dimension(&self) -> usize {
		self.matrix.ncols()
	}

	pub fn matrix(&self) -> ArrayView2<'_, f32> {
		self.matrix.view()
	}

	pub fn norm_at(&self, row: usize) -> f64 {
		self.norms[row]
	}

	pub fn id_at(&self, row: usize) -> MovieId {
		self.index_to_id[row]
	}

	pub fn index_of(&self, id: MovieId) -> Option<usize> {
		self.id_to_index.get(&id).copied()
	}

	/// Whether the id has an embedding
	pub fn contains(&self, id: MovieId) -> bool {
		self.id_to_index.contains_key(&id)
	}

	pub fn vector_for(&self, id: MovieId) -> Result<ArrayView1<'_, f32>> {
		self.index_of(id)
			.map(|row| self.matrix.row(row))
			.ok_or(Error::NotFound(id))
	}

	pub fn metadata_for(&self, id: MovieId) -> Result<&Movie> {
		self.movie_rows
			.get(&id)
			.map(|&pos| &self.movies[pos])
			.ok_or(Error::NotFound(id))
	}

	/// Full metadata table in snapshot order
	pub fn movies(&self) -> &[Movie] {
		&self.movies
	}
}
