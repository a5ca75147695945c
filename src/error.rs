//! Error taxonomy shared by the store, ranker and service

use crate::core::MovieId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The movie id is not present in the embedding store
	#[error("Movie ID {0} not found in database")]
	NotFound(MovieId),

	/// The caller supplied a request the core cannot answer
	#[error("Invalid input: {0}")]
	InvalidInput(String),

	/// The snapshot is missing, unreadable or inconsistent
	#[error("Failed to load snapshot: {0}")]
	Load(String),
}

impl Error {
	pub fn invalid(msg: impl Into<String>) -> Self {
		Self::InvalidInput(msg.into())
	}

	pub fn load(msg: impl Into<String>) -> Self {
		Self::Load(msg.into())
	}

	/// Whether the failure was caused by the request rather than the server
	pub fn is_client_error(&self) -> bool {
		matches!(self, Self::NotFound(_) | Self::InvalidInput(_))
	}
}
