//! Movie identifiers and metadata records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// External movie identifier as it appears in the snapshot and the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl MovieId {
	pub fn get(self) -> i64 {
		self.0
	}
}

impl From<i64> for MovieId {
	fn from(id: i64) -> Self {
		Self(id)
	}
}

impl FromStr for MovieId {
	type Err = std::num::ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.trim().parse().map(Self)
	}
}

impl fmt::Display for MovieId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Metadata row from the snapshot's movie table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
	pub id: MovieId,
	pub title: String,
	#[serde(default)]
	pub genres: Vec<String>,
	#[serde(default)]
	pub vote_average: f64,
	/// Relative poster reference, e.g. `/abc123.jpg`
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub poster_path: Option<String>,
}

/// A movie the user rated, used as a weighted seed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatedMovie {
	pub movie_id: MovieId,
	pub rating: f32,
}

impl RatedMovie {
	pub fn new(movie_id: impl Into<MovieId>, rating: f32) -> Self {
		Self { movie_id: movie_id.into(), rating }
	}
}

impl FromStr for RatedMovie {
	type Err = String;

	/// Parses `ID:RATING`, e.g. `603:4.5`
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (id, rating) = s
			.split_once(':')
			.ok_or_else(|| format!("'{}' is not in ID:RATING form", s))?;
		let movie_id = id.parse().map_err(|_| format!("'{}' is not a valid movie id", id))?;
		let rating: f32 = rating.trim().parse().map_err(|_| format!("'{}' is not a valid rating", rating))?;
		Ok(Self { movie_id, rating })
	}
}
