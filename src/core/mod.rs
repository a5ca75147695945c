//! Core domain types

pub mod embedding;
pub mod movie;

pub use embedding::{cosine_similarity, cosine_with_norms, dot, norm};
pub use movie::{Movie, MovieId, RatedMovie};
