//! # ReelMatch Library
//!
//! Nearest-neighbor movie recommendations from precomputed embeddings.
//! Provides the embedding store, cosine ranking, the recommendation
//! service and its HTTP API.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod ranker;
pub mod service;
pub mod storage;
pub mod ui;

pub use error::{Error, Result};
