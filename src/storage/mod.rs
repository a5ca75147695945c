//! Snapshot loading and the in-memory embedding store

pub mod snapshot;
pub mod store;

pub use snapshot::{Format, Snapshot};
pub use store::EmbeddingStore;
