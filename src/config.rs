//! Application configuration and constants

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

static CUSTOM_SNAPSHOT: OnceLock<PathBuf> = OnceLock::new();

// === Snapshot ===
pub const DEFAULT_SNAPSHOT: &str = "models/movie_embeddings.msgpack";
pub const SNAPSHOT_ENV: &str = "REELMATCH_SNAPSHOT";
pub const JSON_EXT: &str = "json";

// === Recommendation Defaults ===
pub const DEFAULT_K: usize = 5;

// === Server ===
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub const LIVENESS_MESSAGE: &str = "ReelMatch Recommender API is live!";

// === Enrichment ===
pub const DEFAULT_POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

pub fn set_snapshot_path(path: PathBuf) {
	let _ = CUSTOM_SNAPSHOT.set(path);
}

/// Resolve the snapshot path (--snapshot, then REELMATCH_SNAPSHOT, then default)
pub fn snapshot_path() -> PathBuf {
	if let Some(custom) = CUSTOM_SNAPSHOT.get() {
		crate::ui::debug(&format!("Using custom snapshot: {}", custom.display()));
		return custom.clone();
	}

	if let Ok(env_path) = std::env::var(SNAPSHOT_ENV) {
		if !env_path.is_empty() {
			crate::ui::debug(&format!("Using {}: {}", SNAPSHOT_ENV, env_path));
			return PathBuf::from(env_path);
		}
	}

	PathBuf::from(DEFAULT_SNAPSHOT)
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Origins allowed by the CORS layer; empty disables CORS
	#[serde(default)]
	pub allowed_origins: Vec<String>,
	/// Base URL prepended to poster paths; `None` disables poster enrichment
	#[serde(default)]
	pub poster_base: Option<String>,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: DEFAULT_HOST.to_string(),
			port: DEFAULT_PORT,
			allowed_origins: vec![DEFAULT_ORIGIN.to_string()],
			poster_base: Some(DEFAULT_POSTER_BASE.to_string()),
		}
	}
}

impl ServerConfig {
	pub fn address(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}
