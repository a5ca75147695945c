//! # Command Implementations
//!
//! Each submodule handles one CLI command.

pub mod info;
pub mod movies;
pub mod rate;
pub mod serve;
pub mod similar;

use anyhow::{Context, Result};
use colored::*;
use std::sync::Arc;
use std::time::Instant;

use crate::config;
use crate::service::Recommendation;
use crate::storage::EmbeddingStore;
use crate::ui;

/// Load the configured snapshot, reporting progress
pub fn load_store() -> Result<Arc<EmbeddingStore>> {
	let path = config::snapshot_path();
	ui::info(&format!("Loading snapshot: {}", path.display()));

	let start = Instant::now();
	let store = EmbeddingStore::load(&path).context("Cannot continue without a valid snapshot")?;

	ui::success(&format!(
		"Loaded {} movies ({} dims) in {:.2}s",
		store.len(),
		store.dimension(),
		start.elapsed().as_secs_f32()
	));

	Ok(Arc::new(store))
}

/// Print a ranked result list
pub fn print_results(results: &[Recommendation]) {
	ui::header("Results");

	for (i, r) in results.iter().enumerate() {
		let percentage = (r.score * 100.0).round() as i32;

		println!(
			"{}. {} {} {} {}",
			format!("{:2}", i + 1).bright_blue().bold(),
			r.title.bright_white(),
			format!("#{}", r.movie_id).dimmed(),
			format!("★ {:.1}", r.vote_average).yellow(),
			format!("{}%", percentage).dimmed(),
		);

		if !r.genres.is_empty() {
			println!("    {}", ui::genres(&r.genres));
		}
	}

	println!();
}
