//! Similar command - movies like a seed movie

use anyhow::Result;
use std::time::Instant;

use crate::core::MovieId;
use crate::service::Recommender;
use crate::ui;

pub fn run(movie_id: MovieId, limit: usize) -> Result<()> {
	let store = super::load_store()?;
	let seed = store.metadata_for(movie_id)?.title.clone();
	let recommender = Recommender::new(store);

	ui::info(&format!("Movies like: \"{}\"", seed));

	let start = Instant::now();
	let results = recommender.similar_to(movie_id, limit)?;

	if results.is_empty() {
		ui::warn("No similar movies found");
		return Ok(());
	}

	super::print_results(&results);
	ui::success(&format!(
		"Found {} matches in {:.0}ms",
		results.len(),
		start.elapsed().as_secs_f32() * 1000.0
	));

	Ok(())
}
