//! Rate command - recommendations from a set of ratings

use anyhow::Result;
use std::time::Instant;

use crate::core::RatedMovie;
use crate::service::Recommender;
use crate::ui;

pub fn run(ratings: &[RatedMovie], limit: usize) -> Result<()> {
	let store = super::load_store()?;

	for rated in ratings {
		match store.metadata_for(rated.movie_id) {
			Ok(movie) if store.contains(rated.movie_id) => {
				ui::info(&format!("Rated \"{}\": {}", movie.title, rated.rating));
			}
			_ => ui::warn(&format!("Movie {} has no embedding, skipping", rated.movie_id)),
		}
	}

	let recommender = Recommender::new(store);

	let start = Instant::now();
	let results = recommender.recommend_by_ratings(ratings, limit)?;

	if results.is_empty() {
		ui::warn("No recommendations (no usable ratings)");
		return Ok(());
	}

	super::print_results(&results);
	ui::success(&format!(
		"Found {} recommendations in {:.0}ms",
		results.len(),
		start.elapsed().as_secs_f32() * 1000.0
	));

	Ok(())
}
