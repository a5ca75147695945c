//! Movies command - browse the catalogue

use anyhow::Result;
use colored::*;

use crate::ui;

pub fn run(filter: Option<&str>, limit: Option<usize>) -> Result<()> {
	let store = super::load_store()?;
	let needle = filter.map(str::to_lowercase);

	let matching: Vec<_> = store
		.movies()
		.iter()
		.filter(|m| needle.as_deref().map_or(true, |n| m.title.to_lowercase().contains(n)))
		.collect();

	if matching.is_empty() {
		ui::warn("No movies match");
		return Ok(());
	}

	ui::header("Movies");

	let shown = limit.unwrap_or(matching.len()).min(matching.len());
	for movie in &matching[..shown] {
		let marker = if store.contains(movie.id) { "" } else { " (no embedding)" };
		println!(
			"  {} {}{}",
			format!("{:>8}", movie.id.get()).bright_blue(),
			movie.title.bright_white(),
			marker.dimmed()
		);
	}

	println!();
	if shown < matching.len() {
		ui::info(&format!("Showing {} of {} movies", shown, matching.len()));
	} else {
		ui::success(&format!("{} movies", matching.len()));
	}

	Ok(())
}
