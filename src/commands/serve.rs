//! Serve command - run the HTTP API

use anyhow::Result;
use colored::*;
use std::sync::Arc;

use crate::api;
use crate::config::ServerConfig;
use crate::service::{PosterUrls, Recommender};
use crate::ui;

pub async fn run(config: ServerConfig) -> Result<()> {
	ui::print_logo();

	let store = super::load_store()?;
	let mut recommender = Recommender::new(Arc::clone(&store));

	if let Some(base) = &config.poster_base {
		let posters = PosterUrls::from_store(&store, base);
		ui::debug(&format!("{} movies have posters", posters.len()));
		if !posters.is_empty() {
			recommender = recommender.with_enricher(Arc::new(posters));
		}
	}

	if config.allowed_origins.is_empty() {
		ui::warn("CORS disabled: no allowed origins");
	} else {
		ui::debug(&format!("CORS origins: {}", config.allowed_origins.join(", ")));
	}

	let addr = config.address();
	ui::header("Server");
	println!("  {} http://{}/", "Health:".bright_blue(), addr);
	println!("  {} http://{}/movies", "Movies:".bright_blue(), addr);
	println!("  {} http://{}/recommend", "Similar:".bright_blue(), addr);
	println!("  {} http://{}/recommend-by-ratings", "Ratings:".bright_blue(), addr);
	println!();
	println!("{}", "Press Ctrl+C to stop the server.".dimmed());
	println!();

	api::serve(recommender, &config).await?;

	ui::success("Server stopped");
	Ok(())
}
