//! Info command - snapshot statistics and re-encoding

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::config;
use crate::storage::{EmbeddingStore, Format, Snapshot};
use crate::ui;

pub fn run(export: Option<&Path>) -> Result<()> {
	let path = config::snapshot_path();
	ui::info(&format!("Reading snapshot: {}", path.display()));

	let snapshot = Snapshot::load(&path)?;
	let store = EmbeddingStore::from_snapshot(snapshot.clone()).context("Snapshot failed validation")?;

	let with_posters = store.movies().iter().filter(|m| m.poster_path.is_some()).count();
	let metadata_only = store.movies().iter().filter(|m| !store.contains(m.id)).count();
	let format = match Format::from_path(&path) {
		Format::Json => "JSON",
		Format::MessagePack => "MessagePack",
	};

	ui::header("Snapshot");
	println!("  {} {}", "Format:".bright_blue(), format);
	println!(
		"  {} {}",
		"Version:".bright_blue(),
		if snapshot.version.is_empty() { "unknown" } else { snapshot.version.as_str() }
	);
	println!("  {} {}", "Embedded:".bright_blue(), store.len());
	println!("  {} {}", "Dimension:".bright_blue(), store.dimension());
	println!("  {} {}", "Catalogue:".bright_blue(), store.movies().len());
	if metadata_only > 0 {
		println!("  {} {}", "No embedding:".yellow(), metadata_only);
	}
	println!("  {} {}", "Posters:".bright_blue(), with_posters);
	println!();

	if !snapshot.is_current_version() {
		ui::warn(&format!(
			"Snapshot written by {}; re-export with --export to upgrade",
			if snapshot.version.is_empty() { "an unknown version" } else { snapshot.version.as_str() }
		));
	}

	if let Some(target) = export {
		let upgraded = Snapshot {
			version: env!("CARGO_PKG_VERSION").to_string(),
			..snapshot
		};
		upgraded.save(target)?;
		ui::success(&format!("Exported snapshot to {}", target.display()));
	} else {
		ui::success("Snapshot is valid");
	}

	Ok(())
}
