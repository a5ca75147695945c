//! Unified console output for CLI commands

use chrono::Local;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
    ____            __  __  ___      __       __
   / __ \___  ___  / / /  |/  /___ _/ /______/ /_
  / /_/ / _ \/ _ \/ / / /|_/ / __ `/ __/ ___/ __ \
 / _, _/  __/  __/ / / /  / / /_/ / /_/ /__/ / / /
/_/ |_|\___/\___/_/ /_/  /_/\__,_/\__/\___/_/ /_/  "#;

const SLOGANS: &[&str] = &[
	"Cosine similarity, now showing",
	"If you liked that, you'll tolerate this",
	"Popcorn not included",
	"One dot product to rule them all",
	"Because scrolling for 40 minutes is a genre",
	"Here's looking at you, vector",
	"We'll always have embeddings",
	"Nobody puts k in a corner",
	"You're gonna need a bigger matrix",
	"Top-k or it didn't happen",
];

pub fn random_slogan() -> &'static str {
	SLOGANS[rand::random_range(0..SLOGANS.len())]
}

pub fn print_logo() {
	println!("{}", LOGO.bright_blue().bold());
	println!("{}", random_slogan().dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

fn timestamp() -> ColoredString {
	Local::now().format("%H:%M:%S").to_string().dimmed()
}

pub fn info(msg: &str) {
	println!("[{}] {} {}", timestamp(), "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("[{}] {} {}", timestamp(), "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("[{}] {} {}", timestamp(), "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("[{}] {} {}", timestamp(), "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("[{}] {} {}", timestamp(), "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!();
	println!("{}", format!("─── {} ───", text).bright_blue().bold());
}

/// Genres joined for display, dimmed
pub fn genres(genres: &[String]) -> String {
	if genres.is_empty() {
		return String::new();
	}
	genres.join(", ").dimmed().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn slogans_come_from_the_list() {
		for _ in 0..20 {
			assert!(SLOGANS.contains(&random_slogan()));
		}
	}

	#[test]
	fn verbose_flag_round_trips() {
		Log::set_verbose(true);
		assert!(Log::is_verbose());
		Log::set_verbose(false);
		assert!(!Log::is_verbose());
	}

	#[test]
	fn empty_genres_render_empty() {
		assert_eq!(genres(&[]), "");
	}
}
