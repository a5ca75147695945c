use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{DEFAULT_HOST, DEFAULT_K, DEFAULT_ORIGIN, DEFAULT_PORT, DEFAULT_POSTER_BASE};
use crate::core::{MovieId, RatedMovie};

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.usage(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
		.valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}

fn parse_limit(s: &str) -> Result<usize, String> {
	let val: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if val == 0 {
		Err("limit must be at least 1".to_string())
	} else {
		Ok(val)
	}
}

#[derive(Parser, Debug)]
#[command(
	name = "reelmatch",
	author,
	version,
	about = "Embedding-based movie recommendations",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {serve}    {serve_args}        {serve_desc}
  {bin} {similar}  {similar_args}                {similar_desc}
  {bin} {rate}     {rate_args}  {rate_desc}
  {bin} {movies}   {movies_args}      {movies_desc}
  {bin} {help}     {help_args}                {help_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "reelmatch".bright_blue(),
		serve = "serve".yellow(),
		serve_args = "--port 8000",
		serve_desc = "Start the HTTP API".dimmed(),
		similar = "similar".yellow(),
		similar_args = "603 -n 5",
		similar_desc = "Movies like #603".dimmed(),
		rate = "rate".yellow(),
		rate_args = "603:5 13:2.5 -n 10",
		rate_desc = "Recommend from ratings".dimmed(),
		movies = "movies".yellow(),
		movies_args = "--filter matrix",
		movies_desc = "Browse the catalogue".dimmed(),
		help = "help".yellow(),
		help_args = "serve",
		help_desc = "Show help for serve".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Snapshot file (.msgpack or .json); falls back to REELMATCH_SNAPSHOT
	#[arg(short = 's', long = "snapshot", global = true, value_name = "PATH")]
	pub snapshot: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Serve recommendations over HTTP
	Serve {
		/// Address to bind
		#[arg(long = "host", default_value = DEFAULT_HOST)]
		host: String,

		/// Port to listen on
		#[arg(short = 'p', long = "port", default_value_t = DEFAULT_PORT)]
		port: u16,

		/// Allowed CORS origins (comma-separated, "*" for any)
		#[arg(long = "origin", value_delimiter = ',', default_value = DEFAULT_ORIGIN)]
		origins: Vec<String>,

		/// Base URL for poster images
		#[arg(long = "poster-base", default_value = DEFAULT_POSTER_BASE)]
		poster_base: String,

		/// Do not attach poster URLs to recommendations
		#[arg(long = "no-posters")]
		no_posters: bool,
	},

	/// Find movies similar to one movie
	Similar {
		/// Seed movie id
		#[arg(value_name = "MOVIE_ID")]
		movie_id: MovieId,

		/// Number of results
		#[arg(short = 'n', long = "limit", default_value_t = DEFAULT_K, value_parser = parse_limit)]
		limit: usize,
	},

	/// Recommend movies from a set of ratings
	Rate {
		/// Ratings as ID:RATING pairs
		#[arg(value_name = "ID:RATING", required = true, num_args = 1..)]
		ratings: Vec<RatedMovie>,

		/// Number of results
		#[arg(short = 'n', long = "limit", default_value_t = DEFAULT_K, value_parser = parse_limit)]
		limit: usize,
	},

	/// List movies in the snapshot
	Movies {
		/// Only show titles containing this text
		#[arg(short = 'f', long = "filter")]
		filter: Option<String>,

		/// Maximum number of movies to show
		#[arg(short = 'n', long = "limit")]
		limit: Option<usize>,
	},

	/// Show snapshot statistics
	Info {
		/// Re-encode the validated snapshot to this path (.json or .msgpack)
		#[arg(long = "export", value_name = "PATH")]
		export: Option<PathBuf>,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
