//! ReelMatch - embedding-based movie recommendations
//!
//! Serves item-to-item and rating-based recommendations over HTTP,
//! with command-line access to the same queries.

use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reelmatch::cli::{Cli, Command};
use reelmatch::config::{self, ServerConfig};
use reelmatch::{commands, ui};

#[tokio::main]
async fn main() -> ExitCode {
	let cli = Cli::parse();

	ui::Log::set_verbose(cli.verbose);
	init_tracing(cli.verbose);

	if let Some(path) = cli.snapshot.clone() {
		config::set_snapshot_path(path);
	}

	match run(cli.command).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			ui::error(&format!("{:#}", e));
			ExitCode::FAILURE
		}
	}
}

async fn run(command: Command) -> anyhow::Result<()> {
	match command {
		Command::Serve {
			host,
			port,
			origins,
			poster_base,
			no_posters,
		} => {
			let config = ServerConfig {
				host,
				port,
				allowed_origins: origins.into_iter().filter(|o| !o.trim().is_empty()).collect(),
				poster_base: if no_posters { None } else { Some(poster_base) },
			};
			commands::serve::run(config).await
		}
		Command::Similar { movie_id, limit } => commands::similar::run(movie_id, limit),
		Command::Rate { ratings, limit } => commands::rate::run(&ratings, limit),
		Command::Movies { filter, limit } => commands::movies::run(filter.as_deref(), limit),
		Command::Info { export } => commands::info::run(export.as_deref()),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			if let Some(sub) = subcommand {
				if let Some(sub_cmd) = cmd.find_subcommand_mut(&sub) {
					sub_cmd.print_help()?;
				} else {
					ui::error(&format!("Unknown subcommand: {}", sub));
					cmd.print_help()?;
				}
			} else {
				cmd.print_help()?;
			}
			Ok(())
		}
	}
}

fn init_tracing(verbose: bool) {
	let filter = if verbose {
		"reelmatch=debug,tower_http=debug"
	} else {
		"reelmatch=info,tower_http=info"
	};

	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(fmt::layer().with_writer(std::io::stderr))
		.init();
}
