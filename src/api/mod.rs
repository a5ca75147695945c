//! # HTTP API
//!
//! axum router over a shared [`Recommender`], with CORS, request tracing
//! and graceful shutdown.

pub mod error;
pub mod routes;

pub use error::ApiError;

use anyhow::{Context, Result};
use axum::{
	http::HeaderValue,
	routing::{get, post},
	Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::service::Recommender;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
	pub recommender: Arc<Recommender>,
}

/// Build the router with all routes and middleware
pub fn router(recommender: Recommender, config: &ServerConfig) -> Result<Router> {
	let state = AppState {
		recommender: Arc::new(recommender),
	};

	let mut router = Router::new()
		.route("/", get(routes::root))
		.route("/movies", get(routes::list_movies))
		.route("/recommend", post(routes::recommend))
		.route("/recommend-by-ratings", post(routes::recommend_by_ratings))
		.with_state(state)
		.layer(TraceLayer::new_for_http());

	if let Some(cors) = cors_layer(&config.allowed_origins)? {
		router = router.layer(cors);
	}

	Ok(router)
}

/// CORS for the configured origins; `None` when the list is empty
fn cors_layer(origins: &[String]) -> Result<Option<CorsLayer>> {
	if origins.is_empty() {
		return Ok(None);
	}

	if origins.iter().any(|o| o == "*") {
		return Ok(Some(CorsLayer::permissive()));
	}

	let origins = origins
		.iter()
		.map(|o| HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin: {}", o)))
		.collect::<Result<Vec<_>>>()?;

	// Credentials forbid wildcards, so methods and headers mirror the request
	Ok(Some(
		CorsLayer::new()
			.allow_origin(AllowOrigin::list(origins))
			.allow_credentials(true)
			.allow_methods(AllowMethods::mirror_request())
			.allow_headers(AllowHeaders::mirror_request()),
	))
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(recommender: Recommender, config: &ServerConfig) -> Result<()> {
	let addr: SocketAddr = config
		.address()
		.parse()
		.with_context(|| format!("Invalid address: {}", config.address()))?;

	let app = router(recommender, config)?;

	let listener = tokio::net::TcpListener::bind(addr)
		.await
		.with_context(|| format!("Failed to bind to {}", addr))?;

	tracing::info!(%addr, "listening");

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.context("Server error")?;

	tracing::info!("server stopped");
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::warn!(error = %e, "failed to listen for Ctrl+C");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			}
			Err(e) => {
				tracing::warn!(error = %e, "failed to listen for SIGTERM");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	tracing::info!("shutdown signal received");
}
