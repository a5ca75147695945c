//! Request handlers and payload types

use axum::{
	extract::{rejection::JsonRejection, State},
	Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{error::ApiError, AppState};
use crate::config::{DEFAULT_K, LIVENESS_MESSAGE};
use crate::core::{MovieId, RatedMovie};
use crate::error::Error;
use crate::service::Recommendation;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
	pub movie_id: MovieId,
	#[serde(default = "default_k")]
	pub k: i64,
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
	pub rated_movies: Vec<RatedMovie>,
	#[serde(default = "default_k")]
	pub k: i64,
}

fn default_k() -> i64 {
	DEFAULT_K as i64
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieSummary {
	pub id: MovieId,
	pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
	pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
	pub recommended_movies: Vec<Recommendation>,
}

fn positive_k(k: i64) -> Result<usize, Error> {
	usize::try_from(k)
		.ok()
		.filter(|k| *k > 0)
		.ok_or_else(|| Error::invalid(format!("k must be a positive integer, got {}", k)))
}

/// GET /
pub async fn root() -> Json<Value> {
	Json(json!({ "message": LIVENESS_MESSAGE }))
}

/// GET /movies
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieSummary>> {
	let movies = state
		.recommender
		.movies()
		.iter()
		.map(|m| MovieSummary { id: m.id, title: m.title.clone() })
		.collect();
	Json(movies)
}

/// POST /recommend
///
/// Scoring runs on the blocking pool.
pub async fn recommend(
	State(state): State<AppState>,
	payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
	let Json(req) = payload?;
	let k = positive_k(req.k)?;

	let recommender = state.recommender.clone();
	let recommendations = tokio::task::spawn_blocking(move || recommender.similar_to(req.movie_id, k)).await??;
	Ok(Json(RecommendationResponse { recommendations }))
}

/// POST /recommend-by-ratings
pub async fn recommend_by_ratings(
	State(state): State<AppState>,
	payload: Result<Json<RatingRequest>, JsonRejection>,
) -> Result<Json<RatingResponse>, ApiError> {
	let Json(req) = payload?;
	let k = positive_k(req.k)?;

	let recommender = state.recommender.clone();
	let recommended_movies =
		tokio::task::spawn_blocking(move || recommender.recommend_by_ratings(&req.rated_movies, k)).await??;
	Ok(Json(RatingResponse { recommended_movies }))
}
