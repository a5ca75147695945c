// HTTP tests for the ReelMatch API

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use reelmatch::api;
use reelmatch::config::ServerConfig;
use reelmatch::core::{Movie, MovieId};
use reelmatch::service::{PosterUrls, Recommender};
use reelmatch::storage::{EmbeddingStore, Snapshot};

fn movie(id: i64, title: &str, genres: &[&str]) -> Movie {
	Movie {
		id: MovieId(id),
		title: title.to_string(),
		genres: genres.iter().map(|g| g.to_string()).collect(),
		vote_average: 7.0,
		poster_path: Some(format!("/{}.jpg", id)),
	}
}

fn store() -> Arc<EmbeddingStore> {
	let mut snapshot = Snapshot::from_items(vec![
		(movie(10, "Alien", &["Horror", "Science Fiction"]), vec![1.0, 0.0, 0.0, 0.2]),
		(movie(20, "Aliens", &["Action", "Science Fiction"]), vec![0.9, 0.1, 0.0, 0.2]),
		(movie(30, "Amelie", &["Romance", "Comedy"]), vec![0.0, 1.0, 0.1, 0.0]),
		(movie(40, "Heat", &["Crime"]), vec![0.1, 0.2, 1.0, 0.0]),
		(movie(50, "Sunshine", &["Science Fiction"]), vec![0.7, 0.0, 0.3, 0.3]),
		(movie(60, "Before Sunrise", &["Romance"]), vec![0.0, 0.9, 0.0, 0.1]),
	]);
	snapshot.movies.push(movie(70, "Unembedded", &[]));
	Arc::new(EmbeddingStore::from_snapshot(snapshot).unwrap())
}

fn app() -> Router {
	let config = ServerConfig {
		poster_base: None,
		..ServerConfig::default()
	};
	api::router(Recommender::new(store()), &config).unwrap()
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
	let request = Request::builder().method(method).uri(uri);
	let request = match body {
		Some(body) => request
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.unwrap(),
		None => request.body(Body::empty()).unwrap(),
	};

	let response = app.oneshot(request).await.unwrap();
	let status = response.status();
	let bytes = response.into_body().collect().await.unwrap().to_bytes();
	let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
	(status, value)
}

fn ids(list: &Value) -> Vec<i64> {
	list.as_array()
		.unwrap()
		.iter()
		.map(|r| r["movie_id"].as_i64().unwrap())
		.collect()
}

#[tokio::test]
async fn root_reports_liveness() {
	let (status, body) = send(app(), "GET", "/", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["message"], "ReelMatch Recommender API is live!");
}

#[tokio::test]
async fn movies_lists_the_whole_catalogue() {
	let (status, body) = send(app(), "GET", "/movies", None).await;
	assert_eq!(status, StatusCode::OK);

	let movies = body.as_array().unwrap();
	assert_eq!(movies.len(), 7);
	assert_eq!(movies[0], json!({"id": 10, "title": "Alien"}));
	assert_eq!(movies[6]["id"], 70);
}

#[tokio::test]
async fn recommend_returns_similar_movies() {
	let (status, body) = send(app(), "POST", "/recommend", Some(json!({"movie_id": 10, "k": 2}))).await;
	assert_eq!(status, StatusCode::OK);

	let recs = &body["recommendations"];
	assert_eq!(ids(recs), vec![20, 50]);
	assert_eq!(recs[0]["title"], "Aliens");
	assert_eq!(recs[0]["genres"], json!(["Action", "Science Fiction"]));
	assert_eq!(recs[0]["vote_average"], 7.0);
	assert!(recs[0].get("poster_url").is_none());
}

#[tokio::test]
async fn recommend_defaults_k_to_five() {
	let (status, body) = send(app(), "POST", "/recommend", Some(json!({"movie_id": 30}))).await;
	assert_eq!(status, StatusCode::OK);

	let recs = ids(&body["recommendations"]);
	assert_eq!(recs.len(), 5);
	assert!(!recs.contains(&30));
}

#[tokio::test]
async fn unknown_seed_is_not_found() {
	let (status, body) = send(app(), "POST", "/recommend", Some(json!({"movie_id": 999}))).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert!(body["detail"].as_str().unwrap().contains("999"));

	let (status, _) = send(app(), "POST", "/recommend", Some(json!({"movie_id": 70}))).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_positive_k_is_a_bad_request() {
	for k in [0, -3] {
		let (status, body) = send(app(), "POST", "/recommend", Some(json!({"movie_id": 10, "k": k}))).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body["detail"].is_string());
	}

	let payload = json!({"rated_movies": [{"movie_id": 10, "rating": 5}], "k": 0});
	let (status, _) = send(app(), "POST", "/recommend-by-ratings", Some(payload)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ratings_exclude_rated_movies() {
	let payload = json!({
		"rated_movies": [{"movie_id": 10, "rating": 5}, {"movie_id": 20, "rating": 1}],
		"k": 3
	});
	let (status, body) = send(app(), "POST", "/recommend-by-ratings", Some(payload)).await;
	assert_eq!(status, StatusCode::OK);

	let recs = &body["recommended_movies"];
	let got = ids(recs);
	assert!(got.len() <= 3);
	assert!(!got.contains(&10) && !got.contains(&20));
	assert_eq!(got[0], 50);

	let scores: Vec<f64> = recs.as_array().unwrap().iter().map(|r| r["score"].as_f64().unwrap()).collect();
	assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn empty_ratings_give_empty_list() {
	let (status, body) = send(app(), "POST", "/recommend-by-ratings", Some(json!({"rated_movies": []}))).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["recommended_movies"], json!([]));
}

#[tokio::test]
async fn unknown_rated_ids_are_skipped() {
	let payload = json!({"rated_movies": [{"movie_id": 30, "rating": 4}, {"movie_id": 4242, "rating": 5}], "k": 2});
	let (status, body) = send(app(), "POST", "/recommend-by-ratings", Some(payload)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(ids(&body["recommended_movies"])[0], 60);
}

#[tokio::test]
async fn malformed_payload_is_a_client_error() {
	let payload = json!({"rated_movies": [{"movie_id": "ten"}]});
	let (status, body) = send(app(), "POST", "/recommend-by-ratings", Some(payload)).await;
	assert!(status.is_client_error());
	assert!(body["detail"].is_string());
}

#[tokio::test]
async fn identical_requests_give_identical_responses() {
	let payload = json!({"rated_movies": [{"movie_id": 40, "rating": 3.5}], "k": 4});
	let first = send(app(), "POST", "/recommend-by-ratings", Some(payload.clone())).await;
	let second = send(app(), "POST", "/recommend-by-ratings", Some(payload)).await;
	assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_requests_share_one_router() {
	let app = app();
	let seed = json!({"movie_id": 10, "k": 2});
	let rated = json!({"rated_movies": [{"movie_id": 30, "rating": 4.0}], "k": 2});

	let (a, b, c) = tokio::join!(
		send(app.clone(), "POST", "/recommend", Some(seed.clone())),
		send(app.clone(), "POST", "/recommend-by-ratings", Some(rated)),
		send(app.clone(), "POST", "/recommend", Some(seed.clone())),
	);

	assert_eq!(a.0, StatusCode::OK);
	assert_eq!(b.0, StatusCode::OK);
	assert_eq!(a, c);
	assert_eq!(ids(&b.1["recommended_movies"]), vec![60, 40]);
	assert_eq!(a, send(app, "POST", "/recommend", Some(seed)).await);
}

#[tokio::test]
async fn posters_are_attached_when_enabled() {
	let store = store();
	let posters = PosterUrls::from_store(&store, "https://img.example/w500");
	let recommender = Recommender::new(store).with_enricher(Arc::new(posters));
	let app = api::router(recommender, &ServerConfig::default()).unwrap();

	let (status, body) = send(app, "POST", "/recommend", Some(json!({"movie_id": 10, "k": 1}))).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["recommendations"][0]["poster_url"], "https://img.example/w500/20.jpg");
}

#[tokio::test]
async fn cors_allows_the_configured_origin() {
	let app = api::router(Recommender::new(store()), &ServerConfig::default()).unwrap();
	let request = Request::builder()
		.method("OPTIONS")
		.uri("/recommend")
		.header(header::ORIGIN, "http://localhost:3000")
		.header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
		.body(Body::empty())
		.unwrap();

	let response = app.oneshot(request).await.unwrap();
	assert_eq!(
		response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
		"http://localhost:3000"
	);
}
