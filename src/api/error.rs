//! HTTP translation of service errors

use axum::{
	extract::rejection::JsonRejection,
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde_json::json;

use crate::error::Error;

/// Error response with a `{"detail": ...}` body
#[derive(Debug)]
pub struct ApiError {
	pub status: StatusCode,
	pub detail: String,
}

impl ApiError {
	pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
		Self { status, detail: detail.into() }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		let status = match &err {
			Error::NotFound(_) => StatusCode::NOT_FOUND,
			Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
			Error::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
		};
		Self::new(status, err.to_string())
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::new(rejection.status(), rejection.body_text())
	}
}

impl From<tokio::task::JoinError> for ApiError {
	fn from(err: tokio::task::JoinError) -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("recommendation task failed: {}", err))
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		if self.status.is_server_error() {
			tracing::error!(status = %self.status, detail = %self.detail, "request failed");
		} else {
			tracing::debug!(status = %self.status, detail = %self.detail, "request rejected");
		}
		(self.status, Json(json!({ "detail": self.detail }))).into_response()
	}
}
