use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use crate::state::AppState;
use ingest_domain::{IngestStatus, StoredRecord};
use ingest_service::Error as ServiceError;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/logs", get(list_logs))
		.route("/api/logs/{id}", get(get_log))
		.route("/api/status", get(get_status))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_logs(State(state): State<AppState>) -> Result<Json<Vec<StoredRecord>>, ApiError> {
	let records = state.records.read_all().await?;

	Ok(Json(records))
}

async fn get_log(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<StoredRecord>, ApiError> {
	let record = state.records.read_by_id(&id).await?;

	Ok(Json(record))
}

async fn get_status(State(state): State<AppState>) -> Result<Json<IngestStatus>, ApiError> {
	let status = state.status.latest().await?;

	Ok(Json(status))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let message = err.to_string();

		match err {
			ServiceError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, "not_found", message),
			ServiceError::InvalidId { .. } => Self::new(StatusCode::NOT_FOUND, "invalid_id", message),
			ServiceError::NoStatus =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "no_status", message),
			ServiceError::Store { .. } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message),
			ServiceError::Fetch { .. } | ServiceError::TrackerWrite { .. } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		if self.status.is_server_error() {
			tracing::warn!(error_code = %self.error_code, message = %self.message, "Request failed.");
		}

		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
