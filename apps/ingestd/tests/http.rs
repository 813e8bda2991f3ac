use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use time::macros::datetime;
use tower::util::ServiceExt;
use uuid::Uuid;

use ingest_domain::{EnrichedRecord, StoredRecord};
use ingest_service::StatusTracker;
use ingest_testkit::{MemoryRecordStore, MemoryStatusLog};
use ingestd::{routes, state::AppState};

fn stored(id: Uuid, title: &str) -> StoredRecord {
	StoredRecord {
		id,
		record: EnrichedRecord {
			source_user_id: 1,
			source_item_id: 1,
			title: title.to_string(),
			body: "Test Body".to_string(),
			ingested_at: datetime!(2024-05-01 12:00:00 UTC),
			source: "test_source".to_string(),
		},
	}
}

fn app(store: Arc<MemoryRecordStore>, tracker: Arc<MemoryStatusLog>) -> Router {
	routes::router(AppState::new(store, tracker))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call route.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Failed to parse response.")
	};

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let (status, _) =
		get(app(Arc::new(MemoryRecordStore::new()), Arc::new(MemoryStatusLog::new())), "/health")
			.await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn lists_all_records() {
	let id = Uuid::new_v4();
	let store = Arc::new(MemoryRecordStore::with_records(vec![stored(id, "Test Title")]));
	let (status, json) = get(app(store, Arc::new(MemoryStatusLog::new())), "/api/logs").await;

	assert_eq!(status, StatusCode::OK);

	let items = json.as_array().expect("Expected an array.");

	assert_eq!(items.len(), 1);
	assert_eq!(items[0]["_id"], id.to_string());
	assert_eq!(items[0]["title"], "Test Title");
	assert_eq!(items[0]["postId"], 1);
	assert_eq!(items[0]["ingested_at"], "2024-05-01T12:00:00Z");
}

#[tokio::test]
async fn empty_store_lists_empty_array() {
	let (status, json) =
		get(app(Arc::new(MemoryRecordStore::new()), Arc::new(MemoryStatusLog::new())), "/api/logs")
			.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, Value::Array(Vec::new()));
}

#[tokio::test]
async fn list_store_error_is_500() {
	let store = Arc::new(MemoryRecordStore::new());

	store.set_fail_reads(true);

	let (status, json) = get(app(store, Arc::new(MemoryStatusLog::new())), "/api/logs").await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json["error_code"], "store_error");
}

#[tokio::test]
async fn fetches_record_by_id() {
	let id = Uuid::new_v4();
	let store = Arc::new(MemoryRecordStore::with_records(vec![
		stored(Uuid::new_v4(), "Other"),
		stored(id, "Wanted"),
	]));
	let (status, json) =
		get(app(store, Arc::new(MemoryStatusLog::new())), &format!("/api/logs/{id}")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["_id"], id.to_string());
	assert_eq!(json["title"], "Wanted");
}

#[tokio::test]
async fn unknown_id_is_404() {
	let (status, json) = get(
		app(Arc::new(MemoryRecordStore::new()), Arc::new(MemoryStatusLog::new())),
		&format!("/api/logs/{}", Uuid::new_v4()),
	)
	.await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "not_found");
}

#[tokio::test]
async fn malformed_id_is_404_invalid_id() {
	let (status, json) = get(
		app(Arc::new(MemoryRecordStore::new()), Arc::new(MemoryStatusLog::new())),
		"/api/logs/not-an-id",
	)
	.await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "invalid_id");
}

#[tokio::test]
async fn lookup_store_error_is_500() {
	let store = Arc::new(MemoryRecordStore::new());

	store.set_fail_reads(true);

	let (status, _) = get(
		app(store, Arc::new(MemoryStatusLog::new())),
		&format!("/api/logs/{}", Uuid::new_v4()),
	)
	.await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn status_before_any_cycle_is_500() {
	let (status, json) =
		get(app(Arc::new(MemoryRecordStore::new()), Arc::new(MemoryStatusLog::new())), "/api/status")
			.await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json["error_code"], "no_status");
}

#[tokio::test]
async fn status_returns_latest_entry() {
	let tracker = Arc::new(MemoryStatusLog::new());

	tracker.record_failure("source unavailable").await.expect("Failed to record failure.");
	tracker.record_success(1).await.expect("Failed to record success.");

	let (status, json) = get(app(Arc::new(MemoryRecordStore::new()), tracker), "/api/status").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["success"], true);
	assert_eq!(json["count"], 1);
	assert!(json.get("error").is_none());
	assert!(json["_id"].is_string());
	assert!(json["timestamp"].is_string());
}
