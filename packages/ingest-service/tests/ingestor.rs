use std::sync::Arc;

use time::OffsetDateTime;

use ingest_domain::{RawRecord, Transformer};
use ingest_service::{CycleOutcome, Error, Ingestor, StatusTracker};
use ingest_testkit::{MemoryRecordStore, MemoryStatusLog, ScriptedFetcher};

fn raw(item: i64) -> RawRecord {
	RawRecord {
		source_user_id: 1,
		source_item_id: item,
		title: format!("title {item}"),
		body: format!("body {item}"),
	}
}

struct Harness {
	fetcher: Arc<ScriptedFetcher>,
	store: Arc<MemoryRecordStore>,
	tracker: Arc<MemoryStatusLog>,
	ingestor: Ingestor,
}

fn harness(fetcher: ScriptedFetcher) -> Harness {
	let fetcher = Arc::new(fetcher);
	let store = Arc::new(MemoryRecordStore::new());
	let tracker = Arc::new(MemoryStatusLog::new());
	let ingestor = Ingestor::new(
		fetcher.clone(),
		Transformer::new("placeholder_api"),
		store.clone(),
		tracker.clone(),
	);

	Harness { fetcher, store, tracker, ingestor }
}

#[tokio::test]
async fn successful_cycle_stores_and_records_count() {
	let h = harness(ScriptedFetcher::ok(vec![raw(1), raw(2), raw(3)]));
	let started = OffsetDateTime::now_utc();
	let outcome = h.ingestor.run_cycle().await;

	assert_eq!(outcome, CycleOutcome::Succeeded { count: 3, status_recorded: true });
	assert_eq!(h.store.len(), 3);

	let stored = h.store.snapshot();

	assert_eq!(
		stored.iter().map(|s| s.record.source_item_id).collect::<Vec<_>>(),
		vec![1, 2, 3]
	);
	assert!(stored.iter().all(|s| s.record.source == "placeholder_api"));

	let latest = h.tracker.latest().await.expect("Expected a status.");

	assert!(latest.success);
	assert_eq!(latest.count, Some(3));
	assert_eq!(latest.error, None);
	assert!(latest.timestamp >= started);
	assert_eq!(h.tracker.entries().len(), 1);
}

#[tokio::test]
async fn empty_fetch_is_a_successful_cycle() {
	let h = harness(ScriptedFetcher::ok(Vec::new()));
	let outcome = h.ingestor.run_cycle().await;

	assert_eq!(outcome, CycleOutcome::Succeeded { count: 0, status_recorded: true });
	assert_eq!(h.store.writes(), 1);
	assert!(h.store.is_empty());

	let latest = h.tracker.latest().await.expect("Expected a status.");

	assert!(latest.success);
	assert_eq!(latest.count, Some(0));
}

#[tokio::test]
async fn fetch_failure_skips_store_and_records_failure() {
	let h = harness(ScriptedFetcher::failing("connection refused"));
	let outcome = h.ingestor.run_cycle().await;

	assert!(matches!(outcome, CycleOutcome::Failed { error: Error::Fetch { .. } }));
	assert_eq!(h.store.writes(), 0);

	let entries = h.tracker.entries();

	assert_eq!(entries.len(), 1);
	assert!(!entries[0].success);
	assert_eq!(entries[0].count, None);
	assert!(entries[0].error.as_deref().is_some_and(|e| e.contains("connection refused")));
}

#[tokio::test]
async fn store_failure_records_failure_without_success() {
	let h = harness(ScriptedFetcher::ok(vec![raw(1)]));

	h.store.set_fail_writes(true);

	let outcome = h.ingestor.run_cycle().await;

	assert!(matches!(outcome, CycleOutcome::Failed { error: Error::Store { .. } }));

	let entries = h.tracker.entries();

	assert_eq!(entries.len(), 1);
	assert!(!entries[0].success);
	assert!(entries.iter().all(|status| status.is_consistent()));
}

#[tokio::test]
async fn tracker_failure_after_store_keeps_cycle_successful() {
	let h = harness(ScriptedFetcher::ok(vec![raw(1), raw(2)]));

	h.tracker.set_fail_writes(true);

	let outcome = h.ingestor.run_cycle().await;

	assert_eq!(outcome, CycleOutcome::Succeeded { count: 2, status_recorded: false });
	assert_eq!(h.fetcher.calls(), 1);
	assert_eq!(h.store.writes(), 1);
	assert_eq!(h.store.len(), 2);
	assert!(h.tracker.entries().is_empty());
}

#[tokio::test]
async fn tracker_failure_on_failed_cycle_is_swallowed() {
	let h = harness(ScriptedFetcher::failing("timeout"));

	h.tracker.set_fail_writes(true);

	let outcome = h.ingestor.run_cycle().await;

	assert!(!outcome.is_success());
	assert_eq!(h.fetcher.calls(), 1);
}

#[tokio::test]
async fn failure_then_recovery_updates_latest_status() {
	let h = harness(ScriptedFetcher::new([
		Err(Error::Fetch { message: "HTTP 500".to_string() }),
		Ok(vec![raw(9)]),
	]));

	assert!(!h.ingestor.run_cycle().await.is_success());
	assert!(h.ingestor.run_cycle().await.is_success());

	let latest = h.tracker.latest().await.expect("Expected a status.");

	assert!(latest.success);
	assert_eq!(latest.count, Some(1));
	assert_eq!(h.tracker.entries().len(), 2);
}

#[tokio::test]
async fn latest_on_empty_log_is_no_status() {
	let tracker = MemoryStatusLog::new();

	assert_eq!(tracker.latest().await, Err(Error::NoStatus));
}
