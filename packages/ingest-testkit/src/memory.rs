//! In-process collaborators for exercising the ingestion cycle and the query API without
//! Postgres or a live source.

use std::{
	collections::VecDeque,
	sync::{
		Mutex,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	time::Duration,
};

use time::OffsetDateTime;
use uuid::Uuid;

use ingest_domain::{EnrichedRecord, IngestStatus, RawRecord, StoredRecord};
use ingest_service::{BoxFuture, Error, RecordFetcher, RecordStore, Result, StatusTracker};

/// Replays queued responses, then keeps returning the last one.
#[derive(Default)]
pub struct ScriptedFetcher {
	responses: Mutex<VecDeque<Result<Vec<RawRecord>>>>,
	last: Mutex<Option<Result<Vec<RawRecord>>>>,
	delay: Option<Duration>,
	calls: AtomicUsize,
}
impl ScriptedFetcher {
	pub fn new(responses: impl IntoIterator<Item = Result<Vec<RawRecord>>>) -> Self {
		Self { responses: Mutex::new(responses.into_iter().collect()), ..Self::default() }
	}

	pub fn ok(records: Vec<RawRecord>) -> Self {
		Self::new([Ok(records)])
	}

	pub fn failing(message: &str) -> Self {
		Self::new([Err(Error::Fetch { message: message.to_string() })])
	}

	/// Sleeps before answering each call.
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);

		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	fn next_response(&self) -> Result<Vec<RawRecord>> {
		let mut queue = self.responses.lock().unwrap_or_else(|err| err.into_inner());
		let mut last = self.last.lock().unwrap_or_else(|err| err.into_inner());

		if let Some(response) = queue.pop_front() {
			*last = Some(response.clone());

			return response;
		}

		last.clone().unwrap_or_else(|| Ok(Vec::new()))
	}
}
impl RecordFetcher for ScriptedFetcher {
	fn fetch(&self) -> BoxFuture<'_, Result<Vec<RawRecord>>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			if let Some(delay) = self.delay {
				tokio::time::sleep(delay).await;
			}

			self.next_response()
		})
	}
}

#[derive(Default)]
pub struct MemoryRecordStore {
	records: Mutex<Vec<StoredRecord>>,
	fail_writes: AtomicBool,
	fail_reads: AtomicBool,
	writes: AtomicUsize,
	closed: AtomicBool,
}
impl MemoryRecordStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_records(records: Vec<StoredRecord>) -> Self {
		Self { records: Mutex::new(records), ..Self::default() }
	}

	pub fn set_fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	pub fn set_fail_reads(&self, fail: bool) {
		self.fail_reads.store(fail, Ordering::SeqCst);
	}

	/// Number of `write` calls, including empty and failed ones.
	pub fn writes(&self) -> usize {
		self.writes.load(Ordering::SeqCst)
	}

	pub fn len(&self) -> usize {
		self.records.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn snapshot(&self) -> Vec<StoredRecord> {
		self.records.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}
}
impl RecordStore for MemoryRecordStore {
	fn write<'a>(&'a self, records: &'a [EnrichedRecord]) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.writes.fetch_add(1, Ordering::SeqCst);

			if self.fail_writes.load(Ordering::SeqCst) {
				return Err(Error::Store { message: "memory store rejected the write".to_string() });
			}

			let mut stored = self.records.lock().unwrap_or_else(|err| err.into_inner());

			stored.extend(
				records
					.iter()
					.map(|record| StoredRecord { id: Uuid::new_v4(), record: record.clone() }),
			);

			Ok(())
		})
	}

	fn read_all(&self) -> BoxFuture<'_, Result<Vec<StoredRecord>>> {
		Box::pin(async move {
			if self.fail_reads.load(Ordering::SeqCst) {
				return Err(Error::Store { message: "memory store rejected the read".to_string() });
			}

			Ok(self.snapshot())
		})
	}

	fn read_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<StoredRecord>> {
		Box::pin(async move {
			if self.fail_reads.load(Ordering::SeqCst) {
				return Err(Error::Store { message: "memory store rejected the read".to_string() });
			}

			let parsed = Uuid::parse_str(id).map_err(|_| Error::InvalidId { id: id.to_string() })?;
			let stored = self.records.lock().unwrap_or_else(|err| err.into_inner());

			stored
				.iter()
				.find(|record| record.id == parsed)
				.cloned()
				.ok_or_else(|| Error::NotFound { id: id.to_string() })
		})
	}

	fn close(&self) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			self.closed.store(true, Ordering::SeqCst);

			Ok(())
		})
	}
}

#[derive(Default)]
pub struct MemoryStatusLog {
	entries: Mutex<Vec<IngestStatus>>,
	fail_writes: AtomicBool,
	fail_close: AtomicBool,
	closed: AtomicBool,
}
impl MemoryStatusLog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	pub fn set_fail_close(&self, fail: bool) {
		self.fail_close.store(fail, Ordering::SeqCst);
	}

	pub fn entries(&self) -> Vec<IngestStatus> {
		self.entries.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}

	fn append(&self, status: IngestStatus) -> Result<IngestStatus> {
		if self.fail_writes.load(Ordering::SeqCst) {
			return Err(Error::TrackerWrite { message: "memory status log rejected the write".to_string() });
		}

		self.entries.lock().unwrap_or_else(|err| err.into_inner()).push(status.clone());

		Ok(status)
	}
}
impl StatusTracker for MemoryStatusLog {
	fn record_success(&self, count: usize) -> BoxFuture<'_, Result<IngestStatus>> {
		Box::pin(async move {
			let count = i64::try_from(count)
				.map_err(|_| Error::TrackerWrite { message: format!("count {count} is too large.") })?;

			self.append(IngestStatus::succeeded(Uuid::new_v4(), OffsetDateTime::now_utc(), count))
		})
	}

	fn record_failure<'a>(&'a self, error: &'a str) -> BoxFuture<'a, Result<IngestStatus>> {
		Box::pin(async move {
			self.append(IngestStatus::failed(Uuid::new_v4(), OffsetDateTime::now_utc(), error))
		})
	}

	fn latest(&self) -> BoxFuture<'_, Result<IngestStatus>> {
		Box::pin(async move {
			let entries = self.entries.lock().unwrap_or_else(|err| err.into_inner());

			// Later appends win timestamp ties.
			entries
				.iter()
				.enumerate()
				.max_by_key(|(index, status)| (status.timestamp, *index))
				.map(|(_, status)| status.clone())
				.ok_or(Error::NoStatus)
		})
	}

	fn close(&self) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			self.closed.store(true, Ordering::SeqCst);

			if self.fail_close.load(Ordering::SeqCst) {
				return Err(Error::Store { message: "memory status log failed to close".to_string() });
			}

			Ok(())
		})
	}
}
