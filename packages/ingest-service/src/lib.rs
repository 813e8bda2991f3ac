pub mod adapters;
pub mod ingestor;

mod error;

pub use error::{Error, Result};
pub use ingestor::{CycleOutcome, Ingestor};

use std::{future::Future, pin::Pin};

use ingest_domain::{EnrichedRecord, IngestStatus, RawRecord, StoredRecord};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait RecordFetcher
where
	Self: Send + Sync,
{
	/// Records in the order the source returned them. Failures are [`Error::Fetch`].
	fn fetch(&self) -> BoxFuture<'_, Result<Vec<RawRecord>>>;
}

/// Shared between the scheduler (writer) and the query API (reader); implementations must be safe
/// for concurrent use.
pub trait RecordStore
where
	Self: Send + Sync,
{
	/// Writing an empty batch succeeds without touching storage.
	fn write<'a>(&'a self, records: &'a [EnrichedRecord]) -> BoxFuture<'a, Result<()>>;

	fn read_all(&self) -> BoxFuture<'_, Result<Vec<StoredRecord>>>;

	/// Fails with [`Error::InvalidId`] for malformed ids and [`Error::NotFound`] for unknown ones.
	fn read_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<StoredRecord>>;

	fn close(&self) -> BoxFuture<'_, Result<()>>;
}

pub trait StatusTracker
where
	Self: Send + Sync,
{
	fn record_success(&self, count: usize) -> BoxFuture<'_, Result<IngestStatus>>;

	fn record_failure<'a>(&'a self, error: &'a str) -> BoxFuture<'a, Result<IngestStatus>>;

	/// Fails with [`Error::NoStatus`] when nothing has been recorded.
	fn latest(&self) -> BoxFuture<'_, Result<IngestStatus>>;

	fn close(&self) -> BoxFuture<'_, Result<()>>;
}
