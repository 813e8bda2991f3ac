use ingest_domain::{EnrichedRecord, IngestStatus, RawRecord, StoredRecord};
use ingest_providers::HttpFetcher;
use ingest_storage::{PgRecordStore, PgStatusLog};

use crate::{BoxFuture, Error, RecordFetcher, RecordStore, Result, StatusTracker};

impl RecordFetcher for HttpFetcher {
	fn fetch(&self) -> BoxFuture<'_, Result<Vec<RawRecord>>> {
		Box::pin(async move { HttpFetcher::fetch(self).await.map_err(Error::from) })
	}
}

impl RecordStore for PgRecordStore {
	fn write<'a>(&'a self, records: &'a [EnrichedRecord]) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			PgRecordStore::write(self, records)
				.await
				.map(|_| ())
				.map_err(|err| Error::Store { message: err.to_string() })
		})
	}

	fn read_all(&self) -> BoxFuture<'_, Result<Vec<StoredRecord>>> {
		Box::pin(async move { PgRecordStore::read_all(self).await.map_err(Error::from) })
	}

	fn read_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<StoredRecord>> {
		Box::pin(async move { PgRecordStore::read_by_id(self, id).await.map_err(Error::from) })
	}

	fn close(&self) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			PgRecordStore::close(self).await;

			Ok(())
		})
	}
}

impl StatusTracker for PgStatusLog {
	fn record_success(&self, count: usize) -> BoxFuture<'_, Result<IngestStatus>> {
		Box::pin(async move {
			let count = i64::try_from(count).map_err(|_| Error::TrackerWrite {
				message: format!("count {count} exceeds the supported range."),
			})?;

			PgStatusLog::record_success(self, count)
				.await
				.map_err(|err| Error::TrackerWrite { message: err.to_string() })
		})
	}

	fn record_failure<'a>(&'a self, error: &'a str) -> BoxFuture<'a, Result<IngestStatus>> {
		Box::pin(async move {
			PgStatusLog::record_failure(self, error)
				.await
				.map_err(|err| Error::TrackerWrite { message: err.to_string() })
		})
	}

	fn latest(&self) -> BoxFuture<'_, Result<IngestStatus>> {
		Box::pin(async move { PgStatusLog::latest(self).await.map_err(Error::from) })
	}

	fn close(&self) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			PgStatusLog::close(self).await;

			Ok(())
		})
	}
}
