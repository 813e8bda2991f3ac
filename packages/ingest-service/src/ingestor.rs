use std::sync::Arc;

use ingest_domain::Transformer;

use crate::{Error, RecordFetcher, RecordStore, StatusTracker};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
	/// Records were fetched and stored. `status_recorded` is false when only the bookkeeping write
	/// failed.
	Succeeded { count: usize, status_recorded: bool },
	Failed { error: Error },
}
impl CycleOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Succeeded { .. })
	}
}

/// Runs one fetch, transform, store, track pass.
#[derive(Clone)]
pub struct Ingestor {
	fetcher: Arc<dyn RecordFetcher>,
	transformer: Transformer,
	store: Arc<dyn RecordStore>,
	tracker: Arc<dyn StatusTracker>,
}
impl Ingestor {
	pub fn new(
		fetcher: Arc<dyn RecordFetcher>,
		transformer: Transformer,
		store: Arc<dyn RecordStore>,
		tracker: Arc<dyn StatusTracker>,
	) -> Self {
		Self { fetcher, transformer, store, tracker }
	}

	pub fn store(&self) -> &Arc<dyn RecordStore> {
		&self.store
	}

	pub fn tracker(&self) -> &Arc<dyn StatusTracker> {
		&self.tracker
	}

	/// Fetch or store failures are recorded as a failed status and end the cycle early. A failed
	/// success write is only logged; it never turns a completed ingestion into a failure.
	pub async fn run_cycle(&self) -> CycleOutcome {
		tracing::info!(source = self.transformer.source(), "Starting ingestion cycle.");

		let raw = match self.fetcher.fetch().await {
			Ok(raw) => raw,
			Err(err) => return self.fail(err).await,
		};
		let enriched = self.transformer.transform(raw);

		if let Err(err) = self.store.write(&enriched).await {
			return self.fail(err).await;
		}

		let count = enriched.len();
		let status_recorded = match self.tracker.record_success(count).await {
			Ok(_) => true,
			Err(err) => {
				tracing::error!(error = %err, count, "Failed to record ingestion success.");

				false
			},
		};

		tracing::info!(count, "Ingestion cycle succeeded.");

		CycleOutcome::Succeeded { count, status_recorded }
	}

	async fn fail(&self, err: Error) -> CycleOutcome {
		tracing::error!(error = %err, "Ingestion cycle failed.");

		if let Err(track_err) = self.tracker.record_failure(&err.to_string()).await {
			tracing::error!(error = %track_err, "Failed to record ingestion failure.");
		}

		CycleOutcome::Failed { error: err }
	}
}
