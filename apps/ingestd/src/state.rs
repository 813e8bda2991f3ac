use std::sync::Arc;

use color_eyre::eyre::WrapErr;

use ingest_service::{RecordStore, StatusTracker};
use ingest_storage::{PgRecordStore, PgStatusLog};

/// Handles shared by the query routes and the scheduler.
#[derive(Clone)]
pub struct AppState {
	pub records: Arc<dyn RecordStore>,
	pub status: Arc<dyn StatusTracker>,
}
impl AppState {
	pub fn new(records: Arc<dyn RecordStore>, status: Arc<dyn StatusTracker>) -> Self {
		Self { records, status }
	}

	pub async fn connect(cfg: &ingest_config::Storage) -> color_eyre::Result<Self> {
		let records =
			PgRecordStore::connect(cfg).await.wrap_err("Failed to initialize the record store.")?;
		let status =
			PgStatusLog::connect(cfg).await.wrap_err("Failed to initialize the status tracker.")?;

		tracing::info!(
			database = %cfg.database,
			collection = %cfg.collection,
			"Storage ready."
		);

		Ok(Self::new(Arc::new(records), Arc::new(status)))
	}
}
