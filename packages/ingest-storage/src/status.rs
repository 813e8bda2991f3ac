use uuid::Uuid;

use crate::{Error, Result, db, db::Db, models::StatusRow, schema};
use ingest_config::STATUS_COLLECTION;
use ingest_domain::IngestStatus;

/// Append-only log of cycle outcomes.
pub struct PgStatusLog {
	db: Db,
	database: String,
	table: String,
}
impl PgStatusLog {
	pub async fn connect(cfg: &ingest_config::Storage) -> Result<Self> {
		let db = Db::connect(cfg).await?;
		let log = Self::new(db, &cfg.database);

		log.ensure_schema().await?;

		Ok(log)
	}

	pub fn new(db: Db, database: &str) -> Self {
		Self {
			db,
			database: database.to_string(),
			table: schema::qualified(database, STATUS_COLLECTION),
		}
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		self.db.ensure_schema(&schema::render_status_schema(&self.database)).await
	}

	pub async fn record_success(&self, count: i64) -> Result<IngestStatus> {
		if count < 0 {
			return Err(Error::InvalidArgument(format!("count must not be negative, got {count}.")));
		}

		self.append(IngestStatus::succeeded(Uuid::new_v4(), db::now_utc(), count)).await
	}

	pub async fn record_failure(&self, error: &str) -> Result<IngestStatus> {
		let message = if error.trim().is_empty() { "unknown error" } else { error };

		self.append(IngestStatus::failed(Uuid::new_v4(), db::now_utc(), message)).await
	}

	/// The entry with the greatest timestamp; ties go to the later append.
	pub async fn latest(&self) -> Result<IngestStatus> {
		let sql = format!(
			r#"SELECT id, "timestamp", success, "count", error FROM {} ORDER BY "timestamp" DESC, seq DESC LIMIT 1"#,
			self.table
		);
		let row: Option<StatusRow> = sqlx::query_as(&sql).fetch_optional(&self.db.pool).await?;

		row.map(IngestStatus::from).ok_or(Error::NoStatus)
	}

	pub async fn close(&self) {
		self.db.close().await;
	}

	async fn append(&self, status: IngestStatus) -> Result<IngestStatus> {
		let sql = format!(
			r#"INSERT INTO {} (id, "timestamp", success, "count", error) VALUES ($1, $2, $3, $4, $5)"#,
			self.table
		);

		sqlx::query(&sql)
			.bind(status.id)
			.bind(status.timestamp)
			.bind(status.success)
			.bind(status.count)
			.bind(status.error.as_deref())
			.execute(&self.db.pool)
			.await?;

		Ok(status)
	}
}
