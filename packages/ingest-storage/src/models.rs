use time::OffsetDateTime;
use uuid::Uuid;

use ingest_domain::{EnrichedRecord, IngestStatus, StoredRecord};

#[derive(Debug, sqlx::FromRow)]
pub struct RecordRow {
	pub id: Uuid,
	pub user_id: i64,
	pub post_id: i64,
	pub title: String,
	pub body: String,
	pub ingested_at: OffsetDateTime,
	pub source: String,
}
impl From<RecordRow> for StoredRecord {
	fn from(row: RecordRow) -> Self {
		Self {
			id: row.id,
			record: EnrichedRecord {
				source_user_id: row.user_id,
				source_item_id: row.post_id,
				title: row.title,
				body: row.body,
				ingested_at: row.ingested_at,
				source: row.source,
			},
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct StatusRow {
	pub id: Uuid,
	pub timestamp: OffsetDateTime,
	pub success: bool,
	pub count: Option<i64>,
	pub error: Option<String>,
}
impl From<StatusRow> for IngestStatus {
	fn from(row: StatusRow) -> Self {
		Self {
			id: row.id,
			timestamp: row.timestamp,
			success: row.success,
			count: row.count,
			error: row.error,
		}
	}
}
