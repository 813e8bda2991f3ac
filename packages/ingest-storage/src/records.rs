use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{Error, Result, db::Db, models::RecordRow, schema};
use ingest_domain::{EnrichedRecord, StoredRecord};

// Keeps each INSERT well under the Postgres bind parameter limit.
const INSERT_CHUNK_ROWS: usize = 1_000;

pub struct PgRecordStore {
	db: Db,
	database: String,
	collection: String,
	table: String,
}
impl PgRecordStore {
	pub async fn connect(cfg: &ingest_config::Storage) -> Result<Self> {
		let db = Db::connect(cfg).await?;
		let store = Self::new(db, &cfg.database, &cfg.collection);

		store.ensure_schema().await?;

		Ok(store)
	}

	pub fn new(db: Db, database: &str, collection: &str) -> Self {
		Self {
			db,
			database: database.to_string(),
			collection: collection.to_string(),
			table: schema::qualified(database, collection),
		}
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		self.db.ensure_schema(&schema::render_records_schema(&self.database, &self.collection)).await
	}

	/// Inserts every record under a fresh id and returns the ids in input order.
	///
	/// Chunks are committed independently, so a failure part-way leaves earlier chunks in place.
	pub async fn write(&self, records: &[EnrichedRecord]) -> Result<Vec<Uuid>> {
		let mut ids = Vec::with_capacity(records.len());

		for chunk in records.chunks(INSERT_CHUNK_ROWS) {
			let chunk_ids: Vec<Uuid> = chunk.iter().map(|_| Uuid::new_v4()).collect();
			let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
				"INSERT INTO {} (id, user_id, post_id, title, body, ingested_at, source) ",
				self.table
			));

			builder.push_values(chunk.iter().zip(&chunk_ids), |mut row, (record, id)| {
				row.push_bind(*id)
					.push_bind(record.source_user_id)
					.push_bind(record.source_item_id)
					.push_bind(record.title.as_str())
					.push_bind(record.body.as_str())
					.push_bind(record.ingested_at)
					.push_bind(record.source.as_str());
			});
			builder.build().execute(&self.db.pool).await?;

			ids.extend(chunk_ids);
		}

		tracing::debug!(table = %self.table, rows = ids.len(), "Inserted records.");

		Ok(ids)
	}

	/// All stored records in insertion order.
	pub async fn read_all(&self) -> Result<Vec<StoredRecord>> {
		let sql = format!(
			"SELECT id, user_id, post_id, title, body, ingested_at, source FROM {} ORDER BY seq",
			self.table
		);
		let rows: Vec<RecordRow> = sqlx::query_as(&sql).fetch_all(&self.db.pool).await?;

		Ok(rows.into_iter().map(StoredRecord::from).collect())
	}

	pub async fn read_by_id(&self, id: &str) -> Result<StoredRecord> {
		let parsed = Uuid::parse_str(id).map_err(|_| Error::InvalidId(id.to_string()))?;
		let sql = format!(
			"SELECT id, user_id, post_id, title, body, ingested_at, source FROM {} WHERE id = $1",
			self.table
		);
		let row: Option<RecordRow> =
			sqlx::query_as(&sql).bind(parsed).fetch_optional(&self.db.pool).await?;

		row.map(StoredRecord::from).ok_or_else(|| Error::NotFound(id.to_string()))
	}

	pub async fn count(&self) -> Result<i64> {
		let sql = format!("SELECT count(*) FROM {}", self.table);

		Ok(sqlx::query_scalar(&sql).fetch_one(&self.db.pool).await?)
	}

	pub async fn close(&self) {
		self.db.close().await;
	}
}
