use sqlx::{PgPool, postgres::PgPoolOptions};
use time::OffsetDateTime;

use crate::Result;

const SCHEMA_LOCK_ID: i64 = 4_471_203;

#[derive(Clone, Debug)]
pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &ingest_config::Storage) -> Result<Self> {
		let pool = PgPoolOptions::new()
			.max_connections(cfg.pool_max_conns)
			.acquire_timeout(cfg.connect_timeout)
			.connect(&cfg.dsn)
			.await?;

		sqlx::query("SELECT 1").execute(&pool).await?;

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self, sql: &str) -> Result<()> {
		// Concurrent `CREATE ... IF NOT EXISTS` can still race on the catalog, so bootstrap runs
		// under a transaction-scoped advisory lock.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(SCHEMA_LOCK_ID).execute(&mut *tx).await?;

		for statement in sql.split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}

	pub async fn close(&self) {
		self.pool.close().await;
	}
}

/// Current time truncated to the microsecond precision Postgres stores.
pub fn now_utc() -> OffsetDateTime {
	let now = OffsetDateTime::now_utc();

	now.replace_nanosecond(now.nanosecond() / 1_000 * 1_000).unwrap_or(now)
}
