use time::OffsetDateTime;

use crate::{EnrichedRecord, RawRecord};

#[derive(Clone, Debug)]
pub struct Transformer {
	source: String,
}
impl Transformer {
	pub fn new(source: impl Into<String>) -> Self {
		Self { source: source.into() }
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	/// Stamps the whole batch with one timestamp taken now.
	pub fn transform(&self, records: Vec<RawRecord>) -> Vec<EnrichedRecord> {
		self.transform_at(records, OffsetDateTime::now_utc())
	}

	pub fn transform_at(
		&self,
		records: Vec<RawRecord>,
		ingested_at: OffsetDateTime,
	) -> Vec<EnrichedRecord> {
		records
			.into_iter()
			.map(|raw| EnrichedRecord {
				source_user_id: raw.source_user_id,
				source_item_id: raw.source_item_id,
				title: raw.title,
				body: raw.body,
				ingested_at,
				source: self.source.clone(),
			})
			.collect()
	}
}
