use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// One item as returned by the remote source.
///
/// Missing or `null` fields decode to zero values, so a sparse item never fails its batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawRecord {
	#[serde(rename = "userId", default, deserialize_with = "null_as_default")]
	pub source_user_id: i64,
	#[serde(rename = "id", default, deserialize_with = "null_as_default")]
	pub source_item_id: i64,
	#[serde(default, deserialize_with = "null_as_default")]
	pub title: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub body: String,
}

/// A raw record stamped with ingestion metadata, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnrichedRecord {
	#[serde(rename = "userId")]
	pub source_user_id: i64,
	#[serde(rename = "postId")]
	pub source_item_id: i64,
	pub title: String,
	pub body: String,
	#[serde(with = "crate::time_serde")]
	pub ingested_at: OffsetDateTime,
	pub source: String,
}

/// An enriched record together with the identifier the store assigned on write.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredRecord {
	#[serde(rename = "_id")]
	pub id: Uuid,
	#[serde(flatten)]
	pub record: EnrichedRecord,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
