use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Outcome of one ingestion cycle.
///
/// `count` is present only on success and `error` only on failure. Use [`IngestStatus::succeeded`]
/// and [`IngestStatus::failed`] to keep the two apart.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct IngestStatus {
	#[serde(rename = "_id")]
	pub id: Uuid,
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub count: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}
impl IngestStatus {
	pub fn succeeded(id: Uuid, timestamp: OffsetDateTime, count: i64) -> Self {
		Self { id, timestamp, success: true, count: Some(count), error: None }
	}

	pub fn failed(id: Uuid, timestamp: OffsetDateTime, error: impl Into<String>) -> Self {
		Self { id, timestamp, success: false, count: None, error: Some(error.into()) }
	}

	/// Whether the success flag agrees with which of `count` and `error` is populated.
	pub fn is_consistent(&self) -> bool {
		if self.success {
			self.count.is_some() && self.error.is_none()
		} else {
			self.count.is_none() && self.error.is_some()
		}
	}
}
