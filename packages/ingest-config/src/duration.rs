use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::{Error, Result};

/// Parses human-readable durations such as `300ms`, `30s`, `5m` or `1h 30m`.
pub fn parse_duration(raw: &str) -> Result<Duration> {
	humantime::parse_duration(raw.trim())
		.map_err(|_| Error::InvalidDuration { value: raw.to_string() })
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	parse_duration(&raw).map_err(serde::de::Error::custom)
}
