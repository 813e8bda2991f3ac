use std::time::Duration;

use reqwest::Client;

use crate::{Error, Result};
use ingest_domain::RawRecord;

/// Issues a single GET against the configured endpoint and decodes a JSON array of records.
///
/// The client is built once and reused; every request is bounded by the configured timeout.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
	client: Client,
	endpoint: String,
}
impl HttpFetcher {
	pub fn new(cfg: &ingest_config::Source) -> Result<Self> {
		Self::with_timeout(&cfg.endpoint, cfg.timeout)
	}

	pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
		let client = Client::builder().timeout(timeout).build().map_err(|err| {
			Error::InvalidConfig { message: format!("Failed to build HTTP client: {err}.") }
		})?;

		Ok(Self { client, endpoint: endpoint.to_string() })
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub async fn fetch(&self) -> Result<Vec<RawRecord>> {
		let res = self.client.get(&self.endpoint).send().await.map_err(|err| self.transport(err))?;
		let status = res.status();

		if !status.is_success() {
			return Err(Error::Status { endpoint: self.endpoint.clone(), status: status.as_u16() });
		}

		let body = res.bytes().await.map_err(|err| self.transport(err))?;
		let records: Vec<RawRecord> = serde_json::from_slice(&body)
			.map_err(|err| Error::Decode { endpoint: self.endpoint.clone(), source: err })?;

		tracing::debug!(endpoint = %self.endpoint, count = records.len(), "Fetched source records.");

		Ok(records)
	}

	fn transport(&self, err: reqwest::Error) -> Error {
		if err.is_timeout() {
			Error::Timeout { endpoint: self.endpoint.clone() }
		} else {
			Error::Transport { endpoint: self.endpoint.clone(), source: err }
		}
	}
}
