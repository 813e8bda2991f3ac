pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Request to {endpoint} timed out.")]
	Timeout { endpoint: String },
	#[error("Request to {endpoint} failed: {source}")]
	Transport { endpoint: String, source: reqwest::Error },
	#[error("Unexpected status code {status} from {endpoint}.")]
	Status { endpoint: String, status: u16 },
	#[error("Failed to decode response from {endpoint}: {source}")]
	Decode { endpoint: String, source: serde_json::Error },
	#[error("{message}")]
	InvalidConfig { message: String },
}
