pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Fetch failed: {message}")]
	Fetch { message: String },
	#[error("Store failed: {message}")]
	Store { message: String },
	#[error("Not found: {id}")]
	NotFound { id: String },
	#[error("Invalid id: {id}")]
	InvalidId { id: String },
	#[error("No ingest status recorded yet.")]
	NoStatus,
	#[error("Status write failed: {message}")]
	TrackerWrite { message: String },
}
impl From<ingest_providers::Error> for Error {
	fn from(err: ingest_providers::Error) -> Self {
		Self::Fetch { message: err.to_string() }
	}
}

impl From<ingest_storage::Error> for Error {
	fn from(err: ingest_storage::Error) -> Self {
		match err {
			ingest_storage::Error::Sqlx(inner) => Self::Store { message: inner.to_string() },
			ingest_storage::Error::InvalidId(id) => Self::InvalidId { id },
			ingest_storage::Error::NotFound(id) => Self::NotFound { id },
			ingest_storage::Error::NoStatus => Self::NoStatus,
			ingest_storage::Error::InvalidArgument(message) => Self::Store { message },
		}
	}
}
