#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Invalid id: {0:?} is not a UUID.")]
	InvalidId(String),
	#[error("Not found: no record with id {0}.")]
	NotFound(String),
	#[error("No ingest status has been recorded yet.")]
	NoStatus,
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}
