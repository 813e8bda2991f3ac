pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read config file at {path:?}.")]
	ReadConfig { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse config file at {path:?}.")]
	ParseConfig { path: std::path::PathBuf, source: toml::de::Error },
	#[error("Environment variable {key} is invalid: {message}")]
	Env { key: String, message: String },
	#[error("Invalid duration {value:?}; expected a form such as 300ms, 30s, 5m, or 1h 30m.")]
	InvalidDuration { value: String },
	#[error("{message}")]
	Validation { message: String },
}
