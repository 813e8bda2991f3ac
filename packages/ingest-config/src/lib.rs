mod duration;
mod error;
mod types;

pub use duration::parse_duration;
pub use error::{Error, Result};
pub use types::{Config, STATUS_COLLECTION, Service, Source, Storage};

use std::{env, fs, path::Path, time::Duration};

pub fn load(path: Option<&Path>) -> Result<Config> {
	let mut cfg = match path {
		Some(path) => read_file(path)?,
		None => Config::default(),
	};

	apply_env(&mut cfg, |key| env::var(key).ok())?;
	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn from_toml_str(raw: &str) -> std::result::Result<Config, toml::de::Error> {
	toml::from_str(raw)
}

/// Overlays environment-style keys on top of `cfg`. Unset keys keep the current value.
pub fn apply_env<F>(cfg: &mut Config, lookup: F) -> Result<()>
where
	F: Fn(&str) -> Option<String>,
{
	if let Some(value) = lookup("API_ENDPOINT") {
		cfg.source.endpoint = value;
	}
	if let Some(value) = lookup("SOURCE_NAME") {
		cfg.source.name = value;
	}
	if let Some(value) = lookup("FETCH_INTERVAL") {
		cfg.source.interval = env_duration("FETCH_INTERVAL", &value)?;
	}
	if let Some(value) = lookup("FETCH_TIMEOUT") {
		cfg.source.timeout = env_duration("FETCH_TIMEOUT", &value)?;
	}
	if let Some(value) = lookup("STORAGE_DSN") {
		cfg.storage.dsn = value;
	}
	if let Some(value) = lookup("STORAGE_DATABASE") {
		cfg.storage.database = value;
	}
	if let Some(value) = lookup("STORAGE_COLLECTION") {
		cfg.storage.collection = value;
	}
	if let Some(value) = lookup("SERVER_PORT") {
		cfg.service.port = value.trim().parse().map_err(|_| Error::Env {
			key: "SERVER_PORT".to_string(),
			message: format!("{value:?} is not a valid port number."),
		})?;
	}
	if let Some(value) = lookup("LOG_LEVEL") {
		cfg.service.log_level = value;
	}
	if let Some(value) = lookup("SHUTDOWN_GRACE") {
		cfg.service.shutdown_grace = env_duration("SHUTDOWN_GRACE", &value)?;
	}

	Ok(())
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.source.endpoint.trim().is_empty() {
		return Err(Error::Validation { message: "source.endpoint must be non-empty.".to_string() });
	}
	if cfg.source.name.trim().is_empty() {
		return Err(Error::Validation { message: "source.name must be non-empty.".to_string() });
	}

	for (label, value) in [
		("source.interval", cfg.source.interval),
		("source.timeout", cfg.source.timeout),
		("service.shutdown_grace", cfg.service.shutdown_grace),
		("storage.connect_timeout", cfg.storage.connect_timeout),
	] {
		if value.is_zero() {
			return Err(Error::Validation { message: format!("{label} must be greater than zero.") });
		}
	}

	if cfg.storage.dsn.trim().is_empty() {
		return Err(Error::Validation { message: "storage.dsn must be non-empty.".to_string() });
	}
	if cfg.storage.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	for (label, value) in
		[("storage.database", &cfg.storage.database), ("storage.collection", &cfg.storage.collection)]
	{
		if !is_identifier(value) {
			return Err(Error::Validation {
				message: format!(
					"{label} must start with a letter or underscore and contain only ASCII letters, digits, or underscores (max 63 characters)."
				),
			});
		}
	}

	if cfg.storage.collection.eq_ignore_ascii_case(STATUS_COLLECTION) {
		return Err(Error::Validation {
			message: format!("storage.collection must not be {STATUS_COLLECTION:?}."),
		});
	}

	Ok(())
}

fn read_file(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	from_toml_str(&raw).map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })
}

fn env_duration(key: &str, value: &str) -> Result<Duration> {
	parse_duration(value).map_err(|err| Error::Env { key: key.to_string(), message: err.to_string() })
}

fn normalize(cfg: &mut Config) {
	cfg.source.endpoint = cfg.source.endpoint.trim().to_string();
	cfg.source.name = cfg.source.name.trim().to_string();
	cfg.storage.database = cfg.storage.database.trim().to_string();
	cfg.storage.collection = cfg.storage.collection.trim().to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}

fn is_identifier(value: &str) -> bool {
	let mut chars = value.chars();
	let Some(first) = chars.next() else {
		return false;
	};

	value.len() <= 63
		&& (first.is_ascii_alphabetic() || first == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
