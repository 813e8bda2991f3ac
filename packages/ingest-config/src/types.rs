use std::{
	net::{Ipv4Addr, SocketAddr},
	time::Duration,
};

use serde::Deserialize;

/// Fixed name of the status log table, kept next to the records table.
pub const STATUS_COLLECTION: &str = "ingest_status";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub service: Service,
	pub source: Source,
	pub storage: Storage,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Service {
	pub port: u16,
	pub log_level: String,
	/// Upper bound for draining tasks and closing connections at shutdown.
	#[serde(deserialize_with = "crate::duration::deserialize")]
	pub shutdown_grace: Duration,
}
impl Service {
	pub fn bind_addr(&self) -> SocketAddr {
		SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
	}
}
impl Default for Service {
	fn default() -> Self {
		Self {
			port: 8_080,
			log_level: "info".to_string(),
			shutdown_grace: Duration::from_secs(10),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Source {
	pub endpoint: String,
	/// Tag stamped on every enriched record.
	pub name: String,
	#[serde(deserialize_with = "crate::duration::deserialize")]
	pub interval: Duration,
	#[serde(deserialize_with = "crate::duration::deserialize")]
	pub timeout: Duration,
}
impl Default for Source {
	fn default() -> Self {
		Self {
			endpoint: "https://jsonplaceholder.typicode.com/posts".to_string(),
			name: "placeholder_api".to_string(),
			interval: Duration::from_secs(300),
			timeout: Duration::from_secs(30),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Storage {
	pub dsn: String,
	/// Postgres schema that holds both collections.
	pub database: String,
	/// Table holding enriched records.
	pub collection: String,
	pub pool_max_conns: u32,
	#[serde(deserialize_with = "crate::duration::deserialize")]
	pub connect_timeout: Duration,
}
impl Default for Storage {
	fn default() -> Self {
		Self {
			dsn: "postgres://localhost:5432/postgres".to_string(),
			database: "logs".to_string(),
			collection: "posts".to_string(),
			pool_max_conns: 5,
			connect_timeout: Duration::from_secs(10),
		}
	}
}
