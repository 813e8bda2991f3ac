pub mod db;
pub mod models;
pub mod records;
pub mod schema;
pub mod status;

mod error;

pub use error::Error;
pub use records::PgRecordStore;
pub use status::PgStatusLog;

pub type Result<T, E = Error> = std::result::Result<T, E>;
