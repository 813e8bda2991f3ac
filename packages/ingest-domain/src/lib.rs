pub mod record;
pub mod status;
pub mod time_serde;
pub mod transform;

pub use record::{EnrichedRecord, RawRecord, StoredRecord};
pub use status::IngestStatus;
pub use transform::Transformer;
