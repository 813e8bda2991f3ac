pub mod fetch;

mod error;

pub use error::{Error, Result};
pub use fetch::HttpFetcher;
