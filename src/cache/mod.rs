// Cache module for local filesystem caching.
// Stores API response bodies addressed by payload content for reuse across
// routes and process runs.

pub mod paths;
pub mod store;

pub use store::{CacheInfo, ResponseCache};
