// econops: client library for the EconOps statistics API.
// Authenticates with a bearer token, signs request payloads, and caches
// GET-style responses on disk keyed by payload content rather than by route.

//! Client library for the EconOps statistics/computation API.
//!
//! ```no_run
//! use econops::{Client, ClientConfig};
//! use serde_json::{json, Map, Value};
//!
//! # fn main() -> econops::Result<()> {
//! let client = Client::new(ClientConfig {
//!     token: Some("my_token".to_string()),
//!     ..ClientConfig::default()
//! })?;
//!
//! let mut payload = Map::new();
//! payload.insert("data".to_string(), json!([[1, 2, 3], [4, 5, 6]]));
//! payload.insert("n_components".to_string(), json!(2));
//!
//! let response = client.get("/compute/pca", Some(&payload))?;
//! if response.is_success() {
//!     let result: Value = response.json()?;
//!     println!("{result}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Responses are cached under a digest of the canonical payload alone (not
//! the route), so a route refactor on the server does not invalidate local
//! entries. See [`sign::cache_key`] for the invariant.

pub mod api;
pub mod cache;
pub mod canon;
pub mod credentials;
pub mod error;
pub mod sign;

pub use api::{ApiResponse, Client, ClientConfig, DEFAULT_BASE_URL};
pub use cache::{CacheInfo, ResponseCache};
pub use credentials::{load_credentials, save_credentials};
pub use error::{EconopsError, Result, TOKEN_ENV};
