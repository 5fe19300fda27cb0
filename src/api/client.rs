// EconOps API client.
// Resolves credentials, signs payloads, dispatches verbs through a transport,
// and memoizes successful GET-style responses in the payload-addressed cache.

use std::path::PathBuf;

use reqwest::header::HeaderValue;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::api::response::ApiResponse;
use crate::api::transport::{HttpTransport, Method, RawResponse, RequestDescriptor, Transport};
use crate::cache::{CacheInfo, ResponseCache};
use crate::credentials;
use crate::error::{EconopsError, Result, TOKEN_ENV};
use crate::sign;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.econops.com";

const USER_AGENT: &str = concat!("econops-rust/", env!("CARGO_PKG_VERSION"));

/// Client configuration. Explicit and per-instance; there is no process-wide
/// default client or hidden singleton state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API token. When absent, resolution falls through `credential_id` and
    /// then the `econops_token` environment variable.
    pub token: Option<String>,
    /// Id of a saved credential file to load the token from.
    pub credential_id: Option<String>,
    /// Base URL for the API; a trailing slash is trimmed.
    pub base_url: String,
    /// Whether GET-style responses are read from and written to the cache.
    pub use_cache: bool,
    /// Override for the cache directory (defaults to the per-user location).
    pub cache_dir: Option<PathBuf>,
    /// Override for the credentials directory (defaults to the per-user
    /// location).
    pub credentials_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: None,
            credential_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            use_cache: true,
            cache_dir: None,
            credentials_dir: None,
        }
    }
}

/// Client for the EconOps API.
///
/// All configuration (token, base URL, cache toggle) is fixed at
/// construction. Calls are synchronous and block until the network round-trip
/// or cache read completes.
pub struct Client {
    token: String,
    base_url: String,
    use_cache: bool,
    cache: Option<ResponseCache>,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Create a client with the default HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new()?;
        Self::with_transport(config, Box::new(transport))
    }

    /// Create a client with an injected transport.
    pub fn with_transport(config: ClientConfig, transport: Box<dyn Transport>) -> Result<Self> {
        let token = resolve_token(&config)?;

        // Fail fast on tokens that cannot form a valid Authorization header.
        HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| EconopsError::InvalidHeader(e.to_string()))?;

        let cache = match config.cache_dir {
            Some(dir) => Some(ResponseCache::at(dir)),
            None => {
                let cache = ResponseCache::new();
                if cache.is_none() {
                    warn!("no per-user cache directory available, caching disabled");
                }
                cache
            }
        };

        Ok(Self {
            token,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            use_cache: config.use_cache,
            cache,
            transport,
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieve from a route, consulting the payload-addressed cache.
    ///
    /// The cache key is derived from `data` alone (the empty mapping when
    /// `data` is `None`); the route does not participate, so a cached body
    /// is replayed for any route given an identical payload. On a miss the
    /// request goes out as a plain GET when there is no payload, or as a
    /// POST carrying the signed payload when there is one; a 2xx response
    /// body is stored under the key before being returned.
    pub fn get(&self, route: &str, data: Option<&Map<String, Value>>) -> Result<ApiResponse> {
        let empty = Map::new();
        let payload = data.unwrap_or(&empty);
        let key = sign::cache_key(payload)?;

        if let Some(cache) = self.request_cache() {
            if let Some(body) = cache.lookup(&key) {
                debug!(route, %key, "cache hit");
                return Ok(ApiResponse::from_cache_hit(body));
            }
            debug!(route, %key, "cache miss");
        }

        let request = match data {
            // Bare retrievals carry no payload and need no signature.
            None => self.request(Method::Get, route, None),
            Some(payload) => {
                let body = self.signed_body(payload)?;
                self.request(Method::Post, route, Some(body))
            }
        };

        let response = self.dispatch(request)?;

        if response.is_success() {
            if let Some(cache) = self.request_cache() {
                if let Err(err) = cache.store(&key, response.bytes()) {
                    // Cache trouble never fails the request.
                    warn!(%key, error = %err, "failed to store response in cache");
                }
            }
        }
        Ok(response)
    }

    /// Send an authenticated PUT with the signed payload as body.
    /// Mutations are never cached, even on success.
    pub fn put(&self, route: &str, data: &Map<String, Value>) -> Result<ApiResponse> {
        let body = self.signed_body(data)?;
        self.dispatch(self.request(Method::Put, route, Some(body)))
    }

    /// Send an authenticated DELETE.
    ///
    /// When the route addresses a cache-management resource (a `cache` path
    /// segment) and caching is enabled, a successful delete also purges the
    /// local store so it cannot replay bodies the server has discarded.
    pub fn delete(&self, route: &str, data: Option<&Map<String, Value>>) -> Result<ApiResponse> {
        let request = match data {
            None => self.request(Method::Delete, route, None),
            Some(payload) => {
                let body = self.signed_body(payload)?;
                self.request(Method::Delete, route, Some(body))
            }
        };

        let response = self.dispatch(request)?;

        if response.is_success() && is_cache_route(route) {
            if let Some(cache) = self.request_cache() {
                let removed = cache.clear();
                debug!(route, removed, "purged local cache after remote cache delete");
            }
        }
        Ok(response)
    }

    /// Remove all persisted cache entries. Returns the number removed; zero
    /// when the cache directory does not exist.
    pub fn clear_cache(&self) -> usize {
        self.cache.as_ref().map(ResponseCache::clear).unwrap_or(0)
    }

    /// Fresh statistics for the cache directory: path, entry count, and
    /// total byte size. Zeroed when the directory is absent.
    pub fn cache_info(&self) -> CacheInfo {
        match &self.cache {
            Some(cache) => cache.stats(),
            None => CacheInfo {
                directory: PathBuf::new(),
                entries: 0,
                total_bytes: 0,
            },
        }
    }

    /// Cache handle for request-path reads and writes. `clear_cache` and
    /// `cache_info` intentionally bypass this so they work on persisted
    /// entries even when `use_cache` is off.
    fn request_cache(&self) -> Option<&ResponseCache> {
        if self.use_cache {
            self.cache.as_ref()
        } else {
            None
        }
    }

    /// Copy the payload and inject its signature under the `"signature"` key.
    /// The signature is computed over the payload without that key.
    fn signed_body(&self, payload: &Map<String, Value>) -> Result<Value> {
        let signature = sign::signature(&self.token, payload)?;
        let mut body = payload.clone();
        body.insert("signature".to_string(), Value::String(signature));
        Ok(Value::Object(body))
    }

    fn request(&self, method: Method, route: &str, body: Option<Value>) -> RequestDescriptor {
        let mut headers = vec![
            ("Authorization".to_string(), format!("Bearer {}", self.token)),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        RequestDescriptor {
            method,
            url: format!("{}{}", self.base_url, route),
            headers,
            body,
        }
    }

    fn dispatch(&self, request: RequestDescriptor) -> Result<ApiResponse> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let raw: RawResponse = self.transport.send(&request)?;
        Ok(ApiResponse::from_transport(raw))
    }
}

/// Routes with a `cache` path segment manage the server-side cache; deleting
/// one invalidates our local mirror of it too.
fn is_cache_route(route: &str) -> bool {
    route.split('/').any(|segment| segment == "cache")
}

fn resolve_token(config: &ClientConfig) -> Result<String> {
    if let Some(token) = config.token.as_deref() {
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }
    if let Some(id) = config.credential_id.as_deref() {
        let loaded = match config.credentials_dir.as_deref() {
            Some(dir) => credentials::load_credentials_from(dir, id),
            None => credentials::load_credentials(id),
        };
        if let Some(token) = loaded {
            return Ok(token);
        }
    }
    std::env::var(TOKEN_ENV)
        .ok()
        .filter(|token| !token.is_empty())
        .ok_or(EconopsError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cache_route() {
        assert!(is_cache_route("/cache"));
        assert!(is_cache_route("/admin/cache/entries"));
        assert!(!is_cache_route("/compute/pca"));
        assert!(!is_cache_route("/cached/reports"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = Client::new(ClientConfig {
            token: Some("test_token".to_string()),
            base_url: "https://custom.example.com/".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();

        assert_eq!(client.base_url(), "https://custom.example.com");
    }

    #[test]
    fn test_default_base_url() {
        let client = Client::new(ClientConfig {
            token: Some("test_token".to_string()),
            ..ClientConfig::default()
        })
        .unwrap();

        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let result = Client::new(ClientConfig {
            token: Some("bad\ntoken".to_string()),
            ..ClientConfig::default()
        });

        assert!(matches!(result, Err(EconopsError::InvalidHeader(_))));
    }
}
