// API response wrapper.
// Uniform view over a live transport response or a synthesized cache hit.

use serde::de::DeserializeOwned;
use std::borrow::Cow;

use crate::api::transport::RawResponse;
use crate::error::Result;

/// A response from the API, either fresh from the transport or replayed from
/// the local cache. Non-success statuses are carried here rather than raised;
/// callers inspect `status()` themselves.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    from_cache: bool,
}

impl ApiResponse {
    pub(crate) fn from_transport(raw: RawResponse) -> Self {
        Self {
            status: raw.status,
            headers: raw.headers,
            body: raw.body,
            from_cache: false,
        }
    }

    /// Synthesize a response from a cached body. Cached entries only ever
    /// hold successful bodies, so the status is 200 and headers are empty.
    pub(crate) fn from_cache_hit(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body,
            from_cache: true,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Response headers as received (empty for cache hits).
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value matching a name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Body parsed as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Whether this response was served from the local cache.
    pub fn from_cache(&self) -> bool {
        self.from_cache
    }
}
