// HTTP transport seam.
// The client builds request descriptors; a transport turns one into a raw
// response. The default transport is a blocking reqwest client, but tests
// and callers wanting timeouts or proxies can inject their own.

use reqwest::blocking;
use serde_json::Value;

use crate::error::Result;

/// HTTP methods the client dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A fully assembled request, ready for a transport to send.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body, already carrying the injected signature when signed.
    pub body: Option<Value>,
}

/// What comes back from the wire. Non-2xx statuses are data here, not errors.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Synchronous request dispatch. Implementations only fail on transport-level
/// problems (connection refused, DNS); HTTP error statuses pass through as
/// responses.
pub trait Transport {
    fn send(&self, request: &RequestDescriptor) -> Result<RawResponse>;
}

/// Default transport backed by a blocking reqwest client.
pub struct HttpTransport {
    client: blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = blocking::Client::builder().build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &RequestDescriptor) -> Result<RawResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes()?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
