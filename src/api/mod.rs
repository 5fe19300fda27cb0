// API module.
// Client, transport seam, and response wrapper for the EconOps API.

pub mod client;
pub mod response;
pub mod transport;

pub use client::{Client, ClientConfig, DEFAULT_BASE_URL};
pub use response::ApiResponse;
pub use transport::{HttpTransport, Method, RawResponse, RequestDescriptor, Transport};
