//! Transport backends
//!
//! The client talks to the network through the [`Transport`] trait. One
//! concrete implementation exists, [`CurlTransport`], bound to libcurl; the
//! seam is what the tests stub out.

mod curl_backend;

use std::fmt;

pub use curl_backend::CurlTransport;

use crate::client::ClientConfig;
use crate::error::HttpError;
use crate::request::Request;
use crate::response::Response;

/// A synchronous HTTP transport.
///
/// `execute` blocks the calling thread for the duration of the transfer,
/// bounded by the timeouts in `config`. Implementations must be safe to
/// call from multiple threads at once.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Perform the request and collect the complete response
    fn execute(&self, config: &ClientConfig, request: &Request) -> Result<Response, HttpError>;
}
