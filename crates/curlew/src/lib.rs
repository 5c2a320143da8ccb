//! Synchronous HTTP client built on libcurl
//!
//! This crate wraps libcurl (through the `curl` crate) behind a small
//! blocking client: configure timeouts and TLS once per client, then issue
//! `get`/`post`/`post_multipart` requests that return the status code, raw
//! body and a parsed header map. Transport failures surface as a single
//! typed error.
//!
//! TLS certificate verification is on by default;
//! [`HttpClientBuilder::danger_accept_invalid_certs`] is the explicit
//! opt-out.
//!
//! # Example
//!
//! ```no_run
//! use curlew::{HeaderMap, HttpClient};
//!
//! fn example() -> Result<(), curlew::HttpError> {
//!     let client = HttpClient::new();
//!     let mut headers = HeaderMap::new();
//!     headers.insert("Accept", "application/json");
//!
//!     let response = client.get("https://example.com/data", &headers)?;
//!     println!("{}: {} bytes", response.status(), response.bytes().len());
//!     Ok(())
//! }
//! ```

mod backends;
mod client;
mod error;
mod headers;
mod multipart;
mod request;
mod response;

pub use backends::{CurlTransport, Transport};
pub use client::{fetch, ClientConfig, HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use headers::HeaderMap;
pub use multipart::Form;
pub use request::{Method, Request, RequestBuilder};
pub use response::Response;
