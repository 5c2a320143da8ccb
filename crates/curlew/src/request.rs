//! HTTP request types and builder

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::headers::HeaderMap;
use crate::multipart::Form;
use crate::response::Response;

/// HTTP request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request with an empty body
    Get,
    /// POST request carrying a body
    Post,
}

impl Method {
    /// The method name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled request, ready for the transport.
///
/// The URL has been validated and the body, if any, is already encoded.
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<Vec<u8>>,
    pub(crate) form: Option<Form>,
}

impl Request {
    /// Request method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Validated request URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request body, if one was set
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Multipart form, if one was set
    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }
}

/// Builder for requests that need custom headers or bodies.
///
/// Serialization failures are deferred and surface when [`send`] is called,
/// so the builder methods stay chainable.
///
/// [`send`]: RequestBuilder::send
pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    form: Option<Form>,
    error: Option<HttpError>,
}

impl fmt::Debug for RequestBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(client: &'a HttpClient, method: Method, url: &str) -> Self {
        Self {
            client,
            method,
            url: url.to_string(),
            headers: HeaderMap::new(),
            body: None,
            form: None,
            error: None,
        }
    }

    /// Add a request header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add all headers from the given map
    pub fn headers(mut self, headers: &HeaderMap) -> Self {
        for (name, value) in headers.iter() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set a raw request body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `body` as JSON and set the content type
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(encoded) => {
                self.body = Some(encoded);
                self.headers.insert("Content-Type", "application/json");
            }
            Err(e) => self.error = Some(HttpError::from(e)),
        }
        self
    }

    /// Serialize `body` as a urlencoded form and set the content type
    pub fn form<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_urlencoded::to_string(body) {
            Ok(encoded) => {
                self.body = Some(encoded.into_bytes());
                self.headers
                    .insert("Content-Type", "application/x-www-form-urlencoded");
            }
            Err(e) => self.error = Some(HttpError::Serialization(e.to_string())),
        }
        self
    }

    /// Attach a multipart form as the request body
    pub fn multipart(mut self, form: Form) -> Self {
        self.form = Some(form);
        self
    }

    /// Validate the URL and execute the request on the client's transport
    pub fn send(self) -> Result<Response, HttpError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let url = Url::parse(&self.url)?;
        let request = Request {
            method: self.method,
            url,
            headers: self.headers,
            body: self.body,
            form: self.form,
        };
        self.client.execute(request)
    }
}
