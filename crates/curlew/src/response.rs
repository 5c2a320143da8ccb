//! HTTP response type

use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::headers::HeaderMap;

/// A completed HTTP response: status code, raw body and parsed headers.
///
/// A `Response` only exists once the transfer finished; a failed transfer
/// yields an [`HttpError`] and no partial response.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    body: Vec<u8>,
    headers: HeaderMap,
}

impl Response {
    pub(crate) fn new(status: u16, body: Vec<u8>, headers: HeaderMap) -> Self {
        Self {
            status,
            body,
            headers,
        }
    }

    /// Assemble a response from its parts.
    ///
    /// Mainly useful for custom [`Transport`](crate::Transport)
    /// implementations and test doubles.
    pub fn from_parts(status: u16, body: Vec<u8>, headers: HeaderMap) -> Self {
        Self::new(status, body, headers)
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Get the parsed response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the response body as bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Consume the response, returning the body
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    /// Get the response body as text
    pub fn text(&self) -> Result<&str, HttpError> {
        std::str::from_utf8(&self.body)
            .map_err(|_| HttpError::Serialization("response body is not valid UTF-8".to_string()))
    }

    /// Deserialize the response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(HttpError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &[u8]) -> Response {
        Response::new(status, body.to_vec(), HeaderMap::new())
    }

    #[test]
    fn test_status_predicates() {
        assert!(response(200, b"").is_success());
        assert!(response(299, b"").is_success());
        assert!(!response(300, b"").is_success());
        assert!(!response(301, b"").is_client_error());
        assert!(response(404, b"").is_client_error());
        assert!(!response(499, b"").is_server_error());
        assert!(response(500, b"").is_server_error());
        assert!(response(599, b"").is_server_error());
    }

    #[test]
    fn test_text_rejects_invalid_utf8() {
        let res = response(200, &[0xff, 0xfe]);
        assert!(matches!(res.text(), Err(HttpError::Serialization(_))));
    }

    #[test]
    fn test_json_body() {
        #[derive(serde::Deserialize)]
        struct Body {
            ok: bool,
        }

        let res = response(200, br#"{"ok": true}"#);
        let body: Body = res.json().expect("valid JSON body");
        assert!(body.ok);
    }
}
