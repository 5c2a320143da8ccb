//! HTTP error types

use thiserror::Error;

/// Errors surfaced by the HTTP client.
///
/// Transport failures are classified from the libcurl error code into
/// [`HttpError::Timeout`], [`HttpError::Connection`], [`HttpError::Tls`] or
/// the catch-all [`HttpError::Transfer`]. There is no retry and no partial
/// result; the caller decides whether to retry.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The transport handle could not be created or configured
    #[error("transport initialization failed: {0}")]
    Init(String),
    /// The configured connect or response timeout expired
    #[error("request timed out")]
    Timeout,
    /// DNS resolution or TCP connection failure
    #[error("connection error: {0}")]
    Connection(String),
    /// TLS handshake or certificate verification failure
    #[error("TLS error: {0}")]
    Tls(String),
    /// Any other transfer failure, carrying libcurl's diagnostic
    #[error("transfer error: {0}")]
    Transfer(String),
    /// The URL failed validation before the transport was touched
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Non-2xx status in a path that deserializes the response
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read as text
        message: String,
    },
    /// Request body serialization or response body decoding failure
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Multipart form construction failure
    #[error("multipart form error: {0}")]
    Multipart(String),
}

impl From<curl::Error> for HttpError {
    fn from(err: curl::Error) -> Self {
        if err.is_operation_timedout() {
            HttpError::Timeout
        } else if err.is_couldnt_resolve_host() || err.is_couldnt_connect() {
            HttpError::Connection(err.to_string())
        } else if err.is_ssl_connect_error()
            || err.is_peer_failed_verification()
            || err.is_ssl_certproblem()
            || err.is_ssl_cipher()
        {
            HttpError::Tls(err.to_string())
        } else if err.is_failed_init() {
            HttpError::Init(err.to_string())
        } else {
            HttpError::Transfer(err.to_string())
        }
    }
}

impl From<curl::FormError> for HttpError {
    fn from(err: curl::FormError) -> Self {
        HttpError::Multipart(err.to_string())
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_display() {
        let error = HttpError::Init("out of memory".to_string());
        assert_eq!(
            format!("{}", error),
            "transport initialization failed: out of memory"
        );
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(format!("{}", HttpError::Timeout), "request timed out");
    }

    #[test]
    fn test_connection_display() {
        let error = HttpError::Connection("connection refused".to_string());
        assert_eq!(format!("{}", error), "connection error: connection refused");
    }

    #[test]
    fn test_status_display() {
        let error = HttpError::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(format!("{}", error), "HTTP error (404): Not Found");
    }

    #[test]
    fn test_from_serde_json_error() {
        let result: Result<String, _> = serde_json::from_str("not valid json");
        let json_error = result.expect_err("invalid JSON should produce an error");
        let http_error: HttpError = json_error.into();

        match http_error {
            HttpError::Serialization(msg) => {
                assert!(msg.contains("expected"), "message should describe the JSON error");
            }
            _ => panic!("expected HttpError::Serialization"),
        }
    }

    #[test]
    fn test_from_invalid_url() {
        let parse_error = url::Url::parse("not a url").expect_err("should fail");
        let http_error: HttpError = parse_error.into();
        assert!(matches!(http_error, HttpError::InvalidUrl(_)));
    }
}
