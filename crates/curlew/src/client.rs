//! HTTP client and builder

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backends::{CurlTransport, Transport};
use crate::error::HttpError;
use crate::headers::HeaderMap;
use crate::multipart::Form;
use crate::request::{Method, RequestBuilder};
use crate::response::Response;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client configuration, immutable once the client is built.
///
/// Timeouts apply per client instance, not per call. TLS verification is on
/// by default; [`HttpClientBuilder::danger_accept_invalid_certs`] is the
/// explicit opt-out.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    connect_timeout: Duration,
    timeout: Duration,
    accept_invalid_certs: bool,
    cert_path: Option<PathBuf>,
    key_path: Option<PathBuf>,
    key_password: Option<String>,
    user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
            cert_path: None,
            key_path: None,
            key_password: None,
            user_agent: concat!("curlew/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Connection establishment timeout
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Whole-transfer timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether invalid TLS certificates are accepted
    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Client certificate path, if configured
    pub fn cert_path(&self) -> Option<&Path> {
        self.cert_path.as_deref()
    }

    /// Client key path, if configured
    pub fn key_path(&self) -> Option<&Path> {
        self.key_path.as_deref()
    }

    /// Client key passphrase, if configured
    pub fn key_password(&self) -> Option<&str> {
        self.key_password.as_deref()
    }

    /// User agent sent with every request
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Synchronous HTTP client.
///
/// Each request blocks the calling thread until the transfer completes or a
/// timeout expires. The client holds no per-request state, so clones and
/// independent instances can issue requests from any number of threads
/// without coordination.
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a client with default settings
    pub fn new() -> Self {
        Self {
            config: Arc::new(ClientConfig::default()),
            transport: Arc::new(CurlTransport::new()),
        }
    }

    /// Create a client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // === Core operations ===

    /// GET request with an empty body
    pub fn get(&self, url: &str, headers: &HeaderMap) -> Result<Response, HttpError> {
        self.request(Method::Get, url).headers(headers).send()
    }

    /// POST request with the given body
    pub fn post(
        &self,
        url: &str,
        body: impl Into<Vec<u8>>,
        headers: &HeaderMap,
    ) -> Result<Response, HttpError> {
        self.request(Method::Post, url)
            .headers(headers)
            .body(body)
            .send()
    }

    /// POST a multipart form built from text and file parts
    pub fn post_multipart(
        &self,
        url: &str,
        form: Form,
        headers: &HeaderMap,
    ) -> Result<Response, HttpError> {
        self.request(Method::Post, url)
            .headers(headers)
            .multipart(form)
            .send()
    }

    /// Request builder for custom headers and bodies
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, method, url)
    }

    // === JSON convenience methods ===

    /// GET request, returns JSON deserialized to R
    pub fn fetch<R>(&self, url: &str) -> Result<R, HttpError>
    where
        R: DeserializeOwned,
    {
        let response = self.request(Method::Get, url).send()?;
        Self::json_checked(response)
    }

    /// POST with a JSON body, returns JSON deserialized to R
    pub fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, HttpError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.request(Method::Post, url).json(body).send()?;
        Self::json_checked(response)
    }

    /// POST with a urlencoded form body, returns JSON deserialized to R
    pub fn post_form<F, R>(&self, url: &str, form: &F) -> Result<R, HttpError>
    where
        F: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.request(Method::Post, url).form(form).send()?;
        Self::json_checked(response)
    }

    fn json_checked<R: DeserializeOwned>(response: Response) -> Result<R, HttpError> {
        if !response.is_success() {
            let message = response.text().unwrap_or_default().to_string();
            return Err(HttpError::Status {
                status: response.status(),
                message,
            });
        }
        response.json()
    }

    pub(crate) fn execute(
        &self,
        request: crate::request::Request,
    ) -> Result<Response, HttpError> {
        self.transport.execute(&self.config, &request)
    }
}

/// HTTP client builder for timeouts and TLS settings
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl HttpClientBuilder {
    /// Set the connection establishment timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the whole-transfer timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Accept invalid TLS certificates.
    ///
    /// Verification is on by default; turning it off accepts expired and
    /// self-signed certificates and should only be done against hosts you
    /// control.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Present a client certificate from the given path
    pub fn client_certificate(mut self, cert: impl Into<PathBuf>) -> Self {
        self.config.cert_path = Some(cert.into());
        self
    }

    /// Use the client key at the given path
    pub fn client_key(mut self, key: impl Into<PathBuf>) -> Self {
        self.config.key_path = Some(key.into());
        self
    }

    /// Passphrase for the client key
    pub fn key_password(mut self, password: impl Into<String>) -> Self {
        self.config.key_password = Some(password.into());
        self
    }

    /// Override the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Use a custom transport instead of libcurl
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the HTTP client
    pub fn build(self) -> Result<HttpClient, HttpError> {
        if self.config.key_path.is_some() && self.config.cert_path.is_none() {
            return Err(HttpError::Init(
                "client key configured without a client certificate".to_string(),
            ));
        }
        if self.config.key_password.is_some() && self.config.key_path.is_none() {
            return Err(HttpError::Init(
                "key passphrase configured without a client key".to_string(),
            ));
        }
        Ok(HttpClient {
            config: Arc::new(self.config),
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(CurlTransport::new())),
        })
    }
}

/// Convenience function for simple GET requests
pub fn fetch<R: DeserializeOwned>(url: &str) -> Result<R, HttpError> {
    HttpClient::new().fetch(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;

    #[test]
    fn test_client_new() {
        let client = HttpClient::new();
        assert_eq!(client.config().connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(client.config().timeout(), DEFAULT_TIMEOUT);
        assert!(!client.config().accepts_invalid_certs());
    }

    #[test]
    fn test_builder_settings() {
        let client = HttpClient::builder()
            .connect_timeout(Duration::from_millis(1500))
            .timeout(Duration::from_millis(9000))
            .danger_accept_invalid_certs(true)
            .user_agent("test-agent/0.1")
            .build()
            .expect("valid configuration");

        assert_eq!(client.config().connect_timeout(), Duration::from_millis(1500));
        assert_eq!(client.config().timeout(), Duration::from_millis(9000));
        assert!(client.config().accepts_invalid_certs());
        assert_eq!(client.config().user_agent(), "test-agent/0.1");
    }

    #[test]
    fn test_builder_client_certificate() {
        let client = HttpClient::builder()
            .client_certificate("/etc/ssl/client.pem")
            .client_key("/etc/ssl/client.key")
            .key_password("hunter2")
            .build()
            .expect("valid configuration");

        assert_eq!(
            client.config().cert_path(),
            Some(Path::new("/etc/ssl/client.pem"))
        );
        assert_eq!(
            client.config().key_path(),
            Some(Path::new("/etc/ssl/client.key"))
        );
        assert_eq!(client.config().key_password(), Some("hunter2"));
    }

    #[test]
    fn test_builder_rejects_key_without_certificate() {
        let result = HttpClient::builder()
            .client_key("/etc/ssl/client.key")
            .build();
        assert!(matches!(result, Err(HttpError::Init(_))));
    }

    #[test]
    fn test_builder_rejects_passphrase_without_key() {
        let result = HttpClient::builder().key_password("hunter2").build();
        assert!(matches!(result, Err(HttpError::Init(_))));
    }

    /// Transport stub that answers every request with a canned response.
    #[derive(Debug)]
    struct StaticTransport {
        status: u16,
        body: &'static [u8],
    }

    impl Transport for StaticTransport {
        fn execute(
            &self,
            _config: &ClientConfig,
            _request: &Request,
        ) -> Result<Response, HttpError> {
            Ok(Response::from_parts(
                self.status,
                self.body.to_vec(),
                HeaderMap::new(),
            ))
        }
    }

    #[test]
    fn test_fetch_deserializes_success() {
        #[derive(serde::Deserialize)]
        struct Body {
            ok: bool,
        }

        let client = HttpClient::builder()
            .transport(Arc::new(StaticTransport {
                status: 200,
                body: br#"{"ok": true}"#,
            }))
            .build()
            .expect("valid configuration");

        let body: Body = client.fetch("http://localhost/").expect("2xx response");
        assert!(body.ok);
    }

    #[test]
    fn test_fetch_maps_non_2xx_to_status_error() {
        let client = HttpClient::builder()
            .transport(Arc::new(StaticTransport {
                status: 404,
                body: b"Not Found",
            }))
            .build()
            .expect("valid configuration");

        let result: Result<serde_json::Value, _> = client.fetch("http://localhost/");
        match result {
            Err(HttpError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected HttpError::Status, got {:?}", other.map(|_| ())),
        }
    }
}
