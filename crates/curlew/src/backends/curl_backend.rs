//! libcurl-based transport

use std::sync::Once;

use curl::easy::{Easy, List, SslVersion};

use crate::client::ClientConfig;
use crate::error::HttpError;
use crate::headers::HeaderMap;
use crate::request::{Method, Request};
use crate::response::Response;

use super::Transport;

static CURL_INIT: Once = Once::new();

/// Initialize libcurl's process-wide state exactly once, before the first
/// handle is created. libcurl tears the state down at process exit; it must
/// not be tied to the number of live clients.
fn ensure_global_init() {
    CURL_INIT.call_once(curl::init);
}

/// Transport bound to libcurl.
///
/// Each call to [`Transport::execute`] uses a fresh easy handle, so the
/// transport itself carries no state and concurrent requests do not
/// interfere with each other.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurlTransport;

impl CurlTransport {
    /// Create a libcurl transport
    pub fn new() -> Self {
        Self
    }

    fn configure(easy: &mut Easy, config: &ClientConfig) -> Result<(), HttpError> {
        easy.useragent(config.user_agent())?;
        easy.connect_timeout(config.connect_timeout())?;
        easy.timeout(config.timeout())?;
        easy.ssl_version(SslVersion::Tlsv12)?;
        easy.ssl_verify_peer(!config.accepts_invalid_certs())?;
        easy.ssl_verify_host(!config.accepts_invalid_certs())?;
        if let Some(cert) = config.cert_path() {
            easy.ssl_cert(cert)?;
        }
        if let Some(key) = config.key_path() {
            easy.ssl_key(key)?;
        }
        if let Some(pass) = config.key_password() {
            easy.key_password(pass)?;
        }
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn execute(&self, config: &ClientConfig, request: &Request) -> Result<Response, HttpError> {
        ensure_global_init();

        let mut easy = Easy::new();
        easy.url(request.url.as_str())?;
        Self::configure(&mut easy, config)?;

        match request.method {
            Method::Get => easy.get(true)?,
            Method::Post => {
                if let Some(form) = &request.form {
                    easy.httppost(form.to_curl_form()?)?;
                } else {
                    // Setting the post fields implies POST and the right
                    // content length, including for an empty body.
                    easy.post_fields_copy(request.body.as_deref().unwrap_or_default())?;
                }
            }
        }

        let mut list = List::new();
        for (name, value) in request.headers.iter() {
            // libcurl treats "Name:" as removing a header; "Name;" is its
            // syntax for sending one with an empty value.
            if value.is_empty() {
                list.append(&format!("{name};"))?;
            } else {
                list.append(&format!("{name}: {value}"))?;
            }
        }
        easy.http_headers(list)?;

        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let mut body = Vec::new();
        let mut headers = HeaderMap::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.header_function(|line| {
                // Header lines are ASCII in practice; anything else is
                // dropped along with the status line and blank terminator.
                if let Ok(line) = std::str::from_utf8(line) {
                    headers.insert_raw_line(line);
                }
                true
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()? as u16;
        tracing::debug!(status, body_len = body.len(), "request complete");

        Ok(Response::new(status, body, headers))
    }
}
