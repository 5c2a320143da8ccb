//! Small curl-like command line client built on the curlew library

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use curlew::{Form, HeaderMap, HttpClient};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Issue a single HTTP request and print the response
#[derive(Parser)]
#[command(name = "curlew")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Request URL
    url: String,
    /// Request method (GET or POST)
    #[arg(short = 'X', long = "request", default_value = "GET")]
    method: String,
    /// Request header, as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,
    /// Request body (requires -X POST)
    #[arg(short = 'd', long = "data")]
    data: Option<String>,
    /// Multipart text part, as "name=value" (repeatable, implies POST)
    #[arg(short = 'F', long = "form")]
    form: Vec<String>,
    /// Multipart file part, as "name=path" (repeatable, implies POST)
    #[arg(long = "form-file")]
    form_files: Vec<String>,
    /// Accept invalid TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,
    /// Connection timeout in milliseconds
    #[arg(long, default_value_t = 2000)]
    connect_timeout: u64,
    /// Whole-transfer timeout in milliseconds
    #[arg(long = "max-time", default_value_t = 5000)]
    max_time: u64,
    /// Client certificate path
    #[arg(long)]
    cert: Option<PathBuf>,
    /// Client key path
    #[arg(long)]
    key: Option<PathBuf>,
    /// Client key passphrase
    #[arg(long)]
    key_pass: Option<String>,
    /// Print response status and headers before the body
    #[arg(short = 'i', long)]
    include: bool,
    /// Logging level
    #[arg(short, long, default_value = "error")]
    log_level: Level,
}

fn parse_headers(raw: &[String]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for line in raw {
        let (name, value) = line
            .split_once(':')
            .with_context(|| format!("invalid header (expected \"Name: value\"): {line}"))?;
        headers.insert(name.trim(), value.trim());
    }
    Ok(headers)
}

fn parse_form(fields: &[String], files: &[String]) -> Result<Form> {
    let mut form = Form::new();
    for field in fields {
        let (name, value) = field
            .split_once('=')
            .with_context(|| format!("invalid form field (expected name=value): {field}"))?;
        form = form.text(name, value);
    }
    for file in files {
        let (name, path) = file
            .split_once('=')
            .with_context(|| format!("invalid form file (expected name=path): {file}"))?;
        form = form.file(name, path);
    }
    Ok(form)
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    let env_filter = EnvFilter::new(args.log_level.to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut builder = HttpClient::builder()
        .connect_timeout(Duration::from_millis(args.connect_timeout))
        .timeout(Duration::from_millis(args.max_time))
        .danger_accept_invalid_certs(args.insecure);
    if let Some(cert) = &args.cert {
        builder = builder.client_certificate(cert);
    }
    if let Some(key) = &args.key {
        builder = builder.client_key(key);
    }
    if let Some(pass) = &args.key_pass {
        builder = builder.key_password(pass);
    }
    let client = builder.build()?;

    let headers = parse_headers(&args.headers)?;
    let multipart = !args.form.is_empty() || !args.form_files.is_empty();

    let response = if multipart {
        let form = parse_form(&args.form, &args.form_files)?;
        client.post_multipart(&args.url, form, &headers)?
    } else {
        match args.method.to_ascii_uppercase().as_str() {
            "POST" => client.post(&args.url, args.data.as_deref().unwrap_or(""), &headers)?,
            "GET" if args.data.is_some() => {
                bail!("a request body requires -X POST")
            }
            "GET" => client.get(&args.url, &headers)?,
            other => bail!("unsupported method: {other}"),
        }
    };

    tracing::debug!(status = response.status(), "request complete");

    if args.include {
        println!("HTTP {}", response.status());
        for (name, value) in response.headers().iter() {
            println!("{name}: {value}");
        }
        println!();
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(response.bytes())?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let raw = vec!["Accept: application/json".to_string(), "X-Empty:".to_string()];
        let headers = parse_headers(&raw).expect("valid headers");
        assert_eq!(headers.get("Accept"), Some("application/json"));
        assert_eq!(headers.get("X-Empty"), Some(""));
    }

    #[test]
    fn test_parse_headers_rejects_missing_colon() {
        let raw = vec!["not-a-header".to_string()];
        assert!(parse_headers(&raw).is_err());
    }

    #[test]
    fn test_parse_form_parts() {
        let fields = vec!["name=value".to_string()];
        let files = vec!["upload=/tmp/file.bin".to_string()];
        let form = parse_form(&fields, &files).expect("valid form");
        assert_eq!(form.len(), 2);
    }

}
