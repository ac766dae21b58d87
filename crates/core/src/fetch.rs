//! Content fetching from URLs, files, and stdin.
//!
//! This module provides functions for retrieving HTML content from
//! the data source over HTTP, or from local files and standard input when
//! working with saved pages.

use std::fs;
use std::path::PathBuf;

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{Result, VitisError};

/// HTTP client configuration for fetching pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: format!("Mozilla/5.0 (compatible; Vitis/{})", env!("CARGO_PKG_VERSION")) }
    }
}

/// Fetches HTML content from a URL.
///
/// Performs a single HTTP GET and returns the response body as text. There
/// is no retry. Non-success statuses are errors, and a body that cannot be
/// decoded is reported as [`VitisError::InvalidEncoding`].
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &Url, config: &FetchConfig) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(VitisError::HttpError)?;

    let response = client
        .get(url.clone())
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() { VitisError::Timeout { timeout: config.timeout } } else { VitisError::HttpError(e) }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(VitisError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    response.text().await.map_err(|e| {
        if e.is_timeout() {
            VitisError::Timeout { timeout: config.timeout }
        } else if e.is_decode() {
            VitisError::InvalidEncoding
        } else {
            VitisError::HttpError(e)
        }
    })
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(VitisError::FileNotFound(path_buf))
    } else {
        let bytes = fs::read(&path_buf)?;
        String::from_utf8(bytes).map_err(|_| VitisError::InvalidEncoding)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    String::from_utf8(buffer).map_err(|_| VitisError::InvalidEncoding)
}
