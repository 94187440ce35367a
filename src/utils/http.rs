//! HTTP client utilities for bbget

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Error fetching a JSON resource
///
/// `Transport` and `Status` cover the download side (network failure,
/// timeout, non-2xx response); `Decode` covers a response body that is not
/// the JSON shape the caller expected.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to send GET request to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("Failed to parse JSON response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fetch a JSON resource, optionally preferring a cached copy
///
/// This is the seam between repository providers and the network: providers
/// only ever consume this trait, so they can be exercised against canned
/// responses.
pub trait FetchJson {
    /// Fetch the resource at `url` and return its decoded JSON body
    ///
    /// With `prefer_cached`, a previously fetched copy may be returned
    /// instead of issuing a new request.
    fn fetch_value(&self, url: &str, prefer_cached: bool) -> Result<Value, FetchError>;

    /// Fetch the resource at `url` and decode it into a typed structure
    ///
    /// Missing or mistyped keys surface as a `Decode` error.
    fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        prefer_cached: bool,
    ) -> Result<T, FetchError> {
        let value = self.fetch_value(url, prefer_cached)?;
        serde_json::from_value(value).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// HTTP client wrapper
///
/// Keeps an in-memory cache of successful responses, consulted only when a
/// caller asks for a cached copy.
pub struct HttpClient {
    client: Client,
    cache: Mutex<HashMap<String, Value>>,
}

impl HttpClient {
    /// Create a new HTTP client with default timeout (30 seconds)
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("bbget/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            cache: Mutex::new(HashMap::new()),
        })
    }
}

impl FetchJson for HttpClient {
    fn fetch_value(&self, url: &str, prefer_cached: bool) -> Result<Value, FetchError> {
        if prefer_cached {
            if let Some(value) = self.cache.lock().unwrap().get(url) {
                log::debug!("GET {} (cached)", url);
                return Ok(value.clone());
            }
        }

        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        let value: Value = serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })?;

        self.cache
            .lock()
            .unwrap()
            .insert(url.to_string(), value.clone());

        Ok(value)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create HTTP client")
    }
}
