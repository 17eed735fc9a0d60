//! Page fetching.
//!
//! The extraction engine only ever sees a parsed tree. Getting the bytes is
//! the job of a [`FetchPage`] implementation: [`HttpFetcher`] in production,
//! a canned page in tests. URLs are validated before any connection is made.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://[a-z0-9]+([\-.][a-z0-9]+)*\.[a-z]{2,5}(:[0-9]{1,5})?(/.*)?$")
        .expect("static URL pattern compiles")
});

/// Reject anything that is not an absolute http(s) URL with a dotted host.
///
/// An explicit port is allowed; the empty string is not.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] carrying the rejected text.
pub fn validate_url(url: &str) -> Result<()> {
    if URL_PATTERN.is_match(url) && url::Url::parse(url).is_ok() {
        Ok(())
    } else {
        Err(Error::InvalidUrl(url.to_string()))
    }
}

/// Source of raw page markup.
pub trait FetchPage {
    /// Download the page at `url` and return its body.
    ///
    /// # Errors
    ///
    /// Implementations return [`Error::InvalidUrl`] before connecting when
    /// `url` is malformed, and [`Error::UnableToConnect`] when the page
    /// cannot be retrieved.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`FetchPage`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the configured user agent and request timeout.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies `user_agent` and `timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the TLS backend or client cannot be
    /// initialised.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String> {
        validate_url(url)?;
        let t0 = Instant::now();
        let unable = |e: reqwest::Error| Error::UnableToConnect {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(unable)?;
        let status = response.status();
        let response = response.error_for_status().map_err(|e| {
            warn!(%status, "Server refused page");
            unable(e)
        })?;
        let body = response.text().await.map_err(unable)?;

        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            preview = %truncate_for_log(&body, 120),
            "Fetched page"
        );
        Ok(body)
    }
}
