//! Runtime configuration.
//!
//! Every field has a default matching the live site, so a config file is only
//! needed to point the scraper at a mirror or to tune the HTTP client. Files
//! are YAML:
//!
//! ```yaml
//! today_url: "http://today.deviantart.com/"
//! user_url: "http://{nickname}.deviantart.com"
//! timeout_secs: 10
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// Placeholder replaced by the user's nickname in [`Config::user_url`].
pub const NICKNAME_PLACEHOLDER: &str = "{nickname}";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// The site-wide "today" statistics page.
    pub today_url: String,
    /// The daily deviations list.
    pub daily_deviations_url: String,
    /// News host; section paths are appended to it.
    pub news_url: String,
    /// User home page template containing `{nickname}`.
    pub user_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            today_url: "http://today.deviantart.com/".to_string(),
            daily_deviations_url: "http://today.deviantart.com/dds/".to_string(),
            news_url: "http://news.deviantart.com".to_string(),
            user_url: "http://{nickname}.deviantart.com".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load a YAML config file. Missing keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&raw)?;
        info!("Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or the file at `path` when one is given.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.user_url.contains(NICKNAME_PLACEHOLDER) {
            return Err(Error::Config(format!(
                "user_url `{}` must contain {NICKNAME_PLACEHOLDER}",
                self.user_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Home page URL for a user, after validating the nickname.
    pub fn user_base_url(&self, nickname: &str) -> Result<String> {
        let nickname = validate_nickname(nickname)?;
        Ok(self.user_url.replace(NICKNAME_PLACEHOLDER, nickname))
    }
}

/// Nicknames become part of a host name: they must be non-empty and free of
/// whitespace and `/`.
pub fn validate_nickname(nickname: &str) -> Result<&str> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidParameter {
            name: "nickname",
            reason: "must not be empty".to_string(),
        });
    }
    if trimmed.contains(|c: char| c.is_whitespace() || c == '/') {
        return Err(Error::InvalidParameter {
            name: "nickname",
            reason: format!("`{trimmed}` contains whitespace or `/`"),
        });
    }
    Ok(trimmed)
}
