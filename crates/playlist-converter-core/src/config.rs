//! Client configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::DEFAULT_BASE_URL;
use crate::error::{Error, Result};
use crate::session::AuthCookie;

/// Default session polling interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

/// Theme setting for the application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (default).
    #[default]
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Label of the toggle button, naming the theme it switches to.
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "Switch to Light Theme",
            Self::Light => "Switch to Dark Theme",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_spotify_login_path() -> String {
    "/spotify/login".to_string()
}

fn default_youtube_login_path() -> String {
    "/youtube/auth".to_string()
}

const fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Front-end configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the conversion backend.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Path (or absolute URL) starting the Spotify login flow.
    #[serde(default = "default_spotify_login_path")]
    pub spotify_login_path: String,
    /// Path (or absolute URL) starting the YouTube login flow.
    #[serde(default = "default_youtube_login_path")]
    pub youtube_login_path: String,
    /// Session polling interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Initial theme.
    #[serde(default)]
    pub theme: Theme,
    /// Log filter directive, e.g. `info` or `playlist_converter_core=debug`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            spotify_login_path: default_spotify_login_path(),
            youtube_login_path: default_youtube_login_path(),
            poll_interval_ms: default_poll_interval_ms(),
            theme: Theme::default(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        debug!("Loaded config: api_base_url={}", config.api_base_url);
        Ok(config)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            Error::Configuration(format!("Invalid api_base_url {}: {e}", self.api_base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "api_base_url must be http(s), got {}",
                url.scheme()
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Configuration(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Session polling interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Login entry point for a platform, as configured.
    #[must_use]
    pub fn login_path(&self, cookie: AuthCookie) -> &str {
        match cookie {
            AuthCookie::Spotify => &self.spotify_login_path,
            AuthCookie::YouTube => &self.youtube_login_path,
        }
    }

    /// Login entry point resolved against `origin` (the page's own origin).
    pub fn login_url(&self, cookie: AuthCookie, origin: &str) -> Result<Url> {
        let base =
            Url::parse(origin).map_err(|e| Error::InvalidUrl(format!("{origin}: {e}")))?;
        let path = self.login_path(cookie);
        base.join(path)
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))
    }
}
