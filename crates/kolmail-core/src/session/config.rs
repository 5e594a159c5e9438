//! Session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Default game server.
pub const DEFAULT_BASE_URL: &str = "https://www.kingdomofloathing.com/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`HttpSession`](super::HttpSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Server root all request paths are joined to.
    pub base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Password hash filled into `pwd` fields.
    pub password_hash: Option<String>,
    /// Raw `Cookie` header of an already logged-in session.
    pub cookie: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("kolmail/", env!("CARGO_PKG_VERSION")).to_string(),
            password_hash: None,
            cookie: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SessionConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads `KOLMAIL_BASE_URL`, `KOLMAIL_PWD`, `KOLMAIL_COOKIE` and
    /// `KOLMAIL_TIMEOUT_SECS` from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(base_url) = lookup("KOLMAIL_BASE_URL") {
            config.base_url = base_url;
        }
        config.password_hash = lookup("KOLMAIL_PWD").or(config.password_hash);
        config.cookie = lookup("KOLMAIL_COOKIE").or(config.cookie);
        if let Some(timeout) = lookup("KOLMAIL_TIMEOUT_SECS") {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::Config(format!("KOLMAIL_TIMEOUT_SECS is not a number: {timeout}"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Sets the server root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the password hash.
    #[must_use]
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Sets the session cookie.
    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an http(s) URL or the
    /// timeout is zero.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base URL must be http or https: {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout must be positive".into()));
        }
        Ok(())
    }

    /// Returns the base URL with a trailing slash, ready for joining.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
