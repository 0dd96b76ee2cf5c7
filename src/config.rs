//! Client configuration.
//!
//! Built once at the composition root and handed to the HTTP adapter.
//! Nothing below this module reads the environment.

use std::time::Duration;

use crate::{CardioError, Result};

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

const API_URL_ENV: &str = "CARDIOGUARD_API_URL";
const TIMEOUT_ENV: &str = "CARDIOGUARD_HTTP_TIMEOUT_SECS";

/// Where the prediction backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `CARDIOGUARD_API_URL` and
    /// `CARDIOGUARD_HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// Returns error if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    /// Returns error if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(&url)?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| {
                    CardioError::Config(format!(
                        "{TIMEOUT_ENV} must be a positive number of seconds, got {raw:?}"
                    ))
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Replace the base URL.
    ///
    /// # Errors
    /// Returns error unless the URL starts with `http://` or `https://`.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let url = url.trim();
        let has_host = ["http://", "https://"]
            .iter()
            .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
        if !has_host {
            return Err(CardioError::Config(format!(
                "API URL must start with http:// or https://, got {url:?}"
            )));
        }

        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/predict`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).expect("defaults");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.endpoint("/api/predict"), "http://localhost:8000/api/predict");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_URL_ENV, "https://cardio.example.org/"),
            (TIMEOUT_ENV, "30"),
        ]))
        .expect("overrides");
        assert_eq!(config.base_url(), "https://cardio.example.org");
        assert_eq!(
            config.endpoint("api/health"),
            "https://cardio.example.org/api/health"
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_blank_url_falls_back_to_default() {
        let config = ClientConfig::from_lookup(lookup_from(&[(API_URL_ENV, "  ")])).expect("blank");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ClientConfig::from_lookup(lookup_from(&[(API_URL_ENV, "localhost:8000")])).is_err());
        assert!(ClientConfig::from_lookup(lookup_from(&[(API_URL_ENV, "http://")])).is_err());
        assert!(ClientConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "0")])).is_err());
        assert!(ClientConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")])).is_err());
    }

    #[test]
    fn test_errors_name_the_setting() {
        let err = ClientConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")]))
            .expect_err("bad timeout");
        let CardioError::Config(message) = &err;
        assert!(message.starts_with(TIMEOUT_ENV));
        assert!(err.to_string().starts_with("Invalid configuration: "));
    }
}
