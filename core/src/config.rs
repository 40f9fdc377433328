//! Connection settings for a Smocker instance.

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// Smocker serves its admin API on this port unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

pub const BASE_URL_ENV: &str = "SMOCKER_API_URL";
pub const TIMEOUT_ENV: &str = "SMOCKER_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SmockerConfig {
    /// Admin API root, e.g. `http://localhost:8081`.
    pub base_url: String,
    /// Per-call deadline. `None` leaves the transport defaults in place.
    #[serde(with = "millis")]
    pub timeout: Option<Duration>,
}

impl Default for SmockerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl SmockerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `SMOCKER_API_URL` and `SMOCKER_TIMEOUT_MS`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.timeout = Some(Duration::from_millis(ms)),
                Err(_) => warn!(value = %raw, "ignoring invalid {TIMEOUT_ENV}"),
            }
        }
        config
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_admin_port() {
        let config = SmockerConfig::default();
        assert_eq!(config.base_url, "http://localhost:8081");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn env_overrides_defaults() {
        let config = SmockerConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "http://smocker:8081/"),
            (TIMEOUT_ENV, "2500"),
        ]));
        assert_eq!(config.base_url, "http://smocker:8081/");
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let config = SmockerConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")]));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn blank_url_keeps_default() {
        let config = SmockerConfig::from_lookup(lookup(&[(BASE_URL_ENV, "  ")]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn deserializes_from_json() {
        let config: SmockerConfig =
            serde_json::from_str(r#"{"base_url":"http://10.0.0.5:8081","timeout":1000}"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:8081");
        assert_eq!(config.timeout, Some(Duration::from_secs(1)));

        let config: SmockerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SmockerConfig::default());
    }
}
