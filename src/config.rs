//! Run configuration: defaults, environment (`.env` included) and overrides

use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;

use crate::checker::rdap::rdap_base_url;
use crate::error::{HunterError, Result};
use crate::words::DEFAULT_WORD_LIST;

pub const ENV_WORD_LIST_PATH: &str = "WORD_LIST_PATH";
pub const ENV_DELAY_SECONDS: &str = "DELAY_SECONDS";
pub const ENV_TLD: &str = "TLD";
pub const ENV_DNS_TIMEOUT_SECONDS: &str = "DNS_TIMEOUT_SECONDS";
pub const ENV_API_TIMEOUT_SECONDS: &str = "API_TIMEOUT_SECONDS";
pub const ENV_RDAP_BASE_URL: &str = "RDAP_BASE_URL";
pub const ENV_API_URL: &str = "AVAILABILITY_API_URL";
pub const ENV_API_FIELD: &str = "AVAILABILITY_API_FIELD";
pub const ENV_API_KEY: &str = "AVAILABILITY_API_KEY";
pub const ENV_API_KEY_HEADER: &str = "AVAILABILITY_API_KEY_HEADER";

/// Placeholder substituted with the domain in JSON API URL templates
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// Which availability service to ask
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBackend {
    /// RDAP lookup; 404 means unregistered
    Rdap { base_url: Option<String> },
    /// Third-party JSON endpoint with an availability field
    Json(JsonApiConfig),
}

impl Default for ApiBackend {
    fn default() -> Self {
        Self::Rdap { base_url: None }
    }
}

/// Settings for a generic JSON availability endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct JsonApiConfig {
    /// URL with a `{domain}` placeholder
    pub url_template: String,
    /// Dotted path to the availability indicator (e.g. `data.available`)
    pub field: String,
    pub api_key: Option<String>,
    pub api_key_header: String,
}

impl JsonApiConfig {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            field: "available".to_string(),
            api_key: None,
            api_key_header: "Authorization".to_string(),
        }
    }
}

/// Configuration for one hunting run
#[derive(Debug, Clone, PartialEq)]
pub struct HuntConfig {
    pub word_list_path: PathBuf,
    /// Fixed pause between consecutive availability calls
    pub delay: Duration,
    /// Domain suffix without the leading dot
    pub tld: String,
    pub dns_timeout: Duration,
    pub api_timeout: Duration,
    pub limit: Option<usize>,
    pub api: ApiBackend,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            word_list_path: PathBuf::from(DEFAULT_WORD_LIST),
            delay: Duration::from_secs(1),
            tld: "com".to_string(),
            dns_timeout: Duration::from_secs(3),
            api_timeout: Duration::from_secs(10),
            limit: None,
            api: ApiBackend::default(),
        }
    }
}

impl HuntConfig {
    /// Build from process environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_WORD_LIST_PATH) {
            config.word_list_path = PathBuf::from(path);
        }
        if let Some(delay) = get(ENV_DELAY_SECONDS) {
            config.delay = parse_seconds(ENV_DELAY_SECONDS, &delay)?;
        }
        if let Some(tld) = get(ENV_TLD) {
            config.tld = tld;
        }
        if let Some(timeout) = get(ENV_DNS_TIMEOUT_SECONDS) {
            config.dns_timeout = parse_seconds(ENV_DNS_TIMEOUT_SECONDS, &timeout)?;
        }
        if let Some(timeout) = get(ENV_API_TIMEOUT_SECONDS) {
            config.api_timeout = parse_seconds(ENV_API_TIMEOUT_SECONDS, &timeout)?;
        }

        config.api = match get(ENV_API_URL) {
            Some(url_template) => {
                let mut json = JsonApiConfig::new(url_template);
                if let Some(field) = get(ENV_API_FIELD) {
                    json.field = field;
                }
                json.api_key = get(ENV_API_KEY);
                if let Some(header) = get(ENV_API_KEY_HEADER) {
                    json.api_key_header = header;
                }
                ApiBackend::Json(json)
            }
            None => ApiBackend::Rdap {
                base_url: get(ENV_RDAP_BASE_URL),
            },
        };

        Ok(config)
    }

    /// Normalize and check the configuration before any work starts
    pub fn validate(mut self) -> Result<Self> {
        self.tld = self.tld.trim().trim_start_matches('.').to_lowercase();

        let tld_regex = Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$")
            .map_err(|e| HunterError::config(e.to_string()))?;
        if !tld_regex.is_match(&self.tld) || self.tld.chars().all(|c| c.is_ascii_digit()) {
            return Err(HunterError::config(format!("invalid TLD '{}'", self.tld)));
        }

        if self.dns_timeout.is_zero() || self.api_timeout.is_zero() {
            return Err(HunterError::config("timeouts must be greater than zero"));
        }

        if self.limit == Some(0) {
            return Err(HunterError::config("--limit must be at least 1"));
        }

        match &self.api {
            ApiBackend::Rdap { base_url: None } if rdap_base_url(&self.tld).is_none() => {
                return Err(HunterError::config(format!(
                    "no RDAP server known for .{}; set {} or {}",
                    self.tld, ENV_RDAP_BASE_URL, ENV_API_URL
                )));
            }
            ApiBackend::Json(json) if !json.url_template.contains(DOMAIN_PLACEHOLDER) => {
                return Err(HunterError::config(format!(
                    "availability API URL must contain {}",
                    DOMAIN_PLACEHOLDER
                )));
            }
            ApiBackend::Json(json) if json.field.split('.').any(str::is_empty) => {
                return Err(HunterError::config(format!(
                    "invalid availability field path '{}'",
                    json.field
                )));
            }
            _ => {}
        }

        Ok(self)
    }
}

/// Parse a non-negative, possibly fractional number of seconds
pub fn parse_seconds(name: &str, value: &str) -> Result<Duration> {
    let secs: f64 = value.trim().parse().map_err(|_| {
        HunterError::config(format!("{} must be a number of seconds, got '{}'", name, value))
    })?;

    if !secs.is_finite() || secs < 0.0 {
        return Err(HunterError::config(format!(
            "{} must be a non-negative number of seconds, got '{}'",
            name, value
        )));
    }

    Duration::try_from_secs_f64(secs).map_err(|_| {
        HunterError::config(format!("{} is too large to be a duration, got '{}'", name, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = HuntConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, HuntConfig::default());
        assert_eq!(config.delay, Duration::from_secs(1));
        assert_eq!(config.tld, "com");
        assert_eq!(config.word_list_path, PathBuf::from("/usr/share/dict/words"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = HuntConfig::from_lookup(lookup_from(&[
            (ENV_WORD_LIST_PATH, "/tmp/words.txt"),
            (ENV_DELAY_SECONDS, "0.25"),
            (ENV_TLD, ".NET"),
        ]))
        .unwrap()
        .validate()
        .unwrap();

        assert_eq!(config.word_list_path, PathBuf::from("/tmp/words.txt"));
        assert_eq!(config.delay, Duration::from_millis(250));
        assert_eq!(config.tld, "net");
    }

    #[test]
    fn test_json_backend_from_env() {
        let config = HuntConfig::from_lookup(lookup_from(&[
            (ENV_API_URL, "https://api.example.test/check?domain={domain}"),
            (ENV_API_FIELD, "data.available"),
            (ENV_API_KEY, "secret"),
        ]))
        .unwrap();

        match config.api {
            ApiBackend::Json(json) => {
                assert_eq!(json.field, "data.available");
                assert_eq!(json.api_key.as_deref(), Some("secret"));
                assert_eq!(json.api_key_header, "Authorization");
            }
            other => panic!("expected JSON backend, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_delay_is_config_error() {
        let err = HuntConfig::from_lookup(lookup_from(&[(ENV_DELAY_SECONDS, "soon")])).unwrap_err();
        assert!(err.is_fatal());
        assert!(parse_seconds("delay", "-1").is_err());
        assert!(parse_seconds("delay", "NaN").is_err());
        assert!(parse_seconds("delay", "1e20").unwrap_err().is_fatal());
        let huge_timeout = lookup_from(&[(ENV_API_TIMEOUT_SECONDS, "1e300")]);
        assert!(HuntConfig::from_lookup(huge_timeout).is_err());
        assert_eq!(parse_seconds("delay", "0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_validate_rejects_bad_tld() {
        for tld in ["", "-com", "co m", "123", "com-"] {
            let config = HuntConfig {
                tld: tld.to_string(),
                api: ApiBackend::Rdap {
                    base_url: Some("http://localhost/".to_string()),
                },
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{tld:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_requires_known_rdap_server() {
        let config = HuntConfig {
            tld: "example".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = HuntConfig {
            tld: "example".to_string(),
            api: ApiBackend::Rdap {
                base_url: Some("http://localhost:8080/".to_string()),
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_json_template() {
        let config = HuntConfig {
            api: ApiBackend::Json(JsonApiConfig::new("https://api.example.test/check")),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
