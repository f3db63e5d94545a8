//! RDAP-backed availability checks.
//!
//! A registry answers `404` for names it has no record of, which is the
//! availability signal. Any `2xx` with a domain object means registered.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::AvailabilityApi;
use crate::error::{HunterError, Result};

/// Get the RDAP base URL for a TLD (lowercase, without leading dot).
///
/// Returned URL ends with `/` and includes any version path.
pub fn rdap_base_url(tld: &str) -> Option<&'static str> {
    match tld {
        "com" => Some("https://rdap.verisign.com/com/v1/"),
        "net" => Some("https://rdap.verisign.com/net/v1/"),
        "org" => Some("https://rdap.org.org/"),
        "io" => Some("https://rdap.nic.io/"),
        "ai" => Some("https://rdap.nic.ai/"),
        "tech" => Some("https://rdap.nic.tech/"),
        "app" => Some("https://rdap.nic.google/"),
        "dev" => Some("https://rdap.nic.google/"),
        "xyz" => Some("https://rdap.nic.xyz/"),
        "co" => Some("https://rdap.nic.co/"),
        "me" => Some("https://rdap.nic.me/"),
        _ => None,
    }
}

/// RDAP client for a single registry or the built-in per-TLD table
pub struct RdapApi {
    client: Client,
    base_url: Option<String>,
}

impl RdapApi {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("word-hunter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HunterError::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Send every query to `base_url` instead of the built-in registry table
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the RDAP domain query URL for a fully-qualified domain (e.g. `example.com`)
    pub fn domain_url(&self, domain: &str) -> Result<String> {
        if let Some(base) = &self.base_url {
            return Ok(format!("{}/domain/{}", base.trim_end_matches('/'), domain));
        }

        let tld = domain
            .rsplit('.')
            .next()
            .filter(|tld| !tld.is_empty() && *tld != domain)
            .ok_or_else(|| HunterError::api_call(domain, "domain has no TLD", None))?;

        let base = rdap_base_url(tld).ok_or_else(|| {
            HunterError::api_call(domain, format!("no RDAP server found for TLD: {}", tld), None)
        })?;
        Ok(format!("{}domain/{}", base, domain))
    }
}

#[async_trait]
impl AvailabilityApi for RdapApi {
    async fn is_available(&self, domain: &str) -> Result<bool> {
        let url = self.domain_url(domain)?;

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/rdap+json, application/json")
            .send()
            .await
            .map_err(|e| HunterError::api_call(domain, e.to_string(), None))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(true);
        }

        if !status.is_success() {
            return Err(HunterError::api_call(
                domain,
                format!("RDAP request failed with status {}", status),
                Some(status.as_u16()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| HunterError::api_call(domain, e.to_string(), Some(status.as_u16())))?;

        let record: RdapDomain = match serde_json::from_str(&text) {
            Ok(record) => record,
            Err(e) => {
                let message = format!("invalid RDAP body for {}: {}", domain, e);
                return Err(HunterError::parse(message, Some(text)));
            }
        };
        if !record.is_domain_object() {
            let message = format!("RDAP response for {} is not a domain object", domain);
            return Err(HunterError::parse(message, Some(text)));
        }

        tracing::debug!(
            domain = %domain,
            ldh_name = record.ldh_name.as_deref().unwrap_or("-"),
            status = ?record.status,
            "RDAP record found"
        );

        Ok(false)
    }

    fn name(&self) -> &'static str {
        "rdap"
    }
}

/// The parts of an RDAP domain object worth logging
#[derive(Debug, Deserialize)]
struct RdapDomain {
    #[serde(rename = "objectClassName")]
    object_class_name: Option<String>,
    #[serde(rename = "ldhName")]
    ldh_name: Option<String>,
    #[serde(default)]
    status: Vec<String>,
}

impl RdapDomain {
    fn is_domain_object(&self) -> bool {
        match &self.object_class_name {
            Some(class) => class == "domain",
            None => self.ldh_name.is_some(),
        }
    }
}
