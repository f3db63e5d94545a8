//! Generic JSON availability endpoint.
//!
//! The response schema belongs to the third party, so only the configured
//! indicator field is read and everything else in the body is ignored.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::AvailabilityApi;
use crate::config::{JsonApiConfig, DOMAIN_PLACEHOLDER};
use crate::error::{HunterError, Result};

/// Longest body excerpt kept in parse errors
const MAX_ERROR_BODY: usize = 512;

pub struct JsonApi {
    client: Client,
    config: JsonApiConfig,
}

impl JsonApi {
    pub fn new(config: JsonApiConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("word-hunter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HunterError::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn request_url(&self, domain: &str) -> String {
        self.config.url_template.replace(DOMAIN_PLACEHOLDER, domain)
    }
}

#[async_trait]
impl AvailabilityApi for JsonApi {
    async fn is_available(&self, domain: &str) -> Result<bool> {
        let mut request = self
            .client
            .get(self.request_url(domain))
            .header("Accept", "application/json");

        if let Some(key) = &self.config.api_key {
            let value = if self.config.api_key_header.eq_ignore_ascii_case("authorization") {
                format!("Bearer {}", key)
            } else {
                key.clone()
            };
            request = request.header(self.config.api_key_header.as_str(), value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HunterError::api_call(domain, e.to_string(), None))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HunterError::api_call(
                domain,
                format!("availability API returned status {}", status),
                Some(status.as_u16()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| HunterError::api_call(domain, e.to_string(), Some(status.as_u16())))?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            HunterError::parse(
                format!("invalid JSON from availability API for {}: {}", domain, e),
                Some(text.chars().take(MAX_ERROR_BODY).collect()),
            )
        })?;

        extract_indicator(&body, &self.config.field)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// Read the availability flag at a dotted `path` (array indices allowed)
pub fn extract_indicator(body: &Value, path: &str) -> Result<bool> {
    let mut current = body;
    for segment in path.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        current = next.ok_or_else(|| {
            HunterError::parse(format!("field '{}' missing from availability response", path), None)
        })?;
    }

    match current {
        Value::Bool(flag) => Ok(*flag),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "available" | "free" => Ok(true),
            "false" | "no" | "unavailable" | "taken" | "registered" => Ok(false),
            other => Err(HunterError::parse(
                format!("unrecognized availability value '{}' at '{}'", other, path),
                None,
            )),
        },
        other => Err(HunterError::parse(
            format!("availability field '{}' is not a boolean", path),
            Some(other.to_string()),
        )),
    }
}
