//! Throttled availability verification

pub mod json;
pub mod rdap;

pub use json::JsonApi;
pub use rdap::RdapApi;

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::config::{ApiBackend, HuntConfig};
use crate::error::{HunterError, Result};
use crate::progress::ProgressSink;
use crate::types::{AvailabilityResult, AvailabilityStatus, Candidate};

/// A remote service that can tell whether a domain is unregistered
#[async_trait]
pub trait AvailabilityApi: Send + Sync {
    /// `Ok(true)` when the domain is available for registration
    async fn is_available(&self, domain: &str) -> Result<bool>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Build the API client selected by the configuration
pub fn build_api(config: &HuntConfig) -> Result<Box<dyn AvailabilityApi>> {
    match &config.api {
        ApiBackend::Rdap { base_url } => {
            let mut api = RdapApi::new(config.api_timeout)?;
            if let Some(base_url) = base_url {
                api = api.with_base_url(base_url.clone());
            }
            Ok(Box::new(api))
        }
        ApiBackend::Json(json) => Ok(Box::new(JsonApi::new(json.clone(), config.api_timeout)?)),
    }
}

/// Calls the availability API once per candidate with a fixed pause between calls
pub struct AvailabilityChecker {
    api: Box<dyn AvailabilityApi>,
    tld: String,
    delay: Duration,
    timeout: Duration,
}

impl AvailabilityChecker {
    pub fn new(
        api: Box<dyn AvailabilityApi>,
        tld: impl Into<String>,
        delay: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            api,
            tld: tld.into(),
            delay,
            timeout,
        }
    }

    pub fn from_config(api: Box<dyn AvailabilityApi>, config: &HuntConfig) -> Self {
        Self::new(api, config.tld.clone(), config.delay, config.api_timeout)
    }

    /// Check a single candidate. Never fails: errors become `Unknown`.
    pub async fn check_one(&self, candidate: &Candidate) -> AvailabilityResult {
        let domain = candidate.domain(&self.tld);

        let call = self.api.is_available(&domain);
        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(HunterError::timeout(
                format!("{} check for {}", self.api.name(), domain),
                self.timeout.as_secs_f64().ceil() as u64,
            )),
        };

        let (status, error) = match outcome {
            Ok(true) => (AvailabilityStatus::Available, None),
            Ok(false) => (AvailabilityStatus::Taken, None),
            Err(e) => {
                tracing::debug!(
                    domain = %domain,
                    api = self.api.name(),
                    error = %e,
                    "Availability check failed"
                );
                (AvailabilityStatus::Unknown, Some(e.to_string()))
            }
        };

        tracing::debug!(domain = %domain, status = %status, "Availability checked");

        AvailabilityResult {
            candidate: candidate.clone(),
            domain,
            status,
            checked_at: Utc::now(),
            error,
        }
    }

    /// Check candidates one after another, in order, sleeping `delay` between calls
    pub async fn check_all(
        &self,
        candidates: &[Candidate],
        progress: &dyn ProgressSink,
    ) -> Vec<AvailabilityResult> {
        let total = candidates.len() as u64;
        let mut results = Vec::with_capacity(candidates.len());

        progress.start("checking", total);
        for (index, candidate) in candidates.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            results.push(self.check_one(candidate).await);
            progress.update(index as u64 + 1, total);
        }
        progress.finish();

        let available = results.iter().filter(|r| r.is_available()).count();
        let unknown = results
            .iter()
            .filter(|r| r.status == AvailabilityStatus::Unknown)
            .count();
        tracing::info!(
            api = self.api.name(),
            checked = results.len(),
            available = available,
            unknown = unknown,
            "Availability checks completed"
        );

        results
    }
}
