//! DNS pre-filter.
//!
//! A domain that already has address records is registered, so it is dropped
//! before the slower availability API is asked about it. Lookup failures are
//! passed through: the API stage is the authoritative check.

use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::{config::ResolverConfig, name_server::TokioConnectionProvider, TokioResolver};

use crate::error::{HunterError, Result};
use crate::progress::ProgressSink;
use crate::types::{Candidate, DnsFilterOutcome, DnsStatus};

/// Answers whether a host name has any address record
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolves(&self, host: &str) -> Result<bool>;
}

/// Resolver backed by hickory-dns using the system configuration
pub struct HickoryResolver {
    resolver: TokioResolver,
}

impl HickoryResolver {
    /// Falls back to hickory's default upstreams when the system
    /// configuration cannot be read.
    pub fn new(timeout: Duration) -> Self {
        let mut builder = match TokioResolver::builder_tokio() {
            Ok(builder) => builder,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read system DNS config, using defaults");
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
            }
        };

        builder.options_mut().timeout = timeout;
        builder.options_mut().attempts = 1;

        Self {
            resolver: builder.build(),
        }
    }
}

#[async_trait]
impl Resolve for HickoryResolver {
    async fn resolves(&self, host: &str) -> Result<bool> {
        // Absolute name, so search domains are never appended.
        let fqdn = if host.ends_with('.') {
            host.to_string()
        } else {
            format!("{}.", host)
        };

        match self.resolver.lookup_ip(fqdn.as_str()).await {
            Ok(lookup) => Ok(lookup.iter().next().is_some()),
            Err(e) if e.is_no_records_found() => Ok(false),
            Err(e) => Err(HunterError::resolution(host, e.to_string())),
        }
    }
}

/// Drops candidates whose domain already resolves
pub struct DnsPreFilter {
    resolver: Box<dyn Resolve>,
    tld: String,
    timeout: Duration,
}

impl DnsPreFilter {
    pub fn new(resolver: Box<dyn Resolve>, tld: impl Into<String>, timeout: Duration) -> Self {
        Self {
            resolver,
            tld: tld.into(),
            timeout,
        }
    }

    /// Resolve one candidate's domain under the lookup timeout
    pub async fn lookup(&self, candidate: &Candidate) -> Result<DnsStatus> {
        let host = candidate.domain(&self.tld);
        let timeout_secs = self.timeout.as_secs_f64().ceil() as u64;
        let resolves = tokio::time::timeout(self.timeout, self.resolver.resolves(&host))
            .await
            .map_err(|_| HunterError::timeout(format!("DNS lookup for {}", host), timeout_secs))??;

        Ok(if resolves {
            DnsStatus::Resolves
        } else {
            DnsStatus::DoesNotResolve
        })
    }

    /// Split candidates into those that still need an API check and those that resolve
    pub async fn filter(
        &self,
        candidates: Vec<Candidate>,
        progress: &dyn ProgressSink,
    ) -> DnsFilterOutcome {
        let total = candidates.len() as u64;
        let mut outcome = DnsFilterOutcome::default();

        progress.start("dns filter", total);
        for (index, candidate) in candidates.into_iter().enumerate() {
            match self.lookup(&candidate).await {
                Ok(DnsStatus::Resolves) => outcome.resolved.push(candidate),
                Ok(DnsStatus::DoesNotResolve) => outcome.passed.push(candidate),
                Err(e) => {
                    tracing::debug!(
                        candidate = %candidate,
                        error = %e,
                        "DNS lookup failed, keeping candidate"
                    );
                    outcome.lookup_errors += 1;
                    outcome.passed.push(candidate);
                }
            }
            progress.update(index as u64 + 1, total);
        }
        progress.finish();

        tracing::info!(
            tld = %self.tld,
            checked = total,
            resolved = outcome.resolved.len(),
            passed = outcome.passed.len(),
            lookup_errors = outcome.lookup_errors,
            "DNS pre-filter completed"
        );

        outcome
    }
}
