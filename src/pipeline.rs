//! Word list -> DNS pre-filter -> availability checks

use std::time::Instant;

use chrono::Utc;

use crate::checker::{build_api, AvailabilityApi, AvailabilityChecker};
use crate::config::HuntConfig;
use crate::dns::{DnsPreFilter, HickoryResolver, Resolve};
use crate::error::Result;
use crate::progress::ProgressSink;
use crate::types::HuntOutcome;
use crate::words::WordSource;

/// One configured run of the whole pipeline
pub struct Hunter {
    config: HuntConfig,
    filter: DnsPreFilter,
    checker: AvailabilityChecker,
}

impl Hunter {
    /// Assemble a hunter from explicit resolver and API implementations
    pub fn new(
        config: HuntConfig,
        resolver: Box<dyn Resolve>,
        api: Box<dyn AvailabilityApi>,
    ) -> Self {
        let filter = DnsPreFilter::new(resolver, config.tld.clone(), config.dns_timeout);
        let checker = AvailabilityChecker::from_config(api, &config);
        Self {
            config,
            filter,
            checker,
        }
    }

    /// Assemble a hunter with the system resolver and the configured API
    pub fn from_config(config: HuntConfig) -> Result<Self> {
        let api = build_api(&config)?;
        let resolver = HickoryResolver::new(config.dns_timeout);
        Ok(Self::new(config, Box::new(resolver), api))
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    /// Run all stages in order.
    ///
    /// Only a word list problem fails the run; every per-candidate failure is
    /// folded into the outcome.
    pub async fn run(&self, progress: &dyn ProgressSink) -> Result<HuntOutcome> {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut source = WordSource::from_file(&self.config.word_list_path)?;
        if let Some(limit) = self.config.limit {
            source = source.limit(limit);
        }
        let words_loaded = source.len();
        tracing::info!(
            path = %self.config.word_list_path.display(),
            candidates = words_loaded,
            "Candidates loaded"
        );

        let dns = self.filter.filter(source.into_words(), progress).await;
        let results = self.checker.check_all(&dns.passed, progress).await;

        Ok(HuntOutcome {
            tld: self.config.tld.clone(),
            words_loaded,
            dns,
            results,
            started_at,
            elapsed: start.elapsed(),
        })
    }
}
