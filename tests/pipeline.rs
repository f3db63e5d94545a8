//! End-to-end pipeline runs with scripted DNS and availability answers

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::NamedTempFile;
use word_hunter::{
    config::ApiBackend,
    progress::NoProgress,
    AvailabilityApi, AvailabilityStatus, HuntConfig, Hunter, HunterError, Report, Resolve, Result,
};

#[derive(Clone, Default)]
struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn record(&self, what: &str) {
        self.0.lock().push(what.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

struct MockResolver {
    registered: Vec<&'static str>,
    log: CallLog,
}

#[async_trait]
impl Resolve for MockResolver {
    async fn resolves(&self, host: &str) -> Result<bool> {
        self.log.record(host);
        Ok(self.registered.iter().any(|r| *r == host))
    }
}

/// `Some(flag)` answers, `None` fails like a dropped connection
struct MockApi {
    answers: HashMap<&'static str, Option<bool>>,
    log: CallLog,
}

#[async_trait]
impl AvailabilityApi for MockApi {
    async fn is_available(&self, domain: &str) -> Result<bool> {
        self.log.record(domain);
        match self.answers.get(domain).copied().flatten() {
            Some(flag) => Ok(flag),
            None => Err(HunterError::api_call(domain, "network unreachable", None)),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

fn dictionary(words: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", words).unwrap();
    file
}

fn config_for(path: &std::path::Path) -> HuntConfig {
    HuntConfig {
        word_list_path: path.to_path_buf(),
        delay: Duration::from_secs(1),
        api: ApiBackend::Rdap {
            base_url: Some("http://127.0.0.1:9/".to_string()),
        },
        ..Default::default()
    }
}

fn hunter(
    config: HuntConfig,
    registered: Vec<&'static str>,
    answers: &[(&'static str, Option<bool>)],
) -> (Hunter, CallLog, CallLog) {
    let dns_log = CallLog::default();
    let api_log = CallLog::default();
    let resolver = MockResolver {
        registered,
        log: dns_log.clone(),
    };
    let api = MockApi {
        answers: answers.iter().copied().collect(),
        log: api_log.clone(),
    };
    (Hunter::new(config, Box::new(resolver), Box::new(api)), dns_log, api_log)
}

#[tokio::test(start_paused = true)]
async fn test_dns_filter_then_report_available() {
    let words = dictionary("apple\nzebra\ncrane\n");
    let (hunter, dns_log, api_log) = hunter(
        config_for(words.path()),
        vec!["apple.com"],
        &[("zebra.com", Some(true)), ("crane.com", Some(false))],
    );

    let outcome = hunter.run(&NoProgress).await.unwrap();

    assert_eq!(outcome.words_loaded, 3);
    assert_eq!(dns_log.calls(), vec!["apple.com", "zebra.com", "crane.com"]);
    let passed: Vec<&str> = outcome.dns.passed.iter().map(|c| c.as_str()).collect();
    assert_eq!(passed, vec!["zebra", "crane"]);

    // apple.com resolved, so the API never hears about it
    assert_eq!(api_log.calls(), vec!["zebra.com", "crane.com"]);

    assert_eq!(outcome.available_domains(), vec!["zebra.com"]);
    let report = Report::from_outcome(&outcome);
    assert_eq!(report.available_count(), 1);
    assert_eq!(report.available(), &["zebra.com"]);
}

#[tokio::test(start_paused = true)]
async fn test_api_failure_is_unknown_and_run_completes() {
    let words = dictionary("apple zebra crane");
    let (hunter, _dns_log, api_log) = hunter(
        config_for(words.path()),
        vec!["apple.com"],
        &[("zebra.com", Some(true)), ("crane.com", None)],
    );

    let outcome = hunter.run(&NoProgress).await.unwrap();

    assert_eq!(api_log.calls().len(), 2);
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[1].domain, "crane.com");
    assert_eq!(outcome.results[1].status, AvailabilityStatus::Unknown);
    assert!(outcome.results[1].error.is_some());
    assert_eq!(outcome.available_domains(), vec!["zebra.com"]);
}

#[tokio::test(start_paused = true)]
async fn test_missing_dictionary_aborts_before_network() {
    let config = config_for(std::path::Path::new("/no/such/dictionary.txt"));
    let (hunter, dns_log, api_log) = hunter(config, vec![], &[]);

    let err = hunter.run(&NoProgress).await.unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(err, HunterError::Config { .. }));
    assert!(dns_log.calls().is_empty());
    assert!(api_log.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_limit_and_dedup() {
    let words = dictionary("Zebra zebra ZEBRA crane tiger eagle");
    let mut config = config_for(words.path());
    config.limit = Some(2);
    let (hunter, _dns_log, api_log) = hunter(
        config,
        vec![],
        &[("zebra.com", Some(false)), ("crane.com", Some(false))],
    );

    let outcome = hunter.run(&NoProgress).await.unwrap();

    assert_eq!(outcome.words_loaded, 2);
    assert_eq!(api_log.calls(), vec!["zebra.com", "crane.com"]);
    assert!(outcome.available_domains().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_run_respects_delay() {
    let words = dictionary("alpha bravo delta");
    let mut config = config_for(words.path());
    config.delay = Duration::from_secs(2);
    let (hunter, _dns_log, _api_log) = hunter(
        config,
        vec![],
        &[("alpha.com", Some(true)), ("bravo.com", Some(true)), ("delta.com", Some(true))],
    );

    let start = tokio::time::Instant::now();
    let outcome = hunter.run(&NoProgress).await.unwrap();

    // Two gaps between three calls
    assert!(start.elapsed() >= Duration::from_secs(4));
    assert_eq!(outcome.available_domains().len(), 3);
}
