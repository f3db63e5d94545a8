//! Core types and structures for word-hunter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of letters in a candidate word.
pub const CANDIDATE_LEN: usize = 5;

/// A five-letter lowercase word being evaluated as a domain name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    /// Normalize a raw dictionary token into a candidate.
    ///
    /// Returns `None` unless the trimmed, lower-cased token is exactly five
    /// ASCII letters.
    pub fn parse(token: &str) -> Option<Self> {
        let word = token.trim().to_lowercase();
        if word.len() == CANDIDATE_LEN && word.chars().all(|c| c.is_ascii_lowercase()) {
            Some(Self(word))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full domain for this candidate under `tld` (e.g. `zebra.com`).
    pub fn domain(&self, tld: &str) -> String {
        format!("{}.{}", self.0, tld)
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome of the DNS pre-filter for a single candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DnsStatus {
    Resolves,
    DoesNotResolve,
}

impl std::fmt::Display for DnsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DnsStatus::Resolves => write!(f, "resolves"),
            DnsStatus::DoesNotResolve => write!(f, "does not resolve"),
        }
    }
}

/// Domain availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Taken,
    Unknown,
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Taken => write!(f, "taken"),
            AvailabilityStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Availability check result for one candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub candidate: Candidate,
    pub domain: String,
    pub status: AvailabilityStatus,
    pub checked_at: DateTime<Utc>,
    pub error: Option<String>,
}

impl AvailabilityResult {
    pub fn is_available(&self) -> bool {
        self.status == AvailabilityStatus::Available
    }
}

/// Candidates split by the DNS pre-filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DnsFilterOutcome {
    /// Candidates that did not resolve (including lookup failures), in input order
    pub passed: Vec<Candidate>,
    /// Candidates that resolved and were dropped
    pub resolved: Vec<Candidate>,
    /// Lookups that failed or timed out and were passed through
    pub lookup_errors: usize,
}

/// Everything a single run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntOutcome {
    pub tld: String,
    pub words_loaded: usize,
    pub dns: DnsFilterOutcome,
    pub results: Vec<AvailabilityResult>,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl HuntOutcome {
    /// Domains reported available, in check order
    pub fn available_domains(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.is_available())
            .map(|r| r.domain.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_normalizes_case_and_whitespace() {
        let c = Candidate::parse("  Zebra\n").unwrap();
        assert_eq!(c.as_str(), "zebra");
        assert_eq!(c.domain("com"), "zebra.com");
    }

    #[test]
    fn test_candidate_rejects_bad_tokens() {
        for token in ["four", "sixsix", "can't", "ab1de", "café!", "", "héllo"] {
            assert!(Candidate::parse(token).is_none(), "{token} should be rejected");
        }
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AvailabilityStatus::Available.to_string(), "available");
        assert_eq!(AvailabilityStatus::Unknown.to_string(), "unknown");
        assert_eq!(DnsStatus::DoesNotResolve.to_string(), "does not resolve");
    }
}
