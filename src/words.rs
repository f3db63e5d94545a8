//! Five-letter candidate loading from a dictionary file

use std::collections::HashSet;
use std::path::Path;

use crate::error::{HunterError, Result};
use crate::types::Candidate;

/// Default system dictionary location
pub const DEFAULT_WORD_LIST: &str = "/usr/share/dict/words";

/// Distinct five-letter candidates in first-seen order
#[derive(Debug, Clone, Default)]
pub struct WordSource {
    words: Vec<Candidate>,
}

impl WordSource {
    /// Load words from a dictionary file (one per line or whitespace-separated).
    ///
    /// A missing or unreadable file is a configuration error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            let message = match e.kind() {
                std::io::ErrorKind::NotFound => "word list not found".to_string(),
                _ => format!("cannot read word list: {}", e),
            };
            HunterError::config_path(message, path.to_string_lossy())
        })?;

        let source = Self::from_text(&String::from_utf8_lossy(&bytes));
        tracing::debug!(
            path = %path.display(),
            candidates = source.len(),
            "Word list loaded"
        );
        Ok(source)
    }

    /// Extract candidates from in-memory dictionary text
    pub fn from_text(text: &str) -> Self {
        let mut seen = HashSet::new();
        let words = text
            .split_whitespace()
            .filter_map(Candidate::parse)
            .filter(|c| seen.insert(c.clone()))
            .collect();
        Self { words }
    }

    /// Keep at most `max` candidates
    pub fn limit(mut self, max: usize) -> Self {
        self.words.truncate(max);
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Candidate] {
        &self.words
    }

    pub fn into_words(self) -> Vec<Candidate> {
        self.words
    }
}

impl IntoIterator for WordSource {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}
