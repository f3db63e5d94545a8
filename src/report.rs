//! Result rendering and JSON export

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::{HunterError, Result};
use crate::types::{AvailabilityResult, AvailabilityStatus, HuntOutcome};

/// Pipeline numbers shown under the listing
#[derive(Debug, Clone, Copy)]
struct Summary {
    words_loaded: usize,
    dns_resolved: usize,
    dns_errors: usize,
    elapsed: Duration,
}

/// Available domains plus counts, ready to print
#[derive(Debug, Clone)]
pub struct Report<'a> {
    available: Vec<&'a str>,
    taken: usize,
    unknown: usize,
    summary: Option<Summary>,
}

impl<'a> Report<'a> {
    /// Build from the ordered availability results
    pub fn new(results: &'a [AvailabilityResult]) -> Self {
        let mut report = Self {
            available: Vec::new(),
            taken: 0,
            unknown: 0,
            summary: None,
        };

        for result in results {
            match result.status {
                AvailabilityStatus::Available => report.available.push(result.domain.as_str()),
                AvailabilityStatus::Taken => report.taken += 1,
                AvailabilityStatus::Unknown => report.unknown += 1,
            }
        }

        report
    }

    /// Build from a full run, including the DNS stage summary
    pub fn from_outcome(outcome: &'a HuntOutcome) -> Self {
        let mut report = Self::new(&outcome.results);
        report.summary = Some(Summary {
            words_loaded: outcome.words_loaded,
            dns_resolved: outcome.dns.resolved.len(),
            dns_errors: outcome.dns.lookup_errors,
            elapsed: outcome.elapsed,
        });
        report
    }

    pub fn available(&self) -> &[&'a str] {
        &self.available
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        if self.available.is_empty() {
            writeln!(out, "😔 No available domains found.")?;
        } else {
            writeln!(out, "🎉 Available Domains ({}):", self.available.len())?;
            writeln!(out, "─────────────────────────")?;
            for domain in &self.available {
                writeln!(out, "✅ {}", domain)?;
            }
        }
        writeln!(out)?;

        writeln!(out, "📈 Summary:")?;
        if let Some(summary) = &self.summary {
            writeln!(out, "   📚 Candidates: {}", summary.words_loaded)?;
            write!(out, "   🌐 Resolved in DNS: {}", summary.dns_resolved)?;
            if summary.dns_errors > 0 {
                write!(out, " ({} lookups failed, kept)", summary.dns_errors)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "   ✅ Available: {}", self.available.len())?;
        writeln!(out, "   ❌ Taken: {}", self.taken)?;
        if self.unknown > 0 {
            writeln!(out, "   ⚠️  Unknown: {}", self.unknown)?;
        }
        if let Some(summary) = &self.summary {
            writeln!(out, "   ⏱️  Total time: {:.2}s", summary.elapsed.as_secs_f32())?;
        }

        Ok(())
    }

    /// Print to standard output
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.render(&mut lock)?;
        lock.flush()
    }
}

/// Write the run outcome as pretty JSON, creating parent directories
pub fn save_json(outcome: &HuntOutcome, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            HunterError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
        })?;
    }

    let content = serde_json::to_string_pretty(outcome)
        .map_err(|e| HunterError::io(format!("failed to serialize results: {}", e), None))?;

    std::fs::write(path, content).map_err(|e| {
        HunterError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
    })
}
