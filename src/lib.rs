//! Word Hunter - find unregistered five-letter dictionary domains
//!
//! Loads a dictionary, drops words whose domain already resolves in DNS, and
//! asks an availability API about the rest, one call at a time.

pub mod checker;
pub mod config;
pub mod dns;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod types;
pub mod words;

// Re-export commonly used types
pub use error::{HunterError, Result};
pub use types::{
    AvailabilityResult, AvailabilityStatus, Candidate, DnsFilterOutcome, DnsStatus, HuntOutcome,
};

// Re-export main functionality
pub use checker::{AvailabilityApi, AvailabilityChecker};
pub use config::HuntConfig;
pub use dns::{DnsPreFilter, Resolve};
pub use pipeline::Hunter;
pub use report::Report;
pub use words::WordSource;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
