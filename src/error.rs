//! Error handling for word-hunter

use thiserror::Error;

/// Main error type for word-hunter
#[derive(Error, Debug, Clone)]
pub enum HunterError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
    },

    #[error("Resolution error for '{host}': {message}")]
    Resolution { host: String, message: String },

    #[error("Availability API error for '{domain}': {message}")]
    ApiCall {
        domain: String,
        message: String,
        status_code: Option<u16>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },
}

impl HunterError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error tied to a file path
    pub fn config_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a DNS resolution error
    pub fn resolution(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Create an availability API error
    pub fn api_call(
        domain: impl Into<String>,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::ApiCall {
            domain: domain.into(),
            message: message.into(),
            status_code,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Whether this error must stop the run.
    ///
    /// Per-candidate failures are folded into the result classification;
    /// only configuration problems terminate the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!(
                    "❌ Configuration problem{}: {}\n💡 Check --words/--tld/--delay or your .env file",
                    path_info, message
                )
            }
            Self::Resolution { host, message } => {
                format!("⚠️  Could not resolve '{}': {}", host, message)
            }
            Self::ApiCall { domain, message, status_code } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!(
                    "❌ Availability check for '{}' failed{}: {}\n💡 Check your internet connection and API settings",
                    domain, status, message
                )
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 The availability API may have changed its response format", message)
            }
            Self::Timeout { operation, timeout_secs } => {
                format!("⏱️  Operation '{}' timed out after {}s", operation, timeout_secs)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
        }
    }
}

impl From<std::io::Error> for HunterError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HunterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_config_is_fatal() {
        assert!(HunterError::config("missing").is_fatal());
        assert!(HunterError::config_path("missing", "/nope").is_fatal());
        assert!(!HunterError::resolution("a.com", "boom").is_fatal());
        assert!(!HunterError::api_call("a.com", "boom", Some(500)).is_fatal());
        assert!(!HunterError::timeout("DNS lookup", 3).is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err = HunterError::from(io);
        assert!(matches!(err, HunterError::Io { .. }));
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("stdout closed"));
    }

    #[test]
    fn test_user_message_includes_context() {
        let err = HunterError::config_path("word list not found", "/tmp/none.txt");
        let msg = err.user_message();
        assert!(msg.contains("/tmp/none.txt"));
        assert!(msg.contains("word list not found"));

        let err = HunterError::api_call("zebra.com", "server error", Some(503));
        assert!(err.user_message().contains("(503)"));
    }
}
