//! Error type returned at the library boundary.
//!
//! Malformed markup is never an error: the sanitizer always recovers. The only
//! failure a caller can see is a policy that cannot be applied.

/// Error type for sanitizer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// The supplied policy overrides are structurally invalid.
    InvalidPolicy { reason: String },
}

impl SanitizeError {
    pub(crate) fn invalid_policy(reason: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SanitizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { reason } => write!(f, "Invalid sanitizer policy: {}", reason),
        }
    }
}

impl std::error::Error for SanitizeError {}

impl From<serde_json::Error> for SanitizeError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_policy(err.to_string())
    }
}

impl From<serde_yaml::Error> for SanitizeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::invalid_policy(err.to_string())
    }
}
