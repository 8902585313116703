//! Onboarding gate error types.

use thiserror::Error;

/// Reasons a stored onboarding token can be rejected, plus store and
/// configuration failures.
///
/// The token variants exist for diagnostics only. The session gate reacts to
/// all of them identically (purge + redirect).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No token is stored for this device.
    #[error("No onboarding token stored")]
    MissingToken,

    /// Stored value has the wrong shape or a non-numeric timestamp.
    #[error("Malformed onboarding token: {0}")]
    MalformedToken(String),

    /// Signature does not match the current device fingerprint.
    #[error("Onboarding token is bound to a different device")]
    BindingMismatch,

    /// Token claims to be issued after the current time.
    #[error("Onboarding token issued in the future")]
    FutureTimestamp,

    /// Token is older than the validity window.
    #[error("Onboarding token expired ({age_millis}ms old)")]
    Expired {
        /// Age of the token in milliseconds.
        age_millis: i64,
    },

    /// Store I/O error.
    #[error("Store I/O error: {0}")]
    StoreIO(String),
}

impl GateError {
    /// Stable reason class used as a structured log field.
    pub fn reason(&self) -> &'static str {
        match self {
            GateError::ConfigError(_) => "config_error",
            GateError::MissingToken => "missing_token",
            GateError::MalformedToken(_) => "malformed_token",
            GateError::BindingMismatch => "binding_mismatch",
            GateError::FutureTimestamp => "future_timestamp",
            GateError::Expired { .. } => "expired",
            GateError::StoreIO(_) => "store_io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_classes_are_distinct() {
        let errors = [
            GateError::MissingToken,
            GateError::MalformedToken("x".to_string()),
            GateError::BindingMismatch,
            GateError::FutureTimestamp,
            GateError::Expired { age_millis: 1 },
        ];
        let mut reasons: Vec<_> = errors.iter().map(GateError::reason).collect();
        reasons.sort_unstable();
        reasons.dedup();
        assert_eq!(reasons.len(), errors.len());
    }

    #[test]
    fn expired_display_includes_age() {
        let err = GateError::Expired { age_millis: 90_000_000 };
        assert_eq!(err.to_string(), "Onboarding token expired (90000000ms old)");
    }
}
