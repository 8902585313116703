//! Onboarding gate configuration.

use crate::GateError;

/// Storage key holding the onboarding token.
pub const DEFAULT_STORAGE_KEY: &str = "onboarding_token_v1";

/// Route that hosts the human-verification step.
pub const DEFAULT_ONBOARDING_ROUTE: &str = "/onboarding";

/// Salt mixed into every signature. Shipped to every client, not a secret.
pub const DEFAULT_SALT: &str = "onboard-gate::v1::";

/// Directory namespace for the file-backed store.
pub const DEFAULT_STORE_NAMESPACE: &str = "onboard-gate";

/// Configuration for the onboarding gate.
///
/// Every field is a compile-time constant in practice. The token validity
/// window is deliberately not configurable; see
/// [`VALIDITY_WINDOW_MS`](crate::token::verify::VALIDITY_WINDOW_MS).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Key of the single storage slot.
    pub storage_key: &'static str,

    /// Route the gate redirects to, and on which it never redirects.
    pub onboarding_route: &'static str,

    /// Fixed salt prefixed to the signed material.
    pub salt: &'static str,

    /// Namespace directory used by [`FileStore`](crate::store::file::FileStore).
    pub store_namespace: &'static str,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY,
            onboarding_route: DEFAULT_ONBOARDING_ROUTE,
            salt: DEFAULT_SALT,
            store_namespace: DEFAULT_STORE_NAMESPACE,
        }
    }
}

impl GateConfig {
    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), GateError> {
        if self.storage_key.is_empty() {
            return Err(GateError::ConfigError(
                "storage_key cannot be empty".to_string(),
            ));
        }
        if self.salt.is_empty() {
            return Err(GateError::ConfigError("salt cannot be empty".to_string()));
        }
        if !self.onboarding_route.starts_with('/') {
            return Err(GateError::ConfigError(format!(
                "onboarding_route must be an absolute path, got {:?}",
                self.onboarding_route
            )));
        }
        if self.store_namespace.is_empty() {
            return Err(GateError::ConfigError(
                "store_namespace cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
