//! Session Gate - the main public API.
//!
//! The `SessionGate` is evaluated once per navigation event and decides
//! whether the visitor may proceed or must go through onboarding again:
//! - Reads the stored token and verifies it against the current device
//! - Purges invalid tokens and redirects to the onboarding route
//! - Issues a fresh token when onboarding completes (`mark_seen`)

use crate::clock::{Clock, SystemClock};
use crate::config::GateConfig;
use crate::fingerprint::Fingerprint;
use crate::store::file::FileStore;
use crate::store::TokenStore;
use crate::token::codec::{decode, sign};
use crate::token::verify::verify_token;
use crate::GateError;
use std::sync::Arc;

/// Receives redirect instructions from the gate.
///
/// Implementations must replace the current history entry rather than push a
/// new one, so "back" cannot return into a gated route.
pub trait Navigator {
    /// Replace the current route with `route`.
    fn replace(&mut self, route: &str);
}

/// Whether the visitor may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Token valid; gated content may render.
    Open,
    /// Token missing or invalid; onboarding required.
    Closed,
}

/// Outcome of a single gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    /// Resulting gate state.
    pub state: GateState,

    /// Why the gate is closed, if it is.
    pub failure: Option<GateError>,

    /// Whether a stored value was removed.
    pub purged: bool,

    /// Whether a redirect to the onboarding route was issued.
    pub redirected: bool,
}

impl GateDecision {
    /// Whether the gate is open.
    pub fn is_open(&self) -> bool {
        self.state == GateState::Open
    }
}

/// Device-bound onboarding gate.
///
/// Create one instance per application and share it between the route
/// manager and the onboarding flow.
pub struct SessionGate {
    config: GateConfig,
    clock: Arc<dyn Clock>,
    fingerprint: Arc<dyn Fingerprint>,
    store: Arc<dyn TokenStore>,
}

impl SessionGate {
    /// Create a gate over the given fingerprint source and store.
    ///
    /// Uses the system clock for time operations.
    ///
    /// # Errors
    /// Returns `ConfigError` if configuration validation fails.
    pub fn new(
        config: GateConfig,
        fingerprint: Arc<dyn Fingerprint>,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, GateError> {
        config.validate()?;
        Ok(Self::with_clock(config, Arc::new(SystemClock), fingerprint, store))
    }

    /// Create a gate persisting its token under `dirs::data_dir()`.
    ///
    /// # Errors
    /// Returns an error if configuration validation or store directory
    /// creation fails.
    pub fn persistent(
        config: GateConfig,
        fingerprint: Arc<dyn Fingerprint>,
    ) -> Result<Self, GateError> {
        config.validate()?;
        let store = FileStore::new(config.store_namespace)?;
        Ok(Self::with_clock(
            config,
            Arc::new(SystemClock),
            fingerprint,
            Arc::new(store),
        ))
    }

    /// Create a gate with a custom clock (for testing).
    #[cfg(any(test, feature = "test-seams"))]
    pub fn new_with_clock(
        config: GateConfig,
        clock: Arc<dyn Clock>,
        fingerprint: Arc<dyn Fingerprint>,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, GateError> {
        config.validate()?;
        Ok(Self::with_clock(config, clock, fingerprint, store))
    }

    fn with_clock(
        config: GateConfig,
        clock: Arc<dyn Clock>,
        fingerprint: Arc<dyn Fingerprint>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            config,
            clock,
            fingerprint,
            store,
        }
    }

    /// Evaluate the gate for a navigation to `current_route`.
    ///
    /// Call exactly once per navigation event, before rendering gated
    /// content. On an invalid token this:
    /// 1. Removes the stored value, if one was present
    /// 2. Redirects to the onboarding route unless already there
    ///
    /// Every failure class is handled the same way; the reason is only logged.
    pub fn evaluate(&self, current_route: &str, navigator: &mut dyn Navigator) -> GateDecision {
        let raw = self.read_raw();

        let failure = match self.check_raw(raw.as_deref()) {
            Ok(()) => {
                tracing::debug!(route = current_route, "onboarding gate open");
                return GateDecision {
                    state: GateState::Open,
                    failure: None,
                    purged: false,
                    redirected: false,
                };
            }
            Err(e) => e,
        };

        tracing::warn!(
            route = current_route,
            reason = failure.reason(),
            "onboarding token rejected"
        );

        let purged = raw.is_some() && self.purge();

        let redirected = current_route != self.config.onboarding_route;
        if redirected {
            tracing::info!(
                from = current_route,
                to = self.config.onboarding_route,
                "redirecting to onboarding"
            );
            navigator.replace(self.config.onboarding_route);
        }

        GateDecision {
            state: GateState::Closed,
            failure: Some(failure),
            purged,
            redirected,
        }
    }

    /// Record a successful human-verification step.
    ///
    /// Signs the current time for this device and overwrites any stored
    /// token, opening the gate for the validity window.
    ///
    /// # Errors
    /// Returns `StoreIO` if the token cannot be written.
    pub fn mark_seen(&self) -> Result<(), GateError> {
        let now = self.clock.now_millis();
        let token = sign(self.config.salt, now, self.fingerprint.as_ref());
        self.store.set(self.config.storage_key, &token)?;
        tracing::info!(issued_at_millis = now, "onboarding marked as seen");
        Ok(())
    }

    /// Check the stored token without purging or redirecting.
    ///
    /// # Errors
    /// Returns `StoreIO` if the store cannot be read, otherwise the reason
    /// the token was rejected.
    pub fn verdict(&self) -> Result<(), GateError> {
        let raw = self.store.get(self.config.storage_key)?;
        self.check_raw(raw.as_deref())
    }

    /// Remove the stored token so the next evaluation closes the gate.
    ///
    /// # Errors
    /// Returns `StoreIO` if the store cannot remove the key.
    pub fn reset(&self) -> Result<(), GateError> {
        self.store.remove(self.config.storage_key)?;
        tracing::info!("onboarding token reset");
        Ok(())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    fn read_raw(&self) -> Option<String> {
        match self.store.get(self.config.storage_key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read onboarding token");
                None
            }
        }
    }

    fn check_raw(&self, raw: Option<&str>) -> Result<(), GateError> {
        let decoded = decode(raw);
        if raw.is_some() && decoded.is_none() {
            return Err(GateError::MalformedToken(
                "expected <millis>_<signature>".to_string(),
            ));
        }
        verify_token(
            decoded.as_ref(),
            self.config.salt,
            self.fingerprint.as_ref(),
            self.clock.as_ref(),
        )
    }

    fn purge(&self) -> bool {
        match self.store.remove(self.config.storage_key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to purge onboarding token");
                false
            }
        }
    }
}

/// Navigator that records redirects instead of performing them.
#[cfg(any(test, feature = "test-seams"))]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    /// Routes passed to `replace`, in order.
    pub redirects: Vec<String>,
}

#[cfg(any(test, feature = "test-seams"))]
impl Navigator for RecordingNavigator {
    fn replace(&mut self, route: &str) {
        self.redirects.push(route.to_string());
    }
}
