//! Onboarding flow hook.
//!
//! Wraps [`SessionGate::mark_seen`] so a verification step can only mark the
//! device once, and only when it actually passed.

use crate::gate::SessionGate;
use crate::GateError;

/// Result reported by the human-verification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Verification succeeded.
    Passed,
    /// Verification failed or was abandoned.
    Failed,
}

/// One run of the onboarding flow.
pub struct OnboardingFlow<'a> {
    gate: &'a SessionGate,
    completed: bool,
}

impl<'a> OnboardingFlow<'a> {
    /// Start a flow against a gate.
    pub fn new(gate: &'a SessionGate) -> Self {
        Self {
            gate,
            completed: false,
        }
    }

    /// Report the verification outcome.
    ///
    /// Returns `Ok(true)` when this call marked the device as seen. Failed
    /// outcomes and repeated successes are no-ops returning `Ok(false)`.
    ///
    /// # Errors
    /// Returns `StoreIO` if the token cannot be written. The flow stays
    /// incomplete so the host may retry.
    pub fn complete(&mut self, outcome: VerificationOutcome) -> Result<bool, GateError> {
        if self.completed {
            tracing::debug!("onboarding already completed, ignoring outcome");
            return Ok(false);
        }
        if outcome == VerificationOutcome::Failed {
            tracing::debug!("verification failed, gate stays closed");
            return Ok(false);
        }

        self.gate.mark_seen()?;
        self.completed = true;
        Ok(true)
    }

    /// Whether this flow has marked the device as seen.
    pub fn is_complete(&self) -> bool {
        self.completed
    }
}
