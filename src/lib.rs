//! # onboard-gate
//!
//! **Device-bound, time-limited onboarding gate.**
//!
//! A visitor who completes the onboarding (human-verification) step receives a
//! token binding the completion time to a fingerprint of the current device.
//! On every navigation the host evaluates the [`SessionGate`]; a missing,
//! malformed, foreign, future-dated or expired token closes the gate, purges
//! the stored value and redirects to the onboarding route.
//!
//! ## Features
//!
//! - **Device binding** — tokens copied to another browser configuration fail
//! - **24-hour validity window** — fixed at build time
//! - **Future rejection** — tokens claiming a later issue time are discarded
//! - **Loop-free redirects** — never redirects when already on the onboarding route
//! - **Injected store and fingerprint** — in-memory or file-backed, test-friendly
//!
//! ## Quickstart
//!
//! ```no_run
//! use onboard_gate::{
//!     DescriptorFingerprint, DeviceDescriptor, GateConfig, MemoryStore, Navigator, SessionGate,
//! };
//! use std::sync::Arc;
//!
//! struct Router;
//!
//! impl Navigator for Router {
//!     fn replace(&mut self, route: &str) {
//!         println!("replace -> {route}");
//!     }
//! }
//!
//! fn main() -> Result<(), onboard_gate::GateError> {
//!     let fingerprint = DescriptorFingerprint::new(DeviceDescriptor::new(
//!         "Mozilla/5.0 (X11; Linux x86_64)",
//!         1920,
//!         1080,
//!     ));
//!     let gate = SessionGate::new(
//!         GateConfig::default(),
//!         Arc::new(fingerprint),
//!         Arc::new(MemoryStore::new()),
//!     )?;
//!
//!     // Route manager, once per navigation:
//!     let decision = gate.evaluate("/dashboard", &mut Router);
//!     if !decision.is_open() {
//!         // Onboarding flow, after verification succeeds:
//!         gate.mark_seen()?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Threat Model
//!
//! The salt and encoding ship with every client. Tokens are tamper-*evident*
//! against casual copy-paste between devices and against hand-edited
//! timestamps. They are not authentication: anyone reading the code can mint
//! a valid token. A rolled-back system clock is not detected.

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod clock;
pub mod config;
pub mod errors;

// Device binding
pub mod fingerprint;

// Token layer
pub mod token;

// Storage layer
pub mod store;

// Gate (main public API)
pub mod gate;
pub mod onboarding;

// Re-exports for public API
pub use clock::{Clock, SystemClock};
pub use config::GateConfig;
pub use errors::GateError;
pub use fingerprint::{DescriptorFingerprint, DeviceDescriptor, Fingerprint, StaticFingerprint};
pub use gate::{GateDecision, GateState, Navigator, SessionGate};
pub use onboarding::{OnboardingFlow, VerificationOutcome};
pub use store::{file::FileStore, memory::MemoryStore, TokenStore};
pub use token::codec::{decode, sign, SignedToken};
pub use token::verify::{verify, VALIDITY_WINDOW_MS};

#[cfg(any(test, feature = "test-seams"))]
pub use clock::MockClock;
#[cfg(any(test, feature = "test-seams"))]
pub use gate::RecordingNavigator;
