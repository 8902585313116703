//! Onboarding gate walkthrough.
//!
//! Simulates a router evaluating the gate on each navigation, an onboarding
//! step that passes verification, and a device whose viewport changes.
//!
//! # Running
//!
//! ```bash
//! RUST_LOG=onboard_gate=debug cargo run --example onboarding_flow
//! ```

use onboard_gate::{
    DescriptorFingerprint, DeviceDescriptor, GateConfig, MemoryStore, Navigator, OnboardingFlow,
    SessionGate, VerificationOutcome,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Router that keeps a history stack and honours replace semantics.
struct HistoryRouter {
    history: Vec<String>,
}

impl HistoryRouter {
    fn current(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("/")
    }

    fn push(&mut self, route: &str) {
        self.history.push(route.to_string());
    }
}

impl Navigator for HistoryRouter {
    fn replace(&mut self, route: &str) {
        self.history.pop();
        self.history.push(route.to_string());
    }
}

fn navigate(gate: &SessionGate, router: &mut HistoryRouter, route: &str) {
    router.push(route);
    let current = router.current().to_string();
    let decision = gate.evaluate(&current, &mut *router);
    println!(
        "{:<12} -> {:?} (now at {}, history {:?})",
        route,
        decision.state,
        router.current(),
        router.history
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let fingerprint = Arc::new(DescriptorFingerprint::new(DeviceDescriptor::new(
        "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0",
        1920,
        1080,
    )));

    let gate = match SessionGate::new(
        GateConfig::default(),
        fingerprint.clone(),
        Arc::new(MemoryStore::new()),
    ) {
        Ok(gate) => gate,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let mut router = HistoryRouter {
        history: vec!["/".to_string()],
    };

    // First visit: no token, bounced to onboarding.
    navigate(&gate, &mut router, "/dashboard");

    // Verification widget reports success.
    let mut flow = OnboardingFlow::new(&gate);
    if let Err(e) = flow.complete(VerificationOutcome::Passed) {
        eprintln!("Could not store onboarding token: {}", e);
        std::process::exit(1);
    }

    navigate(&gate, &mut router, "/dashboard");
    navigate(&gate, &mut router, "/settings");

    // Window resized: fingerprint changes, token no longer binds.
    fingerprint.update(DeviceDescriptor::new(
        "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0",
        1280,
        720,
    ));
    navigate(&gate, &mut router, "/dashboard");
}
