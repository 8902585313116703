//! Token verification: binding, causality and expiration.

use crate::clock::Clock;
use crate::fingerprint::Fingerprint;
use crate::token::codec::{compute_signature, SignedToken};
use crate::GateError;
use chrono::{DateTime, Utc};

/// How long a token stays valid after issue (24 hours).
pub const VALIDITY_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Check that an issue time is neither in the future nor past the window.
///
/// # Errors
/// * `FutureTimestamp` - `issued_at_millis` is after the clock's current time
/// * `Expired` - token is older than [`VALIDITY_WINDOW_MS`]
pub fn check_issued_at<C: Clock + ?Sized>(
    issued_at_millis: i64,
    clock: &C,
) -> Result<(), GateError> {
    let now = clock.now_millis();

    // A rolled-back clock is not detected here.
    if issued_at_millis > now {
        return Err(GateError::FutureTimestamp);
    }

    let age_millis = now.saturating_sub(issued_at_millis);
    if age_millis > VALIDITY_WINDOW_MS {
        return Err(GateError::Expired { age_millis });
    }

    Ok(())
}

/// Run every check against a decoded token and report the first failure.
///
/// Order: presence, numeric sanity, binding, causality, expiration.
pub fn verify_token<F, C>(
    decoded: Option<&SignedToken>,
    salt: &str,
    fingerprint: &F,
    clock: &C,
) -> Result<(), GateError>
where
    F: Fingerprint + ?Sized,
    C: Clock + ?Sized,
{
    let token = decoded.ok_or(GateError::MissingToken)?;

    if DateTime::<Utc>::from_timestamp_millis(token.issued_at_millis).is_none() {
        return Err(GateError::MalformedToken(format!(
            "timestamp out of range: {}",
            token.issued_at_millis
        )));
    }

    let expected = compute_signature(salt, token.issued_at_millis, &fingerprint.fingerprint());
    if expected != token.signature {
        return Err(GateError::BindingMismatch);
    }

    check_issued_at(token.issued_at_millis, clock)
}

/// Binary verdict over [`verify_token`].
pub fn verify<F, C>(decoded: Option<&SignedToken>, salt: &str, fingerprint: &F, clock: &C) -> bool
where
    F: Fingerprint + ?Sized,
    C: Clock + ?Sized,
{
    verify_token(decoded, salt, fingerprint, clock).is_ok()
}
