//! Token string format and signature computation.
//!
//! A token is stored as `"<issued_at_millis>_<signature>"`. The signature is
//! the standard base64 encoding of `salt ++ issued_at_millis ++ "_" ++
//! fingerprint`. Standard base64 never emits `_`, so the delimiter splits a
//! well-formed token into exactly two parts.
//!
//! The encoding is reversible and the salt is public. This gives
//! tamper-evidence against copying a token between devices, nothing more.

use crate::fingerprint::Fingerprint;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;

/// Separator between the timestamp and the signature.
pub const TOKEN_DELIMITER: char = '_';

/// A decoded `(timestamp, signature)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    /// Issue time in milliseconds since the Unix epoch.
    pub issued_at_millis: i64,
    /// Opaque signature string.
    pub signature: String,
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.issued_at_millis, TOKEN_DELIMITER, self.signature
        )
    }
}

/// Compute the signature for a timestamp and fingerprint value.
pub fn compute_signature(salt: &str, issued_at_millis: i64, fingerprint: &str) -> String {
    let material = format!("{salt}{issued_at_millis}{TOKEN_DELIMITER}{fingerprint}");
    STANDARD.encode(material.as_bytes())
}

/// Sign a timestamp for the current device and return the storable string.
///
/// Signing the same timestamp twice on the same device yields the same string.
pub fn sign<F: Fingerprint + ?Sized>(salt: &str, issued_at_millis: i64, fingerprint: &F) -> String {
    SignedToken {
        issued_at_millis,
        signature: compute_signature(salt, issued_at_millis, &fingerprint.fingerprint()),
    }
    .to_string()
}

/// Parse a stored token.
///
/// Returns `None` when the value is absent, does not split into exactly two
/// non-empty parts, or the timestamp is not an integer.
pub fn decode(raw: Option<&str>) -> Option<SignedToken> {
    let raw = raw?;
    let mut parts = raw.split(TOKEN_DELIMITER);
    let timestamp = parts.next()?;
    let signature = parts.next()?;
    if parts.next().is_some() || timestamp.is_empty() || signature.is_empty() {
        return None;
    }

    let issued_at_millis = timestamp.parse::<i64>().ok()?;
    Some(SignedToken {
        issued_at_millis,
        signature: signature.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::StaticFingerprint;

    const SALT: &str = "test-salt";

    fn device() -> StaticFingerprint {
        StaticFingerprint("device-a".to_string())
    }

    #[test]
    fn sign_is_deterministic() {
        let a = sign(SALT, 1_736_942_400_000, &device());
        let b = sign(SALT, 1_736_942_400_000, &device());
        assert_eq!(a, b);
    }

    #[test]
    fn sign_format() {
        let token = sign(SALT, 42, &device());
        let expected_sig = STANDARD.encode("test-salt42_device-a");
        assert_eq!(token, format!("42_{}", expected_sig));
    }

    #[test]
    fn signature_depends_on_fingerprint() {
        let other = StaticFingerprint("device-b".to_string());
        assert_ne!(sign(SALT, 42, &device()), sign(SALT, 42, &other));
    }

    #[test]
    fn decode_signed_token() {
        let token = sign(SALT, 1_736_942_400_000, &device());
        let decoded = decode(Some(token.as_str())).unwrap();
        assert_eq!(decoded.issued_at_millis, 1_736_942_400_000);
        assert_eq!(decoded.to_string(), token);
    }

    #[test]
    fn decode_absent() {
        assert_eq!(decode(None), None);
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode(Some("")), None);
    }

    #[test]
    fn decode_too_many_parts() {
        assert_eq!(decode(Some("not_a_valid_token_at_all_extra_parts")), None);
    }

    #[test]
    fn decode_non_numeric_timestamp() {
        assert_eq!(decode(Some("abc_xyz")), None);
    }

    #[test]
    fn decode_empty_parts() {
        assert_eq!(decode(Some("_sig")), None);
        assert_eq!(decode(Some("123_")), None);
        assert_eq!(decode(Some("123")), None);
    }

    #[test]
    fn decode_overflowing_timestamp() {
        assert_eq!(decode(Some("99999999999999999999999_sig")), None);
    }
}
