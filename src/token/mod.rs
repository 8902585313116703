//! Onboarding token signing, decoding and verification.

pub mod codec;
pub mod verify;
