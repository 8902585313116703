//! Persistent key-value slot backing the onboarding token.
//!
//! The gate never touches ambient storage directly; hosts inject a
//! [`TokenStore`] so tests can substitute [`memory::MemoryStore`].

use crate::GateError;

pub mod file;
pub mod memory;

/// Synchronous, device-local key-value store.
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, GateError>;

    /// Write `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), GateError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), GateError>;
}
