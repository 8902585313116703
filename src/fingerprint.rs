//! Device fingerprinting.
//!
//! A fingerprint binds a token to "this browser configuration". It is derived
//! only from stable environment descriptors and must never include values that
//! change between calls, or every token would fail the binding check.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Source of the current device fingerprint.
pub trait Fingerprint: Send + Sync {
    /// Compute the fingerprint for the current environment.
    fn fingerprint(&self) -> String;
}

/// Environment attributes the fingerprint is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// User agent string reported by the host.
    pub user_agent: String,
    /// Display width in pixels.
    pub screen_width: u32,
    /// Display height in pixels.
    pub screen_height: u32,
}

impl DeviceDescriptor {
    /// Build a descriptor from raw environment values.
    pub fn new(user_agent: impl Into<String>, screen_width: u32, screen_height: u32) -> Self {
        Self {
            user_agent: user_agent.into(),
            screen_width,
            screen_height,
        }
    }
}

/// Fingerprint derived from a [`DeviceDescriptor`].
///
/// The descriptor is read on every call so geometry changes made by the host
/// through [`DescriptorFingerprint::update`] take effect immediately.
#[derive(Debug)]
pub struct DescriptorFingerprint {
    descriptor: std::sync::RwLock<DeviceDescriptor>,
}

impl DescriptorFingerprint {
    /// Wrap a descriptor.
    pub fn new(descriptor: DeviceDescriptor) -> Self {
        Self {
            descriptor: std::sync::RwLock::new(descriptor),
        }
    }

    /// Replace the descriptor, e.g. after the host reports a resize.
    pub fn update(&self, descriptor: DeviceDescriptor) {
        match self.descriptor.write() {
            Ok(mut guard) => *guard = descriptor,
            Err(poisoned) => *poisoned.into_inner() = descriptor,
        }
    }
}

impl Fingerprint for DescriptorFingerprint {
    fn fingerprint(&self) -> String {
        let guard = match self.descriptor.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        encode_descriptor(&guard)
    }
}

/// Fixed fingerprint value, for hosts that compute it elsewhere and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFingerprint(pub String);

impl Fingerprint for StaticFingerprint {
    fn fingerprint(&self) -> String {
        self.0.clone()
    }
}

/// Concatenate descriptor attributes and base64-encode the result.
pub fn encode_descriptor(descriptor: &DeviceDescriptor) -> String {
    let raw = format!(
        "{}|{}x{}",
        descriptor.user_agent, descriptor.screen_width, descriptor.screen_height
    );
    STANDARD.encode(raw.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> DeviceDescriptor {
        DeviceDescriptor::new("Mozilla/5.0 (X11; Linux x86_64)", 1920, 1080)
    }

    #[test]
    fn fingerprint_is_stable() {
        let fp = DescriptorFingerprint::new(desktop());
        assert_eq!(fp.fingerprint(), fp.fingerprint());
    }

    #[test]
    fn fingerprint_encodes_all_attributes() {
        let encoded = encode_descriptor(&DeviceDescriptor::new("ua", 10, 20));
        assert_eq!(encoded, STANDARD.encode("ua|10x20"));
    }

    #[test]
    fn width_change_alters_fingerprint() {
        let fp = DescriptorFingerprint::new(desktop());
        let before = fp.fingerprint();
        fp.update(DeviceDescriptor {
            screen_width: 1280,
            ..desktop()
        });
        assert_ne!(before, fp.fingerprint());
    }

    #[test]
    fn agent_change_alters_fingerprint() {
        let a = encode_descriptor(&desktop());
        let b = encode_descriptor(&DeviceDescriptor {
            user_agent: "Mozilla/5.0 (Macintosh)".to_string(),
            ..desktop()
        });
        assert_ne!(a, b);
    }

    #[test]
    fn static_fingerprint_returns_value() {
        let fp = StaticFingerprint("fixed".to_string());
        assert_eq!(fp.fingerprint(), "fixed");
    }
}
