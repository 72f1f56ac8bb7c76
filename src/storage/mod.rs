//! Key-value persistence with a durable and a session-scoped flavour.

pub mod json_backend;
pub mod memory;

use crate::errors::Result;

pub use json_backend::JsonStore;
pub use memory::MemoryStore;

/// Durable: signed-in flag.
pub const KEY_AUTHENTICATED: &str = "isAuthenticated";
/// Durable: onboarding carousel has been completed or skipped.
pub const KEY_ONBOARDING_COMPLETE: &str = "onboardingComplete";
/// Durable: the user's four digit PIN.
pub const KEY_USER_PIN: &str = "userPin";
/// Durable: biometric unlock offered on the PIN screen.
pub const KEY_BIOMETRIC_ENABLED: &str = "biometricEnabled";
/// Session-scoped: PIN was verified during this session.
pub const KEY_PIN_VERIFIED: &str = "pinVerified";

const TRUE_VALUE: &str = "true";
const FALSE_VALUE: &str = "false";

/// Abstraction over string key-value stores.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Reads a boolean flag; anything other than `"true"` counts as false.
    fn get_flag(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.as_deref() == Some(TRUE_VALUE))
    }

    fn set_flag(&mut self, key: &str, value: bool) -> Result<()> {
        self.set(key, if value { TRUE_VALUE } else { FALSE_VALUE })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_round_trip_as_strings() {
        let mut store = MemoryStore::new();
        assert!(!store.get_flag(KEY_AUTHENTICATED).unwrap());

        store.set_flag(KEY_AUTHENTICATED, true).unwrap();
        assert_eq!(
            store.get(KEY_AUTHENTICATED).unwrap().as_deref(),
            Some("true")
        );
        assert!(store.get_flag(KEY_AUTHENTICATED).unwrap());

        store.set_flag(KEY_AUTHENTICATED, false).unwrap();
        assert_eq!(
            store.get(KEY_AUTHENTICATED).unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn unexpected_values_read_as_false() {
        let mut store = MemoryStore::new();
        store.set(KEY_ONBOARDING_COMPLETE, "yes").unwrap();
        assert!(!store.get_flag(KEY_ONBOARDING_COMPLETE).unwrap());
    }
}
