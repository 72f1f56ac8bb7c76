use tracing::warn;

use crate::domain::pin::Pin;
use crate::errors::Result;
use crate::storage::{
    KeyValueStore, KEY_AUTHENTICATED, KEY_BIOMETRIC_ENABLED, KEY_ONBOARDING_COMPLETE,
    KEY_PIN_VERIFIED, KEY_USER_PIN,
};

/// Flags that drive navigation, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFlags {
    pub authenticated: bool,
    pub onboarding_complete: bool,
    pub pin: Option<Pin>,
    pub pin_verified: bool,
    pub biometric_enabled: bool,
    /// Never persisted.
    pub is_premium: bool,
}

impl SessionFlags {
    pub fn load(durable: &dyn KeyValueStore, session: &dyn KeyValueStore) -> Result<Self> {
        let pin = match durable.get(KEY_USER_PIN)? {
            Some(raw) => match Pin::parse(&raw) {
                Ok(pin) => Some(pin),
                Err(_) => {
                    warn!("ignoring malformed stored PIN");
                    None
                }
            },
            None => None,
        };
        Ok(Self {
            authenticated: durable.get_flag(KEY_AUTHENTICATED)?,
            onboarding_complete: durable.get_flag(KEY_ONBOARDING_COMPLETE)?,
            pin,
            pin_verified: session.get_flag(KEY_PIN_VERIFIED)?,
            biometric_enabled: durable.get_flag(KEY_BIOMETRIC_ENABLED)?,
            is_premium: false,
        })
    }

    pub fn pin_set(&self) -> bool {
        self.pin.is_some()
    }
}
