use std::fmt;

use crate::errors::{AppError, Result};

pub const PIN_LENGTH: usize = 4;

/// PIN assumed when the user never stored one.
pub const DEFAULT_PIN: &str = "1234";

/// A validated four digit PIN.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() == PIN_LENGTH && raw.chars().all(|ch| ch.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(AppError::InvalidInput(format!(
                "PIN must be exactly {PIN_LENGTH} digits"
            )))
        }
    }

    pub fn default_pin() -> Self {
        Self(DEFAULT_PIN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the digits themselves.
impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}
