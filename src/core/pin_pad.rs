//! Keypad state machine behind the lock screen.
//!
//! Verify mode compares a single entry against the stored PIN. Create mode
//! collects an entry, then a confirmation, and only yields a PIN once both
//! match.

use tracing::{debug, info};

use crate::domain::pin::{Pin, PIN_LENGTH};
use crate::errors::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinMode {
    Create,
    Verify {
        expected: Pin,
        biometric_enabled: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinStep {
    Enter,
    Confirm,
}

/// Result of feeding one input into the pad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinOutcome {
    /// Field not full yet, or the digit was ignored.
    Pending,
    /// Create mode: entry complete, confirmation requested.
    ConfirmRequested,
    /// Verify mode: entry matched.
    Verified,
    /// Create mode: confirmation matched the entry.
    Created(Pin),
    /// Verify mode: wrong PIN, entry cleared.
    Rejected,
    /// Create mode: confirmation differed, confirmation cleared.
    ConfirmationMismatch,
}

#[derive(Debug, Clone)]
pub struct PinPad {
    mode: PinMode,
    step: PinStep,
    entry: String,
    confirmation: String,
}

impl PinPad {
    pub fn create() -> Self {
        Self::with_mode(PinMode::Create)
    }

    /// Verify pad; falls back to the default PIN when none is stored.
    pub fn verify(stored: Option<Pin>, biometric_enabled: bool) -> Self {
        Self::with_mode(PinMode::Verify {
            expected: stored.unwrap_or_else(Pin::default_pin),
            biometric_enabled,
        })
    }

    fn with_mode(mode: PinMode) -> Self {
        Self {
            mode,
            step: PinStep::Enter,
            entry: String::new(),
            confirmation: String::new(),
        }
    }

    pub fn step(&self) -> PinStep {
        self.step
    }

    pub fn biometric_available(&self) -> bool {
        matches!(
            self.mode,
            PinMode::Verify {
                biometric_enabled: true,
                ..
            }
        )
    }

    /// Number of digits in the field currently being edited.
    pub fn filled(&self) -> usize {
        self.active_field().len()
    }

    pub fn title(&self) -> &'static str {
        match (&self.mode, self.step) {
            (PinMode::Create, PinStep::Enter) => "Create a PIN",
            (PinMode::Create, PinStep::Confirm) => "Confirm your PIN",
            (PinMode::Verify { .. }, _) => "Enter your PIN",
        }
    }

    pub fn press(&mut self, key: char) -> Result<PinOutcome> {
        if !key.is_ascii_digit() {
            return Err(AppError::InvalidInput(format!(
                "`{key}` is not a digit (0-9)"
            )));
        }
        if self.filled() >= PIN_LENGTH {
            return Ok(PinOutcome::Pending);
        }
        self.active_field_mut().push(key);
        Ok(self.evaluate())
    }

    pub fn backspace(&mut self) {
        self.active_field_mut().pop();
    }

    /// "Forgot PIN": wipes the current field.
    pub fn clear(&mut self) {
        self.active_field_mut().clear();
    }

    /// Simulated biometric check; only offered in verify mode when enabled.
    pub fn biometric(&self) -> Result<PinOutcome> {
        if self.biometric_available() {
            info!("biometric unlock accepted");
            Ok(PinOutcome::Verified)
        } else {
            Err(AppError::InvalidInput(
                "biometric unlock is not available here".into(),
            ))
        }
    }

    fn evaluate(&mut self) -> PinOutcome {
        match (&self.mode, self.step) {
            (PinMode::Verify { expected, .. }, _) => {
                if self.entry.len() < PIN_LENGTH {
                    return PinOutcome::Pending;
                }
                if self.entry == expected.as_str() {
                    info!("PIN verified");
                    PinOutcome::Verified
                } else {
                    debug!("PIN rejected");
                    self.entry.clear();
                    PinOutcome::Rejected
                }
            }
            (PinMode::Create, PinStep::Enter) => {
                if self.entry.len() < PIN_LENGTH {
                    return PinOutcome::Pending;
                }
                self.step = PinStep::Confirm;
                PinOutcome::ConfirmRequested
            }
            (PinMode::Create, PinStep::Confirm) => {
                if self.confirmation.len() < PIN_LENGTH {
                    return PinOutcome::Pending;
                }
                if self.confirmation == self.entry {
                    match Pin::parse(&self.entry) {
                        Ok(pin) => {
                            info!("new PIN confirmed");
                            PinOutcome::Created(pin)
                        }
                        // Fields only ever hold ASCII digits.
                        Err(_) => {
                            self.confirmation.clear();
                            PinOutcome::ConfirmationMismatch
                        }
                    }
                } else {
                    debug!("PIN confirmation mismatch");
                    self.confirmation.clear();
                    PinOutcome::ConfirmationMismatch
                }
            }
        }
    }

    fn active_field(&self) -> &String {
        match (&self.mode, self.step) {
            (PinMode::Create, PinStep::Confirm) => &self.confirmation,
            _ => &self.entry,
        }
    }

    fn active_field_mut(&mut self) -> &mut String {
        match (&self.mode, self.step) {
            (PinMode::Create, PinStep::Confirm) => &mut self.confirmation,
            _ => &mut self.entry,
        }
    }
}
