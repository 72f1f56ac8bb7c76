//! App bootstrap and screen navigation.
//!
//! The screen is derived from persisted flags in a fixed order: signed in,
//! onboarding done, then PIN unlocked for this session. Each completion
//! callback writes its flag and the next screen falls out of the same rule.

use std::fmt;

use tracing::{debug, info};

use crate::core::onboarding::{Onboarding, OnboardingStep};
use crate::core::pin_pad::{PinOutcome, PinPad};
use crate::domain::SessionFlags;
use crate::errors::{AppError, Result};
use crate::storage::{
    KeyValueStore, KEY_AUTHENTICATED, KEY_BIOMETRIC_ENABLED, KEY_ONBOARDING_COMPLETE,
    KEY_PIN_VERIFIED, KEY_USER_PIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Auth,
    Onboarding,
    PinVerify,
    /// PIN creation opened from the main app's settings.
    PinSetup,
    Main,
}

impl Screen {
    /// First failing condition wins; all passing shows the main app.
    pub fn resolve(flags: &SessionFlags) -> Screen {
        if !flags.authenticated {
            Screen::Auth
        } else if !flags.onboarding_complete {
            Screen::Onboarding
        } else if flags.pin_set() && !flags.pin_verified {
            Screen::PinVerify
        } else {
            Screen::Main
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Auth => "auth",
            Screen::Onboarding => "onboarding",
            Screen::PinVerify => "locked",
            Screen::PinSetup => "pin-setup",
            Screen::Main => "main",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Owns the session flags and the stores they are written to.
pub struct AppController {
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
    flags: SessionFlags,
    onboarding: Onboarding,
    verify_pad: Option<PinPad>,
    setup_pad: Option<PinPad>,
}

impl AppController {
    pub fn new(durable: Box<dyn KeyValueStore>, session: Box<dyn KeyValueStore>) -> Result<Self> {
        let flags = SessionFlags::load(durable.as_ref(), session.as_ref())?;
        let controller = Self {
            durable,
            session,
            flags,
            onboarding: Onboarding::new(),
            verify_pad: None,
            setup_pad: None,
        };
        info!(screen = %controller.screen(), "session bootstrapped");
        Ok(controller)
    }

    pub fn screen(&self) -> Screen {
        if self.setup_pad.is_some() {
            Screen::PinSetup
        } else {
            Screen::resolve(&self.flags)
        }
    }

    pub fn flags(&self) -> &SessionFlags {
        &self.flags
    }

    pub fn onboarding(&self) -> &Onboarding {
        &self.onboarding
    }

    /// Pad for the PIN screen currently shown, if any.
    pub fn pin_pad(&self) -> Option<&PinPad> {
        match self.screen() {
            Screen::PinSetup => self.setup_pad.as_ref(),
            Screen::PinVerify => self.verify_pad.as_ref(),
            _ => None,
        }
    }

    pub fn complete_auth(&mut self) -> Result<Screen> {
        self.durable.set_flag(KEY_AUTHENTICATED, true)?;
        self.flags.authenticated = true;
        Ok(self.transitioned("auth completed"))
    }

    pub fn complete_onboarding(&mut self) -> Result<Screen> {
        self.durable.set_flag(KEY_ONBOARDING_COMPLETE, true)?;
        self.flags.onboarding_complete = true;
        self.onboarding = Onboarding::new();
        Ok(self.transitioned("onboarding completed"))
    }

    pub fn complete_pin_verification(&mut self) -> Result<Screen> {
        self.session.set_flag(KEY_PIN_VERIFIED, true)?;
        self.flags.pin_verified = true;
        self.verify_pad = None;
        Ok(self.transitioned("PIN verified"))
    }

    pub fn onboarding_next(&mut self) -> Result<Screen> {
        self.require(Screen::Onboarding)?;
        match self.onboarding.next() {
            OnboardingStep::Slide(_) => Ok(Screen::Onboarding),
            OnboardingStep::Completed => self.complete_onboarding(),
        }
    }

    pub fn onboarding_skip(&mut self) -> Result<Screen> {
        self.require(Screen::Onboarding)?;
        if !self.onboarding.can_skip() {
            return Err(AppError::InvalidInput(
                "nothing left to skip; use next to finish".into(),
            ));
        }
        match self.onboarding.skip() {
            OnboardingStep::Slide(_) => Ok(Screen::Onboarding),
            OnboardingStep::Completed => self.complete_onboarding(),
        }
    }

    /// Feeds one keypad character into the active PIN screen.
    pub fn press_pin(&mut self, key: char) -> Result<PinOutcome> {
        let outcome = self.active_pad_mut()?.press(key)?;
        self.apply_pin_outcome(&outcome)?;
        Ok(outcome)
    }

    pub fn pin_backspace(&mut self) -> Result<()> {
        self.active_pad_mut()?.backspace();
        Ok(())
    }

    pub fn forgot_pin(&mut self) -> Result<()> {
        self.require(Screen::PinVerify)?;
        self.active_pad_mut()?.clear();
        Ok(())
    }

    pub fn biometric_unlock(&mut self) -> Result<PinOutcome> {
        self.require(Screen::PinVerify)?;
        let outcome = self.active_pad_mut()?.biometric()?;
        self.apply_pin_outcome(&outcome)?;
        Ok(outcome)
    }

    pub fn begin_pin_setup(&mut self) -> Result<()> {
        self.require(Screen::Main)?;
        self.setup_pad = Some(PinPad::create());
        debug!("PIN setup started");
        Ok(())
    }

    pub fn cancel_pin_setup(&mut self) -> Result<Screen> {
        self.require(Screen::PinSetup)?;
        self.setup_pad = None;
        Ok(self.transitioned("PIN setup cancelled"))
    }

    pub fn set_biometric(&mut self, enabled: bool) -> Result<()> {
        self.durable.set_flag(KEY_BIOMETRIC_ENABLED, enabled)?;
        self.flags.biometric_enabled = enabled;
        info!(enabled, "biometric preference updated");
        Ok(())
    }

    pub fn set_premium(&mut self, enabled: bool) {
        self.flags.is_premium = enabled;
        info!(enabled, "premium flag updated");
    }

    /// Forgets this session's PIN verification.
    pub fn lock(&mut self) -> Result<Screen> {
        self.session.remove(KEY_PIN_VERIFIED)?;
        self.flags.pin_verified = false;
        self.verify_pad = None;
        self.setup_pad = None;
        Ok(self.transitioned("session locked"))
    }

    /// Signs out; onboarding and the stored PIN are kept.
    pub fn sign_out(&mut self) -> Result<Screen> {
        self.durable.set_flag(KEY_AUTHENTICATED, false)?;
        self.session.remove(KEY_PIN_VERIFIED)?;
        self.flags.authenticated = false;
        self.flags.pin_verified = false;
        self.verify_pad = None;
        self.setup_pad = None;
        Ok(self.transitioned("signed out"))
    }

    fn apply_pin_outcome(&mut self, outcome: &PinOutcome) -> Result<()> {
        match outcome {
            PinOutcome::Verified => {
                self.complete_pin_verification()?;
            }
            PinOutcome::Created(pin) => {
                self.durable.set(KEY_USER_PIN, pin.as_str())?;
                self.flags.pin = Some(pin.clone());
                self.setup_pad = None;
                self.complete_pin_verification()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn active_pad_mut(&mut self) -> Result<&mut PinPad> {
        match self.screen() {
            Screen::PinSetup => self
                .setup_pad
                .as_mut()
                .ok_or_else(|| AppError::InvalidInput("no PIN entry in progress".into())),
            Screen::PinVerify => {
                let stored = self.flags.pin.clone();
                let biometric = self.flags.biometric_enabled;
                Ok(self
                    .verify_pad
                    .get_or_insert_with(|| PinPad::verify(stored, biometric)))
            }
            other => Err(AppError::InvalidInput(format!(
                "no PIN entry on the {other} screen"
            ))),
        }
    }

    fn require(&self, expected: Screen) -> Result<()> {
        let current = self.screen();
        if current == expected {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "only available on the {expected} screen (current: {current})"
            )))
        }
    }

    fn transitioned(&self, reason: &str) -> Screen {
        let screen = self.screen();
        info!(%screen, reason, "navigation");
        screen
    }
}
