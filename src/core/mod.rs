pub mod clock;
pub mod navigation;
pub mod onboarding;
pub mod pin_pad;
pub mod services;

pub use clock::{Clock, FixedClock, SystemClock};
pub use navigation::{AppController, Screen};
pub use onboarding::{Onboarding, OnboardingStep};
pub use pin_pad::{PinOutcome, PinPad, PinStep};
