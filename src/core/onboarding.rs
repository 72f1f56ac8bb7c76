/// One introductory slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SLIDES: [Slide; 3] = [
    Slide {
        title: "Spending control",
        description: "Track every subscription in one place and see exactly what you spend per month and per year.",
    },
    Slide {
        title: "Smart reminders",
        description: "Get reminded 24 and 48 hours before a charge so no payment catches you by surprise.",
    },
    Slide {
        title: "Save money",
        description: "Spot the subscriptions you no longer use and cancel them to save up to 30% of your budget.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Slide(usize),
    Completed,
}

/// Carousel position within [`SLIDES`].
#[derive(Debug, Clone, Default)]
pub struct Onboarding {
    current: usize,
}

impl Onboarding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        SLIDES.len()
    }

    pub fn current_slide(&self) -> &'static Slide {
        &SLIDES[self.current.min(SLIDES.len() - 1)]
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= SLIDES.len()
    }

    /// Skip is offered on every slide but the last.
    pub fn can_skip(&self) -> bool {
        !self.is_last()
    }

    pub fn next(&mut self) -> OnboardingStep {
        if self.is_last() {
            OnboardingStep::Completed
        } else {
            self.current += 1;
            OnboardingStep::Slide(self.current)
        }
    }

    pub fn skip(&mut self) -> OnboardingStep {
        OnboardingStep::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_every_slide_then_completes() {
        let mut onboarding = Onboarding::new();
        assert_eq!(onboarding.current_slide().title, "Spending control");
        assert_eq!(onboarding.next(), OnboardingStep::Slide(1));
        assert_eq!(onboarding.next(), OnboardingStep::Slide(2));
        assert!(onboarding.is_last());
        assert!(!onboarding.can_skip());
        assert_eq!(onboarding.next(), OnboardingStep::Completed);
    }

    #[test]
    fn skip_completes_immediately() {
        let mut onboarding = Onboarding::new();
        assert!(onboarding.can_skip());
        assert_eq!(onboarding.skip(), OnboardingStep::Completed);
    }
}
