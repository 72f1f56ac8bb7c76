use tracing::debug;

use crate::domain::Subscription;

/// Subscriptions billed through the platform app stores.
pub const APP_STORE_SUBSCRIPTIONS: &[&str] = &["Netflix", "Spotify"];

pub const CANCELLATION_URL: &str = "https://example.com/cancel-subscription";

pub const PREMIUM_FEATURES: &[&str] = &[
    "Quick subscription cancellation",
    "Unlimited subscriptions",
    "Charts and detailed analytics",
    "Data export",
];

/// What the cancel dialog shows for a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancellationGuidance {
    /// Free tier: pitch Premium instead of instructions.
    Upsell { features: Vec<&'static str> },
    AppStore {
        subscription: String,
        steps: Vec<String>,
    },
    Website {
        subscription: String,
        steps: Vec<String>,
        url: &'static str,
    },
}

impl CancellationGuidance {
    pub fn is_upsell(&self) -> bool {
        matches!(self, CancellationGuidance::Upsell { .. })
    }
}

pub struct CancellationService;

impl CancellationService {
    pub fn is_app_store(subscription: &Subscription) -> bool {
        APP_STORE_SUBSCRIPTIONS.contains(&subscription.name.as_str())
    }

    pub fn guidance(subscription: &Subscription, is_premium: bool) -> CancellationGuidance {
        if !is_premium {
            debug!(subscription = %subscription.name, "cancellation gated behind premium");
            return CancellationGuidance::Upsell {
                features: PREMIUM_FEATURES.to_vec(),
            };
        }

        let name = subscription.name.clone();
        if Self::is_app_store(subscription) {
            CancellationGuidance::AppStore {
                steps: vec![
                    "Open your device Settings".to_string(),
                    "Go to \"Subscriptions\"".to_string(),
                    format!("Find {name}"),
                    "Tap \"Cancel subscription\"".to_string(),
                ],
                subscription: name,
            }
        } else {
            CancellationGuidance::Website {
                subscription: name,
                steps: vec![
                    "Sign in to your account on the service's website".to_string(),
                    "Open your profile settings".to_string(),
                    "Find the \"Subscription\" or \"Billing\" section".to_string(),
                    "Click \"Cancel subscription\"".to_string(),
                ],
                url: CANCELLATION_URL,
            }
        }
    }
}
