//! Built-in sample subscriptions shown on the dashboard.

use chrono::{Duration, NaiveDate};

use crate::currency::CurrencyCode;
use crate::domain::common::{Identifiable, NamedEntity};
use crate::domain::subscription::{BillingPeriod, Subscription, SubscriptionCategory};
use crate::errors::{AppError, Result};

/// Sample data with payment dates spread relative to `today`.
pub fn sample_subscriptions(today: NaiveDate) -> Vec<Subscription> {
    let rub = CurrencyCode::new("RUB");
    vec![
        Subscription::new(
            "1",
            "Netflix",
            999.0,
            rub.clone(),
            SubscriptionCategory::Streaming,
            today + Duration::days(3),
            BillingPeriod::Month,
        ),
        Subscription::new(
            "2",
            "Spotify",
            299.0,
            rub.clone(),
            SubscriptionCategory::Streaming,
            today + Duration::days(5),
            BillingPeriod::Month,
        ),
        Subscription::new(
            "3",
            "Adobe Creative Cloud",
            2999.0,
            rub,
            SubscriptionCategory::Software,
            today + Duration::days(15),
            BillingPeriod::Month,
        ),
        Subscription::new(
            "4",
            "Coursera",
            49.0,
            CurrencyCode::new("USD"),
            SubscriptionCategory::Education,
            today + Duration::days(29),
            BillingPeriod::Year,
        ),
    ]
}

/// Finds a subscription by exact id or case-insensitive name.
pub fn find<'a>(subscriptions: &'a [Subscription], query: &str) -> Result<&'a Subscription> {
    let needle = query.trim();
    subscriptions
        .iter()
        .find(|sub| sub.id() == needle)
        .or_else(|| {
            subscriptions
                .iter()
                .find(|sub| sub.name().eq_ignore_ascii_case(needle))
        })
        .ok_or_else(|| AppError::NotFound(format!("subscription `{needle}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
    }

    #[test]
    fn sample_ids_are_unique() {
        let subs = sample_subscriptions(today());
        let mut ids: Vec<_> = subs.iter().map(|sub| sub.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), subs.len());
        assert!(subs.iter().all(|sub| sub.cost > 0.0));
    }

    #[test]
    fn find_matches_id_then_name() {
        let subs = sample_subscriptions(today());
        assert_eq!(find(&subs, "3").unwrap().name, "Adobe Creative Cloud");
        assert_eq!(find(&subs, "spotify").unwrap().id, "2");
        assert!(matches!(find(&subs, "Hulu"), Err(AppError::NotFound(_))));
    }
}
