use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::domain::{Subscription, SubscriptionCategory};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const URGENT_WITHIN_DAYS: i64 = 2;
const SOON_WITHIN_DAYS: i64 = 7;

/// Urgency bucket for the next charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Urgent,
    Soon,
    Ok,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Urgent => "urgent",
            PaymentStatus::Soon => "soon",
            PaymentStatus::Ok => "ok",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingPayment<'a> {
    pub subscription: &'a Subscription,
    pub days_until: i64,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown<'a> {
    pub category: SubscriptionCategory,
    pub subscriptions: Vec<&'a Subscription>,
    /// Monthly spend in the base currency.
    pub monthly_total: f64,
    /// Share of the overall monthly total, 0-100.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary<'a> {
    pub monthly_total: f64,
    pub yearly_total: f64,
    pub count: usize,
    pub upcoming: Vec<UpcomingPayment<'a>>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn monthly_total(subscriptions: &[Subscription]) -> f64 {
        subscriptions
            .iter()
            .map(Subscription::monthly_cost_in_base)
            .sum()
    }

    pub fn yearly_total(subscriptions: &[Subscription]) -> f64 {
        subscriptions
            .iter()
            .map(Subscription::yearly_cost_in_base)
            .sum()
    }

    /// Whole days until local midnight of `date`, rounded up.
    pub fn days_until(date: NaiveDate, now: NaiveDateTime) -> i64 {
        Self::days_until_in(&Local, date, now)
    }

    /// Measures between real instants in `zone`, so a 25-hour fall-back day
    /// counts as more than one day.
    pub fn days_until_in<Tz: TimeZone>(zone: &Tz, date: NaiveDate, now: NaiveDateTime) -> i64 {
        let due = date.and_time(NaiveTime::MIN);
        let elapsed = match (
            zone.from_local_datetime(&due).earliest(),
            zone.from_local_datetime(&now).earliest(),
        ) {
            (Some(due_at), Some(now_at)) => due_at.signed_duration_since(now_at),
            // Wall time skipped by a spring-forward gap.
            _ => due - now,
        };
        (elapsed.num_milliseconds() as f64 / MILLIS_PER_DAY).ceil() as i64
    }

    pub fn payment_status(days: i64) -> PaymentStatus {
        if days <= URGENT_WITHIN_DAYS {
            PaymentStatus::Urgent
        } else if days <= SOON_WITHIN_DAYS {
            PaymentStatus::Soon
        } else {
            PaymentStatus::Ok
        }
    }

    /// Groups by category in order of first appearance.
    pub fn group_by_category(
        subscriptions: &[Subscription],
    ) -> Vec<(SubscriptionCategory, Vec<&Subscription>)> {
        let mut groups: Vec<(SubscriptionCategory, Vec<&Subscription>)> = Vec::new();
        for sub in subscriptions {
            match groups.iter_mut().find(|(category, _)| *category == sub.category) {
                Some((_, members)) => members.push(sub),
                None => groups.push((sub.category, vec![sub])),
            }
        }
        groups
    }

    pub fn category_breakdown(subscriptions: &[Subscription]) -> Vec<CategoryBreakdown<'_>> {
        let overall = Self::monthly_total(subscriptions);
        Self::group_by_category(subscriptions)
            .into_iter()
            .map(|(category, members)| {
                let monthly_total: f64 = members
                    .iter()
                    .map(|sub| sub.monthly_cost_in_base())
                    .sum();
                let percentage = if overall > 0.0 {
                    monthly_total / overall * 100.0
                } else {
                    0.0
                };
                CategoryBreakdown {
                    category,
                    subscriptions: members,
                    monthly_total,
                    percentage,
                }
            })
            .collect()
    }

    /// Subscriptions ordered by next payment date, earliest first.
    pub fn upcoming(subscriptions: &[Subscription], now: NaiveDateTime) -> Vec<UpcomingPayment<'_>> {
        let mut ordered: Vec<&Subscription> = subscriptions.iter().collect();
        ordered.sort_by_key(|sub| sub.next_payment);
        ordered
            .into_iter()
            .map(|subscription| {
                let days_until = Self::days_until(subscription.next_payment, now);
                UpcomingPayment {
                    subscription,
                    days_until,
                    status: Self::payment_status(days_until),
                }
            })
            .collect()
    }

    pub fn dashboard(subscriptions: &[Subscription], now: NaiveDateTime) -> DashboardSummary<'_> {
        DashboardSummary {
            monthly_total: Self::monthly_total(subscriptions),
            yearly_total: Self::yearly_total(subscriptions),
            count: subscriptions.len(),
            upcoming: Self::upcoming(subscriptions, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, LocalResult, Utc};

    use super::*;
    use crate::currency::CurrencyCode;
    use crate::domain::catalog::sample_subscriptions;
    use crate::domain::BillingPeriod;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn sub(
        id: &str,
        cost: f64,
        currency: &str,
        category: SubscriptionCategory,
        next: NaiveDate,
        period: BillingPeriod,
    ) -> Subscription {
        Subscription::new(
            id,
            format!("Sub {id}"),
            cost,
            CurrencyCode::new(currency),
            category,
            next,
            period,
        )
    }

    #[test]
    fn rub_monthly_total_is_exact_sum() {
        let subs = vec![
            sub("a", 999.0, "RUB", SubscriptionCategory::Streaming, date(2026, 2, 3), BillingPeriod::Month),
            sub("b", 299.0, "RUB", SubscriptionCategory::Streaming, date(2026, 2, 5), BillingPeriod::Month),
            sub("c", 2999.0, "RUB", SubscriptionCategory::Software, date(2026, 2, 15), BillingPeriod::Month),
        ];
        assert_eq!(SummaryService::monthly_total(&subs), 4297.0);
        assert_eq!(SummaryService::yearly_total(&subs), 4297.0 * 12.0);
    }

    #[test]
    fn yearly_plan_contributes_a_twelfth_monthly() {
        let subs = vec![sub(
            "y",
            1200.0,
            "RUB",
            SubscriptionCategory::Other,
            date(2026, 3, 1),
            BillingPeriod::Year,
        )];
        assert_eq!(SummaryService::monthly_total(&subs), 100.0);
        assert_eq!(SummaryService::yearly_total(&subs), 1200.0);
    }

    #[test]
    fn sample_catalog_totals() {
        let subs = sample_subscriptions(date(2026, 1, 31));
        // 999 + 299 + 2999 + 49 / 12 * 90
        let monthly = SummaryService::monthly_total(&subs);
        assert!((monthly - 4664.5).abs() < 1e-9, "monthly was {monthly}");
        // (999 + 299 + 2999) * 12 + 49 * 90
        assert_eq!(SummaryService::yearly_total(&subs), 55974.0);
    }

    #[test]
    fn days_until_rounds_partial_days_up() {
        let due = date(2026, 2, 3);
        assert_eq!(SummaryService::days_until(due, at(2026, 2, 3, 0)), 0);
        assert_eq!(SummaryService::days_until(due, at(2026, 2, 2, 23)), 1);
        assert_eq!(SummaryService::days_until(due, at(2026, 2, 1, 0)), 2);
        assert_eq!(SummaryService::days_until(due, at(2026, 1, 31, 12)), 3);
        assert_eq!(SummaryService::days_until(due, at(2026, 2, 4, 12)), -1);
    }

    #[test]
    fn days_until_decreases_as_now_advances() {
        let due = date(2026, 3, 1);
        let mut previous = i64::MAX;
        for hour in 0..(24 * 20) {
            let now = at(2026, 2, 1, 0) + Duration::hours(hour);
            let days = SummaryService::days_until_in(&Utc, due, now);
            assert!(days <= previous);
            previous = days;
        }
    }

    /// +03:00 until 2026-10-25 00:00 UTC, +02:00 afterwards.
    #[derive(Debug, Clone, Copy)]
    struct FallBackZone;

    impl FallBackZone {
        fn switch() -> NaiveDateTime {
            at(2026, 10, 25, 0)
        }

        fn summer() -> FixedOffset {
            FixedOffset::east_opt(3 * 3600).unwrap()
        }

        fn winter() -> FixedOffset {
            FixedOffset::east_opt(2 * 3600).unwrap()
        }
    }

    impl TimeZone for FallBackZone {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            FallBackZone
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let as_summer = *local - Duration::hours(3) < Self::switch();
            let as_winter = *local - Duration::hours(2) >= Self::switch();
            match (as_summer, as_winter) {
                (true, true) => LocalResult::Ambiguous(Self::summer(), Self::winter()),
                (true, false) => LocalResult::Single(Self::summer()),
                (false, true) => LocalResult::Single(Self::winter()),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch() {
                Self::summer()
            } else {
                Self::winter()
            }
        }
    }

    #[test]
    fn fall_back_day_counts_its_extra_hour() {
        let due = date(2026, 10, 26);
        let now = at(2026, 10, 24, 0);
        // 49 real hours between the two local midnights.
        assert_eq!(SummaryService::days_until_in(&FallBackZone, due, now), 3);
        assert_eq!(SummaryService::days_until_in(&FallBackZone::summer(), due, now), 2);
        assert_eq!(SummaryService::days_until_in(&Utc, due, now), 2);
    }

    #[test]
    fn status_thresholds_are_inclusive() {
        assert_eq!(SummaryService::payment_status(-3), PaymentStatus::Urgent);
        assert_eq!(SummaryService::payment_status(2), PaymentStatus::Urgent);
        assert_eq!(SummaryService::payment_status(3), PaymentStatus::Soon);
        assert_eq!(SummaryService::payment_status(7), PaymentStatus::Soon);
        assert_eq!(SummaryService::payment_status(8), PaymentStatus::Ok);
    }

    #[test]
    fn grouping_keeps_first_occurrence_order() {
        let subs = vec![
            sub("1", 1.0, "RUB", SubscriptionCategory::Software, date(2026, 1, 1), BillingPeriod::Month),
            sub("2", 1.0, "RUB", SubscriptionCategory::Streaming, date(2026, 1, 1), BillingPeriod::Month),
            sub("3", 1.0, "RUB", SubscriptionCategory::Software, date(2026, 1, 1), BillingPeriod::Month),
            sub("4", 1.0, "RUB", SubscriptionCategory::Education, date(2026, 1, 1), BillingPeriod::Month),
        ];
        let groups = SummaryService::group_by_category(&subs);
        let order: Vec<_> = groups.iter().map(|(category, _)| *category).collect();
        assert_eq!(
            order,
            vec![
                SubscriptionCategory::Software,
                SubscriptionCategory::Streaming,
                SubscriptionCategory::Education
            ]
        );
        let software_ids: Vec<_> = groups[0].1.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(software_ids, vec!["1", "3"]);
    }

    #[test]
    fn breakdown_percentages_cover_the_whole() {
        let subs = sample_subscriptions(date(2026, 1, 31));
        let breakdown = SummaryService::category_breakdown(&subs);
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].category, SubscriptionCategory::Streaming);
        assert_eq!(breakdown[0].monthly_total, 1298.0);
        let total: f64 = breakdown.iter().map(|entry| entry.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_of_nothing_is_empty() {
        assert!(SummaryService::category_breakdown(&[]).is_empty());
        assert_eq!(SummaryService::monthly_total(&[]), 0.0);
    }

    #[test]
    fn upcoming_is_sorted_by_date() {
        let subs = vec![
            sub("late", 1.0, "RUB", SubscriptionCategory::Other, date(2026, 2, 20), BillingPeriod::Month),
            sub("early", 1.0, "RUB", SubscriptionCategory::Other, date(2026, 2, 2), BillingPeriod::Month),
            sub("mid", 1.0, "RUB", SubscriptionCategory::Other, date(2026, 2, 6), BillingPeriod::Month),
        ];
        let upcoming = SummaryService::upcoming(&subs, at(2026, 2, 1, 9));
        let ids: Vec<_> = upcoming.iter().map(|p| p.subscription.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "mid", "late"]);
        let statuses: Vec<_> = upcoming.iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![PaymentStatus::Urgent, PaymentStatus::Soon, PaymentStatus::Ok]
        );
    }
}
