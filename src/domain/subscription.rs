//! Domain types representing tracked subscriptions.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::{to_base, CurrencyCode};
use crate::domain::common::*;

/// A recurring charge the user is tracking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub currency: CurrencyCode,
    pub category: SubscriptionCategory,
    pub next_payment: NaiveDate,
    pub period: BillingPeriod,
}

impl Subscription {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cost: f64,
        currency: CurrencyCode,
        category: SubscriptionCategory,
        next_payment: NaiveDate,
        period: BillingPeriod,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            currency,
            category,
            next_payment,
            period,
        }
    }

    /// Monthly cost converted to the base currency.
    pub fn monthly_cost_in_base(&self) -> f64 {
        let monthly = match self.period {
            BillingPeriod::Month => self.cost,
            BillingPeriod::Year => self.cost / 12.0,
        };
        to_base(monthly, &self.currency)
    }

    /// Yearly cost converted to the base currency.
    pub fn yearly_cost_in_base(&self) -> f64 {
        let yearly = match self.period {
            BillingPeriod::Month => self.cost * 12.0,
            BillingPeriod::Year => self.cost,
        };
        to_base(yearly, &self.currency)
    }
}

impl Identifiable for Subscription {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Subscription {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Subscription {
    fn display_label(&self) -> String {
        format!(
            "{} ({} {}/{})",
            self.name,
            self.cost,
            self.currency,
            self.period.short_label()
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionCategory {
    Streaming,
    Software,
    Education,
    Other,
}

impl fmt::Display for SubscriptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubscriptionCategory::Streaming => "Streaming",
            SubscriptionCategory::Software => "Software",
            SubscriptionCategory::Education => "Education",
            SubscriptionCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Month,
    Year,
}

impl BillingPeriod {
    pub fn short_label(&self) -> &'static str {
        match self {
            BillingPeriod::Month => "mo",
            BillingPeriod::Year => "yr",
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillingPeriod::Month => "per month",
            BillingPeriod::Year => "per year",
        };
        f.write_str(label)
    }
}
