use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency every total is reported in.
pub const BASE_CURRENCY: &str = "RUB";

/// Fixed multiplier applied to any non-base amount.
pub const FOREIGN_TO_BASE_RATE: f64 = 90.0;

const BASE_SYMBOL: &str = "₽";

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    /// Keeps the code verbatim; only the exact `RUB` is the base currency.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn base() -> Self {
        Self::new(BASE_CURRENCY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_base(&self) -> bool {
        self.0 == BASE_CURRENCY
    }

    /// Multiplier converting one unit of this currency into the base currency.
    pub fn rate_to_base(&self) -> f64 {
        if self.is_base() {
            1.0
        } else {
            FOREIGN_TO_BASE_RATE
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::base()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn to_base(amount: f64, currency: &CurrencyCode) -> f64 {
    amount * currency.rate_to_base()
}

/// Formats a base-currency amount Russian-locale style, e.g. `4 705,75 ₽`.
pub fn format_base(amount: f64) -> String {
    format!("{} {}", format_amount(amount), BASE_SYMBOL)
}

/// Groups thousands with spaces, uses a decimal comma and at most two
/// fraction digits with trailing zeros dropped.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut out = String::new();
    if negative && cents > 0 {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if fraction != 0 {
        out.push(',');
        if fraction % 10 == 0 {
            out.push_str(&(fraction / 10).to_string());
        } else {
            out.push_str(&format!("{fraction:02}"));
        }
    }
    out
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}
