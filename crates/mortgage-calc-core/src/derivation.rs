//! Derivation engine.
//!
//! One pass evaluates every derived value from the current inputs in a fixed
//! order, each stage reading only stages already computed in the same pass.
//! All arithmetic is plain `f64`; non-finite results are returned, not
//! rejected.

use serde::{Deserialize, Serialize};

use crate::inputs::{Field, InputState};
use crate::types::float_repr;

/// Interest code units per percentage point.
pub const INTEREST_CODE_SCALE: f64 = 20.0;

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Values derived from an [`InputState`]. Never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedValues {
    /// Nominal annual rate in percent (15.0 = 15%).
    #[serde(with = "float_repr")]
    pub interest_rate_percent: f64,
    /// Number of monthly payments over the term.
    #[serde(with = "float_repr")]
    pub total_payments: f64,
    /// Periodic rate as a fraction (0.0125 = 1.25% per month).
    #[serde(with = "float_repr")]
    pub monthly_interest_rate: f64,
    #[serde(with = "float_repr")]
    pub monthly_payment: f64,
    #[serde(with = "float_repr")]
    pub total_paid: f64,
    #[serde(with = "float_repr")]
    pub interest_paid: f64,
}

impl DerivedValues {
    pub fn is_finite(&self) -> bool {
        self.non_finite_fields().is_empty()
    }

    /// Names of the derived values that are NaN or infinite.
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        [
            ("interest_rate_percent", self.interest_rate_percent),
            ("total_payments", self.total_payments),
            ("monthly_interest_rate", self.monthly_interest_rate),
            ("monthly_payment", self.monthly_payment),
            ("total_paid", self.total_paid),
            ("interest_paid", self.interest_paid),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
        .collect()
    }

    /// Bitwise equality, so that two NaN results compare equal.
    pub fn bit_identical(&self, other: &Self) -> bool {
        self.interest_rate_percent.to_bits() == other.interest_rate_percent.to_bits()
            && self.total_payments.to_bits() == other.total_payments.to_bits()
            && self.monthly_interest_rate.to_bits() == other.monthly_interest_rate.to_bits()
            && self.monthly_payment.to_bits() == other.monthly_payment.to_bits()
            && self.total_paid.to_bits() == other.total_paid.to_bits()
            && self.interest_paid.to_bits() == other.interest_paid.to_bits()
    }
}

/// Standard fixed-rate amortization payment.
///
/// `amount * g * rate / (g - 1)` with `g = (1 + rate)^periods`. A zero rate
/// gives `0 / 0` and therefore `NaN`; zero periods with a nonzero rate
/// divide by zero and give an infinity.
pub fn amortized_payment(amount: f64, periodic_rate: f64, periods: f64) -> f64 {
    let growth = (1.0 + periodic_rate).powf(periods);
    amount * growth * periodic_rate / (growth - 1.0)
}

/// Run one recomputation pass.
pub fn derive(inputs: &InputState) -> DerivedValues {
    let amount = inputs.numeric(Field::Amount);
    let years = inputs.numeric(Field::Years);
    let interest = inputs.numeric(Field::Interest);

    let interest_rate_percent = interest / INTEREST_CODE_SCALE;
    let total_payments = years * MONTHS_PER_YEAR;
    let monthly_interest_rate = interest_rate_percent / 100.0 / MONTHS_PER_YEAR;
    let monthly_payment = amortized_payment(amount, monthly_interest_rate, total_payments);
    let total_paid = monthly_payment * total_payments;
    let interest_paid = total_paid - amount;

    DerivedValues {
        interest_rate_percent,
        total_payments,
        monthly_interest_rate,
        monthly_payment,
        total_paid,
        interest_paid,
    }
}
