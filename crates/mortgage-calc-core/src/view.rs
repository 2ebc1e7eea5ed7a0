//! Display texts for one snapshot, as the calculator widget shows them.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculator::Snapshot;
use crate::format::CurrencyFormatter;
use crate::types::js_number_text;

/// Rendered text of every output on the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageView {
    /// Loan amount as entered, empty when cleared.
    pub amount: String,
    /// Term next to the years slider, e.g. `15 years`; `null years` when cleared.
    pub term: String,
    /// Rate next to the interest slider, e.g. `15.00%`.
    pub interest_rate: String,
    pub monthly_payment: String,
    /// The widget's "Total Payment" line: the payment count run through the
    /// currency formatter (`$180.00` for 15 years).
    pub total_payment: String,
    /// Total paid over the life of the loan as currency.
    pub total_paid: String,
    pub interest_paid: String,
}

/// `"year"` for exactly one, `"years"` for anything else, absent included.
pub fn year_label(years: Option<f64>) -> &'static str {
    if years == Some(1.0) {
        "year"
    } else {
        "years"
    }
}

/// Percentage with two decimals, non-finite values spelled out.
///
/// Exact ties round away from zero (`0.125` shows as `0.13%`).
pub fn percent_text(rate_percent: f64) -> String {
    if !rate_percent.is_finite() {
        return format!("{}%", js_number_text(rate_percent));
    }
    match Decimal::from_f64_retain(rate_percent) {
        Some(d) => {
            let mut fixed = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            fixed.rescale(2);
            format!("{fixed}%")
        }
        None => format!("{}%", js_number_text(rate_percent)),
    }
}

impl MortgageView {
    pub fn render<F: CurrencyFormatter>(snapshot: &Snapshot, formatter: &F) -> Self {
        let inputs = &snapshot.inputs;
        let derived = &snapshot.derived;

        // A cleared years field prints as the widget prints `null`.
        let years_text = inputs
            .years
            .map(js_number_text)
            .unwrap_or_else(|| "null".to_string());

        Self {
            amount: inputs.amount.map(js_number_text).unwrap_or_default(),
            term: format!("{years_text} {}", year_label(inputs.years)),
            interest_rate: percent_text(derived.interest_rate_percent),
            monthly_payment: formatter.format(derived.monthly_payment),
            total_payment: formatter.format(derived.total_payments),
            total_paid: formatter.format(derived.total_paid),
            interest_paid: formatter.format(derived.interest_paid),
        }
    }
}

impl fmt::Display for MortgageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loan Amount: {}", self.amount)?;
        writeln!(f, "Years: {}", self.term)?;
        writeln!(f, "Interest Rate: {}", self.interest_rate)?;
        writeln!(f, "Monthly Payment: {}", self.monthly_payment)?;
        writeln!(f, "Total Payment: {}", self.total_payment)?;
        writeln!(f, "Total Paid: {}", self.total_paid)?;
        write!(f, "Interest Paid: {}", self.interest_paid)
    }
}
