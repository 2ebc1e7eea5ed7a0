//! One-shot mortgage analysis: a single pass over a set of inputs, wrapped
//! in the standard computation envelope with rendered texts and warnings.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calculator::Calculator;
use crate::derivation::DerivedValues;
use crate::format::{CurrencyFormatter, UsdFormatter};
use crate::inputs::InputState;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::view::MortgageView;

const METHODOLOGY: &str = "Fixed-rate amortization (monthly compounding)";

/// Cross-check tolerance between the float and decimal payments, in dollars.
#[cfg(feature = "decimal_check")]
const CROSS_CHECK_TOLERANCE: f64 = 0.005;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageAnalysis {
    pub inputs: InputState,
    pub derived: DerivedValues,
    pub view: MortgageView,
    /// Monthly payment recomputed in 128-bit decimal, when the inputs allow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_monthly_payment: Option<Money>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyse a mortgage with the default USD formatter.
pub fn analyze_mortgage(inputs: &InputState) -> ComputationOutput<MortgageAnalysis> {
    analyze_mortgage_with(inputs, &UsdFormatter)
}

/// Analyse a mortgage, rendering currency with `formatter`.
///
/// Never fails: out-of-range inputs and non-finite results are reported as
/// warnings next to the figures.
pub fn analyze_mortgage_with<F: CurrencyFormatter>(
    inputs: &InputState,
    formatter: &F,
) -> ComputationOutput<MortgageAnalysis> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let snapshot = Calculator::with_inputs(*inputs).snapshot();
    let derived = snapshot.derived;

    for field in inputs.out_of_range_fields() {
        let range = field.nominal_range();
        match inputs.get(field) {
            Some(v) => warnings.push(format!(
                "{field} = {v} is outside the nominal range {}..={}",
                range.start(),
                range.end()
            )),
            None => warnings.push(format!("{field} is empty and counts as 0")),
        }
    }

    let non_finite = derived.non_finite_fields();
    if !non_finite.is_empty() {
        warnings.push(format!("Non-finite results: {}", non_finite.join(", ")));
    }
    if derived.monthly_interest_rate == 0.0 {
        warnings.push("Zero interest rate: amortization formula divides 0 by 0".into());
    }

    let decimal_monthly_payment = decimal_cross_check(&derived, inputs, &mut warnings);

    let analysis = MortgageAnalysis {
        inputs: *inputs,
        derived,
        view: MortgageView::render(&snapshot, formatter),
        decimal_monthly_payment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(METHODOLOGY, inputs, warnings, elapsed, analysis)
}

#[cfg(feature = "decimal_check")]
fn decimal_cross_check(
    derived: &DerivedValues,
    inputs: &InputState,
    warnings: &mut Vec<String>,
) -> Option<Money> {
    use rust_decimal::prelude::ToPrimitive;

    if derived.monthly_interest_rate == 0.0 || !derived.monthly_payment.is_finite() {
        return None;
    }

    let amount = inputs.numeric(crate::inputs::Field::Amount);
    match crate::time_value::monthly_payment(
        amount,
        derived.monthly_interest_rate,
        derived.total_payments,
    ) {
        Ok(payment) => {
            let drift = payment
                .to_f64()
                .map(|p| (p - derived.monthly_payment).abs())
                .unwrap_or(f64::INFINITY);
            if drift > CROSS_CHECK_TOLERANCE {
                warnings.push(format!(
                    "Decimal cross-check differs by {drift:.4} from the float payment"
                ));
            }
            Some(payment.round_dp(10))
        }
        Err(e) => {
            warnings.push(format!("Decimal cross-check skipped: {e}"));
            None
        }
    }
}

#[cfg(not(feature = "decimal_check"))]
fn decimal_cross_check(
    _derived: &DerivedValues,
    _inputs: &InputState,
    _warnings: &mut Vec<String>,
) -> Option<Money> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_analysis_is_clean() {
        let out = analyze_mortgage(&InputState::default());
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
        assert_eq!(out.methodology, METHODOLOGY);
        assert_eq!(out.result.view.monthly_payment, "$2,799.17");
    }

    #[test]
    fn test_zero_rate_warns() {
        let out = analyze_mortgage(&InputState::new(Some(1000.0), Some(1.0), Some(0.0)));
        assert!(out.result.derived.monthly_payment.is_nan());
        assert!(out.result.decimal_monthly_payment.is_none());
        assert!(out.warnings.iter().any(|w| w.contains("Zero interest rate")));
        assert!(out.warnings.iter().any(|w| w.contains("interest = 0")));
    }
}
