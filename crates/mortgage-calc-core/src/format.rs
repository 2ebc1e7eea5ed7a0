//! Currency formatting collaborator.

use rust_decimal::prelude::*;

/// Renders a number as a currency string for display.
///
/// Implementations must accept any `f64`, non-finite values included.
pub trait CurrencyFormatter {
    fn format(&self, value: f64) -> String;
}

/// en-US dollar formatting: `$1,234.56`, `-$1,234.56`.
///
/// Amounts are rounded to cents half away from zero. `NaN` renders as
/// `$NaN` and infinities as `$∞` / `-$∞`. Negative zero keeps its sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsdFormatter;

impl CurrencyFormatter for UsdFormatter {
    fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "$NaN".to_string();
        }
        let sign = if value.is_sign_negative() { "-" } else { "" };
        if value.is_infinite() {
            return format!("{sign}$∞");
        }

        let magnitude = value.abs();
        let fixed = match Decimal::from_f64_retain(magnitude) {
            Some(d) => {
                let mut cents =
                    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                cents.rescale(2);
                cents.to_string()
            }
            // Beyond the decimal range (about 7.9e28): fall back to float printing.
            None => format!("{:.2}", magnitude),
        };

        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!("{sign}${}.{cents}", group_thousands(whole))
    }
}

impl<F: CurrencyFormatter + ?Sized> CurrencyFormatter for &F {
    fn format(&self, value: f64) -> String {
        (**self).format(value)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
