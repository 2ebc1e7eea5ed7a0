//! Decimal-precision payment math, used to cross-check the `f64` engine.

use rust_decimal::prelude::*;
use rust_decimal::MathematicalOps;

use crate::error::CalculatorError;
use crate::types::{Money, Rate};
use crate::CalculatorResult;

/// Payment (PMT), spreadsheet sign convention: a positive present value
/// yields a negative payment.
///
/// Works with the discount factor `(1 + r)^-n`, which shrinks toward zero for
/// long terms instead of overflowing like the growth factor would.
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> CalculatorResult<Money> {
    if nper == 0 {
        return Err(CalculatorError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(-(present_value + future_value) / Decimal::from(nper));
    }

    let one_plus_r = Decimal::ONE + rate;
    let base = Decimal::ONE
        .checked_div(one_plus_r)
        .ok_or_else(|| CalculatorError::DivisionByZero {
            context: format!("PMT discount base 1 / (1 + {rate})"),
        })?;
    let discount = match base.checked_powu(u64::from(nper)) {
        Some(d) => d,
        // Below one in magnitude the power can only underflow.
        None if base.abs() < Decimal::ONE => Decimal::ZERO,
        None => {
            return Err(CalculatorError::NumericOverflow {
                context: format!("PMT discount factor (1 + {rate})^-{nper}"),
            })
        }
    };
    let denominator = Decimal::ONE - discount;

    if denominator.is_zero() {
        return Err(CalculatorError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let balance = present_value
        .checked_add(future_value * discount)
        .ok_or_else(|| CalculatorError::NumericOverflow {
            context: "PMT balance".into(),
        })?;
    let scaled = balance
        .checked_mul(rate)
        .ok_or_else(|| CalculatorError::NumericOverflow {
            context: "PMT present value scaling".into(),
        })?;
    Ok(-scaled / denominator)
}

/// Monthly payment for a loan from `f64` engine inputs, in decimal.
///
/// Requires finite inputs and a whole, non-negative number of periods.
pub fn monthly_payment(amount: f64, monthly_rate: f64, periods: f64) -> CalculatorResult<Money> {
    let amount_dec = Decimal::from_f64_retain(amount).ok_or_else(|| CalculatorError::InvalidInput {
        field: "amount".into(),
        reason: format!("{amount} is not representable as a decimal"),
    })?;
    let rate_dec = Decimal::from_f64_retain(monthly_rate).ok_or_else(|| CalculatorError::InvalidInput {
        field: "monthly_interest_rate".into(),
        reason: format!("{monthly_rate} is not representable as a decimal"),
    })?;
    if !periods.is_finite() || periods < 0.0 || periods.fract() != 0.0 || periods > u32::MAX as f64 {
        return Err(CalculatorError::InvalidInput {
            field: "total_payments".into(),
            reason: format!("{periods} is not a whole number of periods"),
        });
    }

    Ok(-pmt(rate_dec, periods as u32, amount_dec, Decimal::ZERO)?)
}
