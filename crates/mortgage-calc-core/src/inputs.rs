//! Input state holder: the three user-editable values and the parsing of
//! raw field text into them.
//!
//! Parsing never rejects a number. Empty text means "no value", anything
//! else is coerced to `f64` (unparseable text becomes `NaN`) and stored
//! as-is, out-of-range values included.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::CalculatorError;
use crate::types::float_repr;
use crate::CalculatorResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_AMOUNT: f64 = 200_000.0;
pub const DEFAULT_YEARS: f64 = 15.0;
pub const DEFAULT_INTEREST: f64 = 300.0;

/// Nominal bounds of the loan amount input.
pub const AMOUNT_RANGE: RangeInclusive<f64> = 1.0..=999_999_999.0;
/// Nominal bounds of the term slider, in years.
pub const YEARS_RANGE: RangeInclusive<f64> = 1.0..=100.0;
/// Nominal bounds of the interest slider (rate percent x 20).
pub const INTEREST_RANGE: RangeInclusive<f64> = 1.0..=2000.0;

// ---------------------------------------------------------------------------
// Field identifiers
// ---------------------------------------------------------------------------

/// One of the three user-editable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Loan principal.
    Amount,
    /// Loan term in years.
    Years,
    /// Interest code: the nominal annual rate in percent, times 20.
    Interest,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Amount, Field::Years, Field::Interest];

    pub fn name(self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Years => "years",
            Field::Interest => "interest",
        }
    }

    pub fn nominal_range(self) -> RangeInclusive<f64> {
        match self {
            Field::Amount => AMOUNT_RANGE,
            Field::Years => YEARS_RANGE,
            Field::Interest => INTEREST_RANGE,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amount" => Ok(Field::Amount),
            "years" => Ok(Field::Years),
            "interest" => Ok(Field::Interest),
            _ => Err(CalculatorError::UnknownField(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Coerce raw field text to a value.
///
/// Empty (or whitespace-only) text is absent. Everything else is parsed as a
/// float; text that is not a number yields `NaN` rather than an error.
pub fn parse_field_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.parse::<f64>().unwrap_or(f64::NAN))
}

// ---------------------------------------------------------------------------
// Edit events
// ---------------------------------------------------------------------------

/// A raw edit delivered by the user input source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditEvent {
    pub field: Field,
    /// Unparsed text as typed into the field.
    #[serde(default)]
    pub value: String,
}

impl EditEvent {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Parsed value carried by this edit.
    pub fn parsed_value(&self) -> Option<f64> {
        parse_field_value(&self.value)
    }

    /// Parse one line of an edit script.
    ///
    /// Accepts either `field=value` or a JSON object
    /// `{"field": "years", "value": "30"}`. A JSON `value` may also be a bare
    /// number or `null`.
    pub fn parse_line(line: &str) -> CalculatorResult<Self> {
        let trimmed = line.trim();
        if trimmed.starts_with('{') {
            return Self::parse_json_line(trimmed);
        }

        let (field, value) = trimmed
            .split_once('=')
            .ok_or_else(|| CalculatorError::MalformedEdit {
                line: trimmed.to_string(),
                reason: "expected 'field=value' or a JSON object".into(),
            })?;
        Ok(Self::new(field.parse()?, value))
    }

    fn parse_json_line(line: &str) -> CalculatorResult<Self> {
        let raw: serde_json::Value = serde_json::from_str(line)?;
        let field = raw
            .get("field")
            .and_then(|f| f.as_str())
            .ok_or_else(|| CalculatorError::MalformedEdit {
                line: line.to_string(),
                reason: "missing string 'field'".into(),
            })?
            .parse::<Field>()?;

        let value = match raw.get("value") {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(CalculatorError::MalformedEdit {
                    line: line.to_string(),
                    reason: format!("unsupported value {other}"),
                })
            }
        };
        Ok(Self::new(field, value))
    }
}

// ---------------------------------------------------------------------------
// Input state
// ---------------------------------------------------------------------------

/// The three primitive inputs. `None` is an absent value (cleared field) and
/// takes part in arithmetic as `0`.
///
/// Missing keys in serialized form fall back to the startup defaults; an
/// explicit `null` is an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    #[serde(with = "float_repr::option")]
    pub amount: Option<f64>,
    #[serde(with = "float_repr::option")]
    pub years: Option<f64>,
    #[serde(with = "float_repr::option")]
    pub interest: Option<f64>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            amount: Some(DEFAULT_AMOUNT),
            years: Some(DEFAULT_YEARS),
            interest: Some(DEFAULT_INTEREST),
        }
    }
}

impl InputState {
    pub fn new(amount: Option<f64>, years: Option<f64>, interest: Option<f64>) -> Self {
        Self {
            amount,
            years,
            interest,
        }
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Amount => self.amount,
            Field::Years => self.years,
            Field::Interest => self.interest,
        }
    }

    pub fn set(&mut self, field: Field, value: Option<f64>) {
        match field {
            Field::Amount => self.amount = value,
            Field::Years => self.years = value,
            Field::Interest => self.interest = value,
        }
    }

    /// Value used in arithmetic: absent counts as zero.
    pub fn numeric(&self, field: Field) -> f64 {
        self.get(field).unwrap_or(0.0)
    }

    /// Whether the field holds a value inside the bounds of its input
    /// widget. Informational only; nothing is rejected on this basis.
    pub fn in_nominal_range(&self, field: Field) -> bool {
        self.get(field)
            .is_some_and(|v| field.nominal_range().contains(&v))
    }

    pub fn out_of_range_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.in_nominal_range(*f))
            .collect()
    }
}
