use napi::Result as NapiResult;
use napi_derive::napi;

use mortgage_calc_core::analysis;
use mortgage_calc_core::{Calculator, CurrencyFormatter, EditEvent, InputState, MortgageView, UsdFormatter};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// One-shot
// ---------------------------------------------------------------------------

/// Full analysis envelope for `{"amount": .., "years": .., "interest": ..}`.
/// Missing keys take the startup defaults, `null` clears a field.
#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let input: InputState = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analysis::analyze_mortgage(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Rendered display texts only.
#[napi]
pub fn render_mortgage_view(input_json: String) -> NapiResult<String> {
    let input: InputState = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let snapshot = Calculator::with_inputs(input).snapshot();
    let view = MortgageView::render(&snapshot, &UsdFormatter);
    serde_json::to_string(&view).map_err(to_napi_error)
}

#[napi]
pub fn format_usd(value: f64) -> String {
    UsdFormatter.format(value)
}

// ---------------------------------------------------------------------------
// Stateful calculator
// ---------------------------------------------------------------------------

/// A live calculator for a widget host: feed it raw field edits, read back
/// the snapshot and its rendered view after each one.
#[napi(js_name = "MortgageCalculator")]
pub struct JsMortgageCalculator {
    inner: Calculator,
}

#[napi]
impl JsMortgageCalculator {
    #[napi(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Calculator::new(),
        }
    }

    /// Apply `value` (raw field text) to `field` and return the new snapshot as JSON.
    #[napi]
    pub fn edit(&mut self, field: String, value: String) -> NapiResult<String> {
        let field = field.parse().map_err(to_napi_error)?;
        let snapshot = self.inner.apply_edit(&EditEvent::new(field, value));
        serde_json::to_string(&snapshot).map_err(to_napi_error)
    }

    #[napi]
    pub fn snapshot(&self) -> NapiResult<String> {
        serde_json::to_string(&self.inner.snapshot()).map_err(to_napi_error)
    }

    #[napi]
    pub fn view(&self) -> NapiResult<String> {
        let view = MortgageView::render(&self.inner.snapshot(), &UsdFormatter);
        serde_json::to_string(&view).map_err(to_napi_error)
    }
}

impl Default for JsMortgageCalculator {
    fn default() -> Self {
        Self::new()
    }
}
