use mortgage_calc_core::analysis::{analyze_mortgage, analyze_mortgage_with};
use mortgage_calc_core::{Calculator, CurrencyFormatter, InputState, MortgageView, UsdFormatter};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

// ===========================================================================
// Rendered texts
// ===========================================================================

#[test]
fn test_default_view() {
    let calc = Calculator::new();
    let view = MortgageView::render(&calc.snapshot(), &UsdFormatter);
    assert_eq!(
        view,
        MortgageView {
            amount: "200000".into(),
            term: "15 years".into(),
            interest_rate: "15.00%".into(),
            monthly_payment: "$2,799.17".into(),
            total_payment: "$180.00".into(),
            total_paid: "$503,851.36".into(),
            interest_paid: "$303,851.36".into(),
        }
    );
}

#[test]
fn test_single_year_label() {
    let mut calc = Calculator::new();
    let view = MortgageView::render(&calc.set_years(Some(1.0)), &UsdFormatter);
    assert_eq!(view.term, "1 year");

    let view = MortgageView::render(&calc.set_years(Some(2.0)), &UsdFormatter);
    assert_eq!(view.term, "2 years");
}

#[test]
fn test_cleared_fields_render_placeholders() {
    let mut calc = Calculator::new();
    calc.set_interest(None);
    let view = MortgageView::render(&calc.set_amount(None), &UsdFormatter);
    assert_eq!(view.amount, "");
    assert_eq!(view.term, "15 years");
    assert_eq!(view.interest_rate, "0.00%");
    assert_eq!(view.monthly_payment, "$NaN");
    assert_eq!(view.interest_paid, "$NaN");
}

#[test]
fn test_display_lists_every_output() {
    let view = MortgageView::render(&Calculator::new().snapshot(), &UsdFormatter);
    let text = view.to_string();
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec![
            "Loan Amount: 200000",
            "Years: 15 years",
            "Interest Rate: 15.00%",
            "Monthly Payment: $2,799.17",
            "Total Payment: $180.00",
            "Total Paid: $503,851.36",
            "Interest Paid: $303,851.36",
        ]
    );
}

#[test]
fn test_cleared_years_prints_null() {
    let mut calc = Calculator::new();
    let view = MortgageView::render(&calc.set_years(None), &UsdFormatter);
    assert_eq!(view.term, "null years");
    assert_eq!(view.total_payment, "$0.00");
    assert_eq!(view.monthly_payment, "$∞");
}

#[test]
fn test_total_payment_line_counts_payments() {
    let mut calc = Calculator::new();
    let view = MortgageView::render(&calc.set_years(Some(30.0)), &UsdFormatter);
    assert_eq!(view.total_payment, "$360.00");

    // The currency total lives next to it
    let d = calc.derived();
    assert_eq!(view.total_paid, UsdFormatter.format(d.total_paid));
    assert_eq!(view.total_paid, UsdFormatter.format(d.monthly_payment * 360.0));
}

// ===========================================================================
// Observer as view collaborator
// ===========================================================================

#[test]
fn test_observer_renders_each_change() {
    let mut calc = Calculator::new();
    let rendered = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&rendered);
    calc.subscribe(move |snap| {
        sink.borrow_mut()
            .push(MortgageView::render(snap, &UsdFormatter).monthly_payment)
    });

    calc.apply_raw("years", "30").unwrap();
    calc.apply_raw("interest", "150").unwrap();
    calc.apply_raw("amount", "300000").unwrap();

    assert_eq!(rendered.borrow().last().map(String::as_str), Some("$2,097.64"));
    assert_eq!(rendered.borrow().len(), 3);
}

// ===========================================================================
// Custom formatter collaborator
// ===========================================================================

struct WholeDollars;

impl CurrencyFormatter for WholeDollars {
    fn format(&self, value: f64) -> String {
        if value.is_finite() {
            format!("USD {}", value.round())
        } else {
            "n/a".to_string()
        }
    }
}

#[test]
fn test_custom_formatter_is_used() {
    let out = analyze_mortgage_with(&InputState::default(), &WholeDollars);
    assert_eq!(out.result.view.monthly_payment, "USD 2799");

    let out = analyze_mortgage_with(&InputState::new(Some(1.0), Some(1.0), None), &WholeDollars);
    assert_eq!(out.result.view.monthly_payment, "n/a");
}

// ===========================================================================
// Analysis envelope
// ===========================================================================

#[test]
fn test_analysis_envelope_serializes_non_finite() {
    let out = analyze_mortgage(&InputState::new(Some(200_000.0), Some(15.0), None));
    let json = serde_json::to_value(&out).unwrap();

    assert_eq!(json["result"]["derived"]["monthly_payment"], "NaN");
    assert_eq!(json["result"]["inputs"]["interest"], serde_json::Value::Null);
    assert_eq!(json["metadata"]["precision"], "ieee754_f64");
    assert!(json["result"].get("decimal_monthly_payment").is_none());
    assert!(!out.warnings.is_empty());
}

#[test]
fn test_analysis_reports_out_of_range_inputs() {
    let out = analyze_mortgage(&InputState::new(Some(-10.0), Some(150.0), Some(300.0)));
    assert!(out.warnings.iter().any(|w| w.starts_with("amount = -10")));
    assert!(out.warnings.iter().any(|w| w.starts_with("years = 150")));
    // Still computed, not rejected
    assert_eq!(out.result.derived.total_payments, 1800.0);
}

#[test]
fn test_decimal_cross_check_agrees() {
    let out = analyze_mortgage(&InputState::new(Some(300_000.0), Some(30.0), Some(150.0)));
    let decimal = out.result.decimal_monthly_payment.expect("cross-check present");
    let as_text = decimal.round_dp(2).to_string();
    assert_eq!(as_text, "2097.64");
}

#[test]
fn test_nominal_grid_analyses_cleanly() {
    let amounts = [1.0, 200_000.0, 7_250_000.0, 999_999_999.0];
    let terms = [1.0, 15.0, 30.0, 57.0, 100.0];
    let codes = [1.0, 7.0, 130.0, 300.0, 999.0, 2000.0];

    for &a in &amounts {
        for &y in &terms {
            for &c in &codes {
                let out = analyze_mortgage(&InputState::new(Some(a), Some(y), Some(c)));
                assert!(
                    out.warnings.is_empty(),
                    "{a}/{y}/{c}: {:?}",
                    out.warnings
                );
                assert!(
                    out.result.decimal_monthly_payment.is_some(),
                    "no decimal payment for {a}/{y}/{c}"
                );
            }
        }
    }
}

#[test]
fn test_long_term_top_rate_cross_check() {
    let out = analyze_mortgage(&InputState::new(Some(200_000.0), Some(100.0), Some(2000.0)));
    let decimal = out.result.decimal_monthly_payment.expect("cross-check present");
    assert_eq!(decimal.round_dp(2).to_string(), "16666.67");
}
