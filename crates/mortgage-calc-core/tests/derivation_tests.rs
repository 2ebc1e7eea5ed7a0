use mortgage_calc_core::derivation::{amortized_payment, derive};
use mortgage_calc_core::inputs::{InputState, AMOUNT_RANGE, INTEREST_RANGE, YEARS_RANGE};

fn inputs(amount: f64, years: f64, interest: f64) -> InputState {
    InputState::new(Some(amount), Some(years), Some(interest))
}

// ===========================================================================
// Known answers
// ===========================================================================

#[test]
fn test_default_scenario_known_answer() {
    let d = derive(&inputs(200_000.0, 15.0, 300.0));

    assert_eq!(d.interest_rate_percent, 15.0);
    assert_eq!(d.total_payments, 180.0);
    assert_eq!(d.monthly_interest_rate, 15.0 / 100.0 / 12.0);

    let growth = (1.0_f64 + d.monthly_interest_rate).powf(180.0);
    let expected = 200_000.0 * growth * d.monthly_interest_rate / (growth - 1.0);
    assert_eq!(d.monthly_payment.to_bits(), expected.to_bits());
    assert!(
        (d.monthly_payment - 2799.1742).abs() < 1e-3,
        "Expected ~2799.17, got {}",
        d.monthly_payment
    );

    assert!((d.total_paid - 503_851.3627).abs() < 1e-2);
    assert!((d.interest_paid - 303_851.3627).abs() < 1e-2);
}

#[test]
fn test_thirty_year_at_seven_and_a_half() {
    // 300k, 30 years, 7.5% => 2097.64
    let d = derive(&inputs(300_000.0, 30.0, 150.0));
    assert_eq!(d.interest_rate_percent, 7.5);
    assert!((d.monthly_payment - 2097.64).abs() < 0.01, "got {}", d.monthly_payment);
}

#[test]
fn test_lowest_interest_code_is_finite() {
    let d = derive(&inputs(200_000.0, 15.0, 1.0));
    assert_eq!(d.interest_rate_percent, 0.05);
    assert!(d.monthly_interest_rate > 0.0);
    assert!(d.is_finite(), "non-finite: {:?}", d.non_finite_fields());
    // Barely above straight-line repayment of 200000 / 180
    assert!((d.monthly_payment - 1115.31).abs() < 0.01, "got {}", d.monthly_payment);
}

// ===========================================================================
// Identities over the nominal input ranges
// ===========================================================================

#[test]
fn test_identities_hold_across_nominal_ranges() {
    let amounts = [*AMOUNT_RANGE.start(), 1_500.0, 200_000.0, 7_250_000.0, *AMOUNT_RANGE.end()];
    let years = [*YEARS_RANGE.start(), 2.0, 15.0, 30.0, 57.0, *YEARS_RANGE.end()];
    let codes = [*INTEREST_RANGE.start(), 7.0, 130.0, 300.0, 999.0, *INTEREST_RANGE.end()];

    for &a in &amounts {
        for &y in &years {
            for &c in &codes {
                let d = derive(&inputs(a, y, c));
                assert_eq!(d.total_payments, y * 12.0, "payments for {a}/{y}/{c}");
                assert_eq!(d.interest_rate_percent, c / 20.0);
                assert_eq!(d.total_paid, d.monthly_payment * d.total_payments);
                assert_eq!(d.interest_paid, d.total_paid - a);
                assert!(d.monthly_payment.is_finite(), "payment for {a}/{y}/{c}");
                assert!(d.interest_paid >= -1e-6 * a, "negative interest for {a}/{y}/{c}");
            }
        }
    }
}

#[test]
fn test_recompute_is_bit_identical() {
    for state in [
        inputs(200_000.0, 15.0, 300.0),
        inputs(1.0, 100.0, 2000.0),
        InputState::new(Some(5000.0), Some(10.0), None),
    ] {
        let first = derive(&state);
        let second = derive(&state);
        assert!(first.bit_identical(&second));
    }
}

// ===========================================================================
// Degenerate inputs keep their raw IEEE-754 results
// ===========================================================================

#[test]
fn test_absent_interest_divides_zero_by_zero() {
    let d = derive(&InputState::new(Some(200_000.0), Some(15.0), None));
    assert_eq!(d.interest_rate_percent, 0.0);
    assert_eq!(d.monthly_interest_rate, 0.0);
    assert!(d.monthly_payment.is_nan());
    assert!(d.total_paid.is_nan());
    assert!(d.interest_paid.is_nan());
}

#[test]
fn test_zero_interest_code_matches_absent() {
    let zero = derive(&inputs(200_000.0, 15.0, 0.0));
    let absent = derive(&InputState::new(Some(200_000.0), Some(15.0), None));
    assert!(zero.bit_identical(&absent));
}

#[test]
fn test_absent_years_gives_infinite_payment() {
    let d = derive(&InputState::new(Some(200_000.0), None, Some(300.0)));
    assert_eq!(d.total_payments, 0.0);
    assert_eq!(d.monthly_payment, f64::INFINITY);
    // inf * 0
    assert!(d.total_paid.is_nan());
}

#[test]
fn test_absent_amount_is_zero_principal() {
    let d = derive(&InputState::new(None, Some(15.0), Some(300.0)));
    assert_eq!(d.monthly_payment, 0.0);
    assert_eq!(d.total_paid, 0.0);
    assert_eq!(d.interest_paid, 0.0);
}

#[test]
fn test_negative_amount_propagates_unchanged() {
    let d = derive(&inputs(-100_000.0, 15.0, 300.0));
    let positive = derive(&inputs(100_000.0, 15.0, 300.0));
    assert_eq!(d.monthly_payment, -positive.monthly_payment);
    assert!(d.interest_paid < 0.0);
}

#[test]
fn test_nan_input_poisons_everything_downstream() {
    let d = derive(&InputState::new(Some(200_000.0), Some(f64::NAN), Some(300.0)));
    assert!(d.total_payments.is_nan());
    assert!(d.monthly_payment.is_nan());
    assert_eq!(d.interest_rate_percent, 15.0);
}

#[test]
fn test_amortized_payment_matches_derive() {
    let d = derive(&inputs(450_000.0, 25.0, 95.0));
    assert_eq!(
        amortized_payment(450_000.0, d.monthly_interest_rate, 300.0),
        d.monthly_payment
    );
}
