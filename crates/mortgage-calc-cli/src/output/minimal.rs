use serde_json::Value;

/// Print just the monthly payment text.
///
/// Single results print one line; session results print one line per pass.
pub fn print_minimal(value: &Value) {
    if let Some(Value::Array(frames)) = value.get("results") {
        for frame in frames {
            println!("{}", field_text(frame.get("monthly_payment_text")));
        }
        return;
    }

    let payment = value
        .get("result")
        .and_then(|r| r.get("view"))
        .and_then(|v| v.get("monthly_payment"));
    println!("{}", field_text(payment));
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}
