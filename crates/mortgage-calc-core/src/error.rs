use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("Unknown input field '{0}' (expected amount, years or interest)")]
    UnknownField(String),

    #[error("Malformed edit event '{line}': {reason}")]
    MalformedEdit { line: String, reason: String },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CalculatorError {
    fn from(e: serde_json::Error) -> Self {
        CalculatorError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for CalculatorError {
    fn from(e: toml::de::Error) -> Self {
        CalculatorError::Config(e.to_string())
    }
}
