pub mod analysis;
pub mod calculator;
pub mod config;
pub mod derivation;
pub mod error;
pub mod format;
pub mod inputs;
#[cfg(feature = "decimal_check")]
pub mod time_value;
pub mod types;
pub mod view;

pub use calculator::{Calculator, Snapshot, SubscriptionId};
pub use derivation::{derive, DerivedValues};
pub use error::CalculatorError;
pub use format::{CurrencyFormatter, UsdFormatter};
pub use inputs::{parse_field_value, EditEvent, Field, InputState};
pub use view::MortgageView;

/// Standard result type for all mortgage-calc operations
pub type CalculatorResult<T> = Result<T, CalculatorError>;
