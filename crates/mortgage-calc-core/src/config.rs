use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CalculatorError;
use crate::inputs::{InputState, DEFAULT_AMOUNT, DEFAULT_INTEREST, DEFAULT_YEARS};
use crate::CalculatorResult;

/// Calculator settings loaded from TOML.
///
/// ```toml
/// [defaults]
/// amount = 350000
/// years = 30
/// interest = 130
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub defaults: InputDefaults,
}

/// Values the inputs hold at startup. Missing keys keep the built-in values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDefaults {
    pub amount: f64,
    pub years: f64,
    pub interest: f64,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            years: DEFAULT_YEARS,
            interest: DEFAULT_INTEREST,
        }
    }
}

impl CalculatorConfig {
    pub fn from_toml_str(contents: &str) -> CalculatorResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn initial_inputs(&self) -> InputState {
        InputState::new(
            Some(self.defaults.amount),
            Some(self.defaults.years),
            Some(self.defaults.interest),
        )
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> CalculatorResult<CalculatorConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading calculator configuration from {:?}", path_ref);
    let contents = fs::read_to_string(path_ref).map_err(|e| {
        CalculatorError::Config(format!("Failed to read config file {:?}: {}", path_ref, e))
    })?;
    CalculatorConfig::from_toml_str(&contents).map_err(|e| {
        CalculatorError::Config(format!("Failed to parse config file {:?}: {}", path_ref, e))
    })
}
