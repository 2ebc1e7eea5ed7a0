use clap::Args;
use serde_json::Value;

use mortgage_calc_core::analysis;
use mortgage_calc_core::config::CalculatorConfig;
use mortgage_calc_core::{parse_field_value, Field, InputState};

use crate::input;

/// Arguments for a one-shot calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CalculateArgs {
    /// Loan amount (an empty string clears the field)
    #[arg(long)]
    pub amount: Option<String>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<String>,

    /// Interest code: annual rate in percent times 20 (300 = 15%)
    #[arg(long)]
    pub interest: Option<String>,

    /// Annual rate in percent, converted to an interest code
    #[arg(long, conflicts_with = "interest")]
    pub rate: Option<String>,

    /// Path to JSON input file with amount/years/interest (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl CalculateArgs {
    fn has_flags(&self) -> bool {
        self.amount.is_some() || self.years.is_some() || self.interest.is_some() || self.rate.is_some()
    }
}

pub fn run_calculate(
    args: CalculateArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: InputState = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if args.has_flags() {
        inputs_from_flags(&args, config)
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        config.initial_inputs()
    };

    tracing::debug!(?inputs, "calculating");
    let result = analysis::analyze_mortgage(&inputs);
    Ok(serde_json::to_value(result)?)
}

fn inputs_from_flags(args: &CalculateArgs, config: &CalculatorConfig) -> InputState {
    let mut inputs = config.initial_inputs();
    if let Some(ref raw) = args.amount {
        inputs.set(Field::Amount, parse_field_value(raw));
    }
    if let Some(ref raw) = args.years {
        inputs.set(Field::Years, parse_field_value(raw));
    }
    if let Some(ref raw) = args.interest {
        inputs.set(Field::Interest, parse_field_value(raw));
    }
    if let Some(ref raw) = args.rate {
        inputs.set(Field::Interest, parse_field_value(raw).map(|pct| pct * 20.0));
    }
    inputs
}
