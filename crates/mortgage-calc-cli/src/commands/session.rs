use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::io::{self, BufRead};
use std::rc::Rc;

use mortgage_calc_core::config::CalculatorConfig;
use mortgage_calc_core::derivation::DerivedValues;
use mortgage_calc_core::{Calculator, EditEvent, InputState, MortgageView, Snapshot, UsdFormatter};

use crate::input;

/// Arguments for replaying an edit session
#[derive(Args)]
pub struct SessionArgs {
    /// File with one edit per line (`years=30` or `{"field":"years","value":"30"}`).
    /// Reads stdin when omitted.
    #[arg(long)]
    pub events: Option<String>,

    /// Print each rendered view to stderr as soon as it is recomputed
    #[arg(long)]
    pub follow: bool,
}

/// One recomputation pass as seen by the view.
#[derive(Debug, Serialize)]
struct Frame {
    pass: u64,
    #[serde(flatten)]
    inputs: InputState,
    #[serde(flatten)]
    derived: DerivedValues,
    term: String,
    monthly_payment_text: String,
    total_payment_text: String,
    total_paid_text: String,
    interest_paid_text: String,
}

impl Frame {
    fn from_view(pass: u64, inputs: InputState, derived: DerivedValues, view: MortgageView) -> Self {
        Self {
            pass,
            inputs,
            derived,
            term: view.term,
            monthly_payment_text: view.monthly_payment,
            total_payment_text: view.total_payment,
            total_paid_text: view.total_paid,
            interest_paid_text: view.interest_paid,
        }
    }
}

pub fn run_session(
    args: SessionArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let lines: Vec<String> = match args.events {
        Some(ref path) => input::file::read_text(path)?
            .lines()
            .map(str::to_owned)
            .collect(),
        None => io::stdin().lock().lines().collect::<Result<_, _>>()?,
    };

    let frames = replay(&lines, config, args.follow)?;
    let results = serde_json::to_value(&frames)?;
    Ok(serde_json::json!({ "results": results }))
}

/// Run edit lines through one calculator. The first frame is the startup
/// pass; every applied edit adds one more.
fn replay(
    lines: &[String],
    config: &CalculatorConfig,
    follow: bool,
) -> Result<Vec<Frame>, Box<dyn std::error::Error>> {
    let mut calc = Calculator::from_config(config);
    let frames = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&frames);
    let mut record = move |snap: &Snapshot| {
        let view = MortgageView::render(snap, &UsdFormatter);
        if follow {
            eprintln!("--- pass {} ---\n{}", snap.pass, view);
        }
        sink.borrow_mut()
            .push(Frame::from_view(snap.pass, snap.inputs, snap.derived, view));
    };
    record(&calc.snapshot());
    calc.subscribe(record);

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let edit = EditEvent::parse_line(trimmed).map_err(|e| format!("line {}: {}", idx + 1, e))?;
        tracing::debug!(line = idx + 1, field = %edit.field, value = %edit.value, "applying edit");
        calc.apply_edit(&edit);
    }

    let collected: Vec<Frame> = frames.borrow_mut().drain(..).collect();
    Ok(collected)
}
