//! The calculator instance: owns the inputs, the latest derived values and
//! the observers that render them.
//!
//! Every mutation runs one full recomputation pass and then notifies each
//! observer, in subscription order, before returning. Observers therefore
//! never see derived values that lag behind the inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::config::CalculatorConfig;
use crate::derivation::{derive, DerivedValues};
use crate::inputs::{EditEvent, Field, InputState};
use crate::CalculatorResult;

/// Consistent view of the calculator after a completed pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of passes run so far; the startup pass is 1.
    pub pass: u64,
    pub inputs: InputState,
    pub derived: DerivedValues,
}

/// Handle returned by [`Calculator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Snapshot)>;

pub struct Calculator {
    inputs: InputState,
    derived: DerivedValues,
    pass: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Calculator {
    /// Calculator at the startup defaults.
    pub fn new() -> Self {
        Self::with_inputs(InputState::default())
    }

    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::with_inputs(config.initial_inputs())
    }

    pub fn with_inputs(inputs: InputState) -> Self {
        let derived = derive(&inputs);
        debug!(?inputs, monthly_payment = derived.monthly_payment, "initial pass");
        Self {
            inputs,
            derived,
            pass: 1,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn inputs(&self) -> &InputState {
        &self.inputs
    }

    pub fn derived(&self) -> &DerivedValues {
        &self.derived
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pass: self.pass,
            inputs: self.inputs,
            derived: self.derived,
        }
    }

    /// Register an observer. It is called after every later pass; use
    /// [`Calculator::snapshot`] for the initial render.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        before != self.observers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn set_amount(&mut self, value: Option<f64>) -> Snapshot {
        self.set_field(Field::Amount, value)
    }

    pub fn set_years(&mut self, value: Option<f64>) -> Snapshot {
        self.set_field(Field::Years, value)
    }

    pub fn set_interest(&mut self, value: Option<f64>) -> Snapshot {
        self.set_field(Field::Interest, value)
    }

    /// Store a value and run one pass.
    pub fn set_field(&mut self, field: Field, value: Option<f64>) -> Snapshot {
        debug!(%field, ?value, "input changed");
        self.inputs.set(field, value);
        self.recompute()
    }

    /// Apply a raw edit from the input source.
    pub fn apply_edit(&mut self, edit: &EditEvent) -> Snapshot {
        self.set_field(edit.field, edit.parsed_value())
    }

    /// Apply an edit given as field name and raw text. Only an unknown field
    /// name fails; the text itself is never rejected.
    pub fn apply_raw(&mut self, field: &str, raw: &str) -> CalculatorResult<Snapshot> {
        let field: Field = field.parse()?;
        Ok(self.apply_edit(&EditEvent::new(field, raw)))
    }

    /// Run a pass without changing inputs. Idempotent.
    pub fn refresh(&mut self) -> Snapshot {
        self.recompute()
    }

    fn recompute(&mut self) -> Snapshot {
        self.derived = derive(&self.inputs);
        self.pass += 1;

        let snapshot = self.snapshot();
        debug!(
            pass = snapshot.pass,
            monthly_payment = snapshot.derived.monthly_payment,
            total_paid = snapshot.derived.total_paid,
            interest_paid = snapshot.derived.interest_paid,
            "recomputed"
        );

        for (id, observer) in self.observers.iter_mut() {
            trace!(subscription = id.0, pass = snapshot.pass, "notifying observer");
            observer(&snapshot);
        }
        snapshot
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("inputs", &self.inputs)
            .field("derived", &self.derived)
            .field("pass", &self.pass)
            .field("observers", &self.observers.len())
            .finish()
    }
}
