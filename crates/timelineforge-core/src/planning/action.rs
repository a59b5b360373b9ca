//! Actions, timings and effects.

use std::collections::HashMap;

use super::expr::{Expr, FluentApp};
use super::types::Parameter;

/// Symbolic reference to an absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timepoint {
    /// Start of the containing action.
    Start,
    /// End of the containing action.
    End,
    /// Time of the initial state.
    GlobalStart,
    /// Time of the final state.
    GlobalEnd,
}

/// A timepoint shifted by a constant delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    pub anchor: Timepoint,
    pub delay: i64,
}

impl Timing {
    pub const fn start() -> Self {
        Timing {
            anchor: Timepoint::Start,
            delay: 0,
        }
    }

    pub const fn end() -> Self {
        Timing {
            anchor: Timepoint::End,
            delay: 0,
        }
    }

    pub const fn delayed(anchor: Timepoint, delay: i64) -> Self {
        Timing { anchor, delay }
    }

    /// Exactly the action start, no delay.
    pub fn is_start(&self) -> bool {
        self.anchor == Timepoint::Start && self.delay == 0
    }

    /// Exactly the action end, no delay.
    pub fn is_end(&self) -> bool {
        self.anchor == Timepoint::End && self.delay == 0
    }
}

/// Interval over which a condition must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeInterval {
    pub lower: Timing,
    pub upper: Timing,
    pub open_lower: bool,
    pub open_upper: bool,
}

impl TimeInterval {
    pub const fn at(timing: Timing) -> Self {
        TimeInterval {
            lower: timing,
            upper: timing,
            open_lower: false,
            open_upper: false,
        }
    }

    /// The closed interval `[start, end]` of the action.
    pub const fn overall() -> Self {
        TimeInterval {
            lower: Timing::start(),
            upper: Timing::end(),
            open_lower: false,
            open_upper: false,
        }
    }

    pub fn is_at_start(&self) -> bool {
        self.lower.is_start() && self.upper.is_start()
    }

    pub fn is_at_end(&self) -> bool {
        self.lower.is_end() && self.upper.is_end()
    }
}

/// A condition and the interval over which it must hold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedCondition {
    pub interval: TimeInterval,
    pub condition: Expr,
}

/// Duration bounds of a durative action.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationInterval {
    pub lower: Expr,
    pub upper: Expr,
    pub open_lower: bool,
    pub open_upper: bool,
}

impl DurationInterval {
    pub fn fixed(duration: i64) -> Self {
        Self::closed(Expr::Int(duration), Expr::Int(duration))
    }

    pub fn closed(lower: Expr, upper: Expr) -> Self {
        DurationInterval {
            lower,
            upper,
            open_lower: false,
            open_upper: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// The fluent is set to the value.
    Assign,
    /// The fluent is increased by the value.
    Increase,
    /// The fluent is decreased by the value.
    Decrease,
}

/// A possibly conditional effect `fluent OP value` at a given timing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub timing: Timing,
    pub kind: EffectKind,
    pub fluent: FluentApp,
    pub value: Expr,
    pub condition: Option<Expr>,
}

impl Effect {
    pub fn new(timing: Timing, kind: EffectKind, fluent: FluentApp, value: Expr) -> Self {
        Self {
            timing,
            kind,
            fluent,
            value,
            condition: None,
        }
    }

    pub fn assign(timing: Timing, fluent: FluentApp, value: Expr) -> Self {
        Self::new(timing, EffectKind::Assign, fluent, value)
    }

    pub fn increase(timing: Timing, fluent: FluentApp, amount: i64) -> Self {
        Self::new(timing, EffectKind::Increase, fluent, Expr::Int(amount))
    }

    pub fn decrease(timing: Timing, fluent: FluentApp, amount: i64) -> Self {
        Self::new(timing, EffectKind::Decrease, fluent, Expr::Int(amount))
    }

    pub fn with_condition(mut self, condition: Expr) -> Self {
        self.condition = Some(condition);
        self
    }

    /// True when the effect has no guard, or a guard that is literally `true`.
    pub fn is_unconditional(&self) -> bool {
        self.condition.as_ref().map_or(true, Expr::is_true)
    }

    fn substitute(&self, bindings: &HashMap<&str, &str>) -> Effect {
        Effect {
            timing: self.timing,
            kind: self.kind,
            fluent: self.fluent.substitute(bindings),
            value: self.value.substitute(bindings),
            condition: self.condition.as_ref().map(|c| c.substitute(bindings)),
        }
    }
}

/// Effect computed by external code; the conversion rejects these.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulatedEffect {
    pub timing: Timing,
    pub fluents: Vec<FluentApp>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurativeAction {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub duration: DurationInterval,
    pub conditions: Vec<TimedCondition>,
    pub effects: Vec<Effect>,
    pub simulated_effects: Vec<SimulatedEffect>,
}

impl DurativeAction {
    pub fn new(name: impl Into<String>, duration: DurationInterval) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            duration,
            conditions: Vec::new(),
            effects: Vec::new(),
            simulated_effects: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self
    }

    pub fn with_condition(mut self, interval: TimeInterval, condition: Expr) -> Self {
        self.conditions.push(TimedCondition {
            interval,
            condition,
        });
        self
    }

    pub fn at_start(self, condition: Expr) -> Self {
        self.with_condition(TimeInterval::at(Timing::start()), condition)
    }

    pub fn at_end(self, condition: Expr) -> Self {
        self.with_condition(TimeInterval::at(Timing::end()), condition)
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_simulated_effect(mut self, effect: SimulatedEffect) -> Self {
        self.simulated_effects.push(effect);
        self
    }

    /// Instantiates the action with the given parameter bindings.
    pub fn ground(&self, name: String, bindings: &HashMap<&str, &str>) -> DurativeAction {
        DurativeAction {
            name,
            parameters: Vec::new(),
            duration: DurationInterval {
                lower: self.duration.lower.substitute(bindings),
                upper: self.duration.upper.substitute(bindings),
                open_lower: self.duration.open_lower,
                open_upper: self.duration.open_upper,
            },
            conditions: self
                .conditions
                .iter()
                .map(|c| TimedCondition {
                    interval: c.interval,
                    condition: c.condition.substitute(bindings),
                })
                .collect(),
            effects: self.effects.iter().map(|e| e.substitute(bindings)).collect(),
            simulated_effects: self
                .simulated_effects
                .iter()
                .map(|s| SimulatedEffect {
                    timing: s.timing,
                    fluents: s.fluents.iter().map(|f| f.substitute(bindings)).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstantaneousAction {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub preconditions: Vec<Expr>,
    pub effects: Vec<Effect>,
}

impl InstantaneousAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            preconditions: Vec::new(),
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Instantaneous(InstantaneousAction),
    Durative(DurativeAction),
}

impl Action {
    pub fn name(&self) -> &str {
        match self {
            Action::Instantaneous(a) => &a.name,
            Action::Durative(a) => &a.name,
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        match self {
            Action::Instantaneous(a) => &a.parameters,
            Action::Durative(a) => &a.parameters,
        }
    }

    pub fn as_durative(&self) -> Option<&DurativeAction> {
        match self {
            Action::Durative(a) => Some(a),
            Action::Instantaneous(_) => None,
        }
    }
}

impl From<DurativeAction> for Action {
    fn from(action: DurativeAction) -> Self {
        Action::Durative(action)
    }
}

impl From<InstantaneousAction> for Action {
    fn from(action: InstantaneousAction) -> Self {
        Action::Instantaneous(action)
    }
}
