//! A single switch toggled by one action.
//!
//! `mode: Mode = {Idle, Active}` starts `Idle`; `activate` (duration 5)
//! goes `Idle -> Active -> Idle`.
//!
//! # Example
//!
//! ```
//! use timelineforge_test::switch;
//!
//! let problem = switch::problem();
//! assert_eq!(problem.objects_of(switch::MODE_TYPE), vec!["Idle", "Active"]);
//! ```

use timelineforge_core::planning::{
    DurationInterval, DurativeAction, Effect, Expr, FluentDecl, PlanningProblem, Timing,
    ValueType,
};

use crate::{is, var};

pub const MODE_TYPE: &str = "Mode";
pub const MODE: &str = "mode";
pub const ACTIVATE: &str = "activate";
pub const ACTIVE_DURATION: i64 = 5;

/// The `activate` action.
pub fn activate() -> DurativeAction {
    DurativeAction::new(ACTIVATE, DurationInterval::fixed(ACTIVE_DURATION))
        .at_start(is(MODE, "Idle"))
        .with_effect(Effect::assign(Timing::start(), var(MODE), Expr::object("Active")))
        .with_effect(Effect::assign(Timing::end(), var(MODE), Expr::object("Idle")))
}

/// Types, objects and the `mode` fluent, without actions.
pub fn domain() -> PlanningProblem {
    PlanningProblem::new("switch")
        .with_type(MODE_TYPE)
        .with_object("Idle", MODE_TYPE)
        .with_object("Active", MODE_TYPE)
        .with_fluent(FluentDecl::new(MODE, ValueType::user(MODE_TYPE)))
}

/// The switch problem starting `Idle`.
pub fn problem() -> PlanningProblem {
    domain()
        .with_action(activate())
        .with_initial_value(Expr::Fluent(var(MODE)), Expr::object("Idle"))
}
