//! A generator providing power to a kettle.
//!
//! - `gen: Gen = {Off, Running}`; `run` (duration 10) goes
//!   `Off -> Running -> Off` and provides 2 units of `power` while running.
//! - `kettle: Kettle = {Cold, Heating, Hot}`; `heat` (duration 4) goes
//!   `Cold -> Heating -> Hot` and holds 1 unit of `power` while heating.
//! - `power` starts at 0; the goal is `kettle = Hot`.

use timelineforge_core::planning::{
    DurationInterval, DurativeAction, Effect, Expr, FluentDecl, PlanningProblem, Timing,
    ValueType,
};

use crate::{is, var};

pub const GENERATOR: &str = "gen";
pub const KETTLE: &str = "kettle";
pub const POWER: &str = "power";
pub const PROVIDED: i64 = 2;
pub const CONSUMED: i64 = 1;

/// `run`: provides `PROVIDED` power while `gen` is `Running`.
pub fn run() -> DurativeAction {
    DurativeAction::new("run", DurationInterval::fixed(10))
        .at_start(is(GENERATOR, "Off"))
        .with_effect(Effect::assign(Timing::start(), var(GENERATOR), Expr::object("Running")))
        .with_effect(Effect::assign(Timing::end(), var(GENERATOR), Expr::object("Off")))
        .with_effect(Effect::increase(Timing::start(), var(POWER), PROVIDED))
        .with_effect(Effect::decrease(Timing::end(), var(POWER), PROVIDED))
}

/// `heat`: holds `CONSUMED` power while `kettle` is `Heating`.
pub fn heat() -> DurativeAction {
    DurativeAction::new("heat", DurationInterval::fixed(4))
        .at_start(is(KETTLE, "Cold"))
        .with_effect(Effect::assign(Timing::start(), var(KETTLE), Expr::object("Heating")))
        .with_effect(Effect::assign(Timing::end(), var(KETTLE), Expr::object("Hot")))
        .with_effect(Effect::decrease(Timing::start(), var(POWER), CONSUMED))
        .with_effect(Effect::increase(Timing::end(), var(POWER), CONSUMED))
}

/// Types, objects and fluents, without actions.
pub fn domain() -> PlanningProblem {
    PlanningProblem::new("kitchen")
        .with_type("Gen")
        .with_type("Kettle")
        .with_object("Off", "Gen")
        .with_object("Running", "Gen")
        .with_object("Cold", "Kettle")
        .with_object("Heating", "Kettle")
        .with_object("Hot", "Kettle")
        .with_fluent(FluentDecl::new(GENERATOR, ValueType::user("Gen")))
        .with_fluent(FluentDecl::new(KETTLE, ValueType::user("Kettle")))
        .with_fluent(FluentDecl::new(POWER, ValueType::Int))
}

/// The full kitchen problem.
pub fn problem() -> PlanningProblem {
    domain()
        .with_action(run())
        .with_action(heat())
        .with_initial_value(Expr::Fluent(var(GENERATOR)), Expr::object("Off"))
        .with_initial_value(Expr::Fluent(var(KETTLE)), Expr::object("Cold"))
        .with_initial_value(Expr::Fluent(var(POWER)), Expr::int(0))
        .with_goal(is(KETTLE, "Hot"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_shape() {
        let problem = problem();
        assert_eq!(problem.fluents.len(), 3);
        assert_eq!(problem.actions.len(), 2);
        assert_eq!(problem.goals, vec![is(KETTLE, "Hot")]);
    }
}
