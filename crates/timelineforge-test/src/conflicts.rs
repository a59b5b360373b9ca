//! Problems the conversion must reject.

use timelineforge_core::planning::{
    DurationInterval, DurativeAction, Effect, Expr, FluentDecl, PlanningProblem, Timing,
    ValueType,
};

use crate::{is, kitchen, var};

/// The kitchen problem plus a second generator that also provides power.
pub fn two_providers() -> PlanningProblem {
    let backup = DurativeAction::new("run_backup", DurationInterval::fixed(10))
        .at_start(is("backup", "Off"))
        .with_effect(Effect::assign(Timing::start(), var("backup"), Expr::object("Running")))
        .with_effect(Effect::assign(Timing::end(), var("backup"), Expr::object("Off")))
        .with_effect(Effect::increase(Timing::start(), var(kitchen::POWER), 3))
        .with_effect(Effect::decrease(Timing::end(), var(kitchen::POWER), 3));

    kitchen::problem()
        .with_fluent(FluentDecl::new("backup", ValueType::user("Gen")))
        .with_action(backup)
}

/// An integer fluent nothing provides.
pub fn unprovided_resource() -> PlanningProblem {
    kitchen::domain()
        .with_action(kitchen::heat())
        .with_initial_value(Expr::Fluent(var(kitchen::POWER)), Expr::int(0))
}

/// The `heat` action assigning two different temporary values at start.
pub fn conflicting_temporary() -> PlanningProblem {
    let heat = kitchen::heat().with_effect(Effect::assign(
        Timing::start(),
        var(kitchen::KETTLE),
        Expr::object("Hot"),
    ));
    kitchen::domain().with_action(kitchen::run()).with_action(heat)
}

/// A consumer whose release amount differs from its acquire amount.
pub fn asymmetric_consumer() -> PlanningProblem {
    let heat = DurativeAction::new("heat", DurationInterval::fixed(4))
        .at_start(is(kitchen::KETTLE, "Cold"))
        .with_effect(Effect::assign(Timing::start(), var(kitchen::KETTLE), Expr::object("Heating")))
        .with_effect(Effect::assign(Timing::end(), var(kitchen::KETTLE), Expr::object("Hot")))
        .with_effect(Effect::decrease(Timing::start(), var(kitchen::POWER), 1))
        .with_effect(Effect::increase(Timing::end(), var(kitchen::POWER), 2));
    kitchen::domain().with_action(kitchen::run()).with_action(heat)
}

/// Two actions claiming `Heating` with different durations.
pub fn conflicting_claims() -> PlanningProblem {
    let mut slow = kitchen::heat();
    slow.name = "heat_slow".to_string();
    slow.duration = DurationInterval::fixed(9);
    kitchen::problem().with_action(slow)
}

/// The kitchen problem with `run` declared a second time under another name.
pub fn duplicate_provider() -> PlanningProblem {
    let mut run_again = kitchen::run();
    run_again.name = "run_again".to_string();
    kitchen::problem().with_action(run_again)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_providers_adds_backup() {
        let problem = two_providers();
        assert_eq!(problem.fluents.len(), 4);
        assert_eq!(problem.actions.len(), 3);
    }

    #[test]
    fn test_conflicting_temporary_has_three_assignments() {
        let problem = conflicting_temporary();
        let heat = problem.actions[1].as_durative().unwrap();
        assert_eq!(heat.effects.len(), 5);
    }
}
