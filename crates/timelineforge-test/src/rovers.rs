//! Parameterized fluents and actions over two rovers.
//!
//! - `at(r): Place` where `Place` has subtypes `Location = {base, crater}`
//!   and `Road = {track}`; `drive(r)` goes `base -> track -> crater`.
//! - `radio(r): Radio = {Silent, Sending, Sent}`; `transmit(r)` goes
//!   `Silent -> Sending -> Sent` and holds 1 unit of `bandwidth`.
//! - `antenna: Antenna = {Folded, Open}`; `deploy` goes
//!   `Folded -> Open -> Folded` and provides 2 units of `bandwidth`.
//!
//! Grounds to 5 timelines, 1 resource and 5 actions.

use timelineforge_core::planning::{
    DurationInterval, DurativeAction, Effect, Expr, FluentApp, FluentDecl, PlanningProblem,
    Timing, UserType, ValueType,
};

use crate::{is, var};

pub const ROVERS: [&str; 2] = ["r1", "r2"];

fn of_rover(name: &str) -> FluentApp {
    FluentApp::new(name, vec![Expr::param("r")])
}

fn rover_is(name: &str, value: &str) -> Expr {
    Expr::eq(Expr::Fluent(of_rover(name)), Expr::object(value))
}

pub fn drive() -> DurativeAction {
    DurativeAction::new("drive", DurationInterval::fixed(6))
        .with_parameter("r", "Rover")
        .at_start(rover_is("at", "base"))
        .with_effect(Effect::assign(Timing::start(), of_rover("at"), Expr::object("track")))
        .with_effect(Effect::assign(Timing::end(), of_rover("at"), Expr::object("crater")))
}

pub fn transmit() -> DurativeAction {
    DurativeAction::new("transmit", DurationInterval::fixed(2))
        .with_parameter("r", "Rover")
        .at_start(rover_is("radio", "Silent"))
        .with_effect(Effect::assign(Timing::start(), of_rover("radio"), Expr::object("Sending")))
        .with_effect(Effect::assign(Timing::end(), of_rover("radio"), Expr::object("Sent")))
        .with_effect(Effect::decrease(Timing::start(), var("bandwidth"), 1))
        .with_effect(Effect::increase(Timing::end(), var("bandwidth"), 1))
}

pub fn deploy() -> DurativeAction {
    DurativeAction::new("deploy", DurationInterval::fixed(20))
        .at_start(is("antenna", "Folded"))
        .with_effect(Effect::assign(Timing::start(), var("antenna"), Expr::object("Open")))
        .with_effect(Effect::assign(Timing::end(), var("antenna"), Expr::object("Folded")))
        .with_effect(Effect::increase(Timing::start(), var("bandwidth"), 2))
        .with_effect(Effect::decrease(Timing::end(), var("bandwidth"), 2))
}

pub fn problem() -> PlanningProblem {
    let mut problem = PlanningProblem::new("rovers")
        .with_type("Rover")
        .with_type("Place")
        .with_user_type(UserType::new("Location").with_parent("Place"))
        .with_user_type(UserType::new("Road").with_parent("Place"))
        .with_type("Radio")
        .with_type("Antenna");
    for rover in ROVERS {
        problem = problem.with_object(rover, "Rover");
    }
    problem
        .with_object("base", "Location")
        .with_object("crater", "Location")
        .with_object("track", "Road")
        .with_object("Silent", "Radio")
        .with_object("Sending", "Radio")
        .with_object("Sent", "Radio")
        .with_object("Folded", "Antenna")
        .with_object("Open", "Antenna")
        .with_fluent(FluentDecl::new("at", ValueType::user("Place")).with_parameter("r", "Rover"))
        .with_fluent(
            FluentDecl::new("radio", ValueType::user("Radio")).with_parameter("r", "Rover"),
        )
        .with_fluent(FluentDecl::new("antenna", ValueType::user("Antenna")))
        .with_fluent(FluentDecl::new("bandwidth", ValueType::Int))
        .with_fluent_default("at", Expr::object("base"))
        .with_fluent_default("radio", Expr::object("Silent"))
        .with_initial_value(Expr::Fluent(var("antenna")), Expr::object("Folded"))
        .with_initial_value(Expr::Fluent(var("bandwidth")), Expr::int(0))
        .with_goal(Expr::And(vec![
            Expr::eq(Expr::fluent("at", ["r1"]), Expr::object("crater")),
            Expr::eq(Expr::fluent("radio", ["r2"]), Expr::object("Sent")),
        ]))
        .with_action(drive())
        .with_action(transmit())
        .with_action(deploy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_includes_subtypes() {
        let problem = problem();
        assert_eq!(problem.objects_of("Place"), vec!["base", "crater", "track"]);
        assert_eq!(problem.objects_of("Road"), vec!["track"]);
    }

    #[test]
    fn test_actions_are_parameterized() {
        let problem = problem();
        assert_eq!(problem.actions[0].parameters().len(), 1);
        assert!(problem.actions[2].parameters().is_empty());
    }
}
