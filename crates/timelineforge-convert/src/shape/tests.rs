//! Tests for action shape analysis.

use timelineforge_config::EndConditionPolicy;
use timelineforge_core::planning::{
    Action, DurationInterval, DurativeAction, Effect, Expr, FluentApp, FluentDecl,
    InstantaneousAction, PlanningProblem, SimulatedEffect, TimeInterval, Timepoint, Timing,
    ValueType,
};
use timelineforge_core::{ActionPoint, ShapeViolation, TransitionPart};

use super::{analyze_action, ExtractedTransition};
use crate::ground::Domains;
use crate::stage1::{ResourceDelta, Stage1};

fn model() -> Stage1 {
    let problem = PlanningProblem::new("plant")
        .with_type("Gen")
        .with_type("Kettle")
        .with_object("Off", "Gen")
        .with_object("Running", "Gen")
        .with_object("Cold", "Kettle")
        .with_object("Heating", "Kettle")
        .with_object("Hot", "Kettle")
        .with_fluent(FluentDecl::new("gen", ValueType::user("Gen")))
        .with_fluent(FluentDecl::new("kettle", ValueType::user("Kettle")))
        .with_fluent(FluentDecl::new("power", ValueType::Int))
        .with_fluent(FluentDecl::new("water", ValueType::Int));
    Stage1::ground(&problem, &Domains::from_problem(&problem)).unwrap()
}

fn var(name: &str) -> FluentApp {
    FluentApp::new(name, vec![])
}

fn is(name: &str, value: &str) -> Expr {
    Expr::eq(Expr::Fluent(var(name)), Expr::object(value))
}

fn heat() -> DurativeAction {
    DurativeAction::new("heat", DurationInterval::fixed(5))
        .at_start(is("kettle", "Cold"))
        .with_effect(Effect::assign(Timing::start(), var("kettle"), Expr::object("Heating")))
        .with_effect(Effect::assign(Timing::end(), var("kettle"), Expr::object("Hot")))
}

fn analyze(action: DurativeAction) -> Result<ExtractedTransition, ShapeViolation> {
    analyze_action(&Action::from(action), &model(), EndConditionPolicy::Ignore)
}

#[test]
fn test_plain_transition() {
    let t = analyze(heat()).unwrap();
    assert_eq!(t.action, "heat");
    assert_eq!(t.timeline, "kettle");
    assert_eq!(t.from, "Cold");
    assert_eq!(t.temporary, "Heating");
    assert_eq!(t.final_value, "Hot");
    assert_eq!(t.duration, 5);
    assert_eq!(t.provides, None);
    assert_eq!(t.consumes, None);
}

#[test]
fn test_consuming_transition() {
    let action = heat()
        .with_effect(Effect::decrease(Timing::start(), var("power"), 1))
        .with_effect(Effect::increase(Timing::end(), var("power"), 1));

    let t = analyze(action).unwrap();
    assert_eq!(t.consumes, Some(ResourceDelta::new("power", 1)));
    assert_eq!(t.provides, None);
}

#[test]
fn test_providing_transition() {
    let action = DurativeAction::new("run", DurationInterval::fixed(10))
        .at_start(is("gen", "Off"))
        .with_effect(Effect::assign(Timing::start(), var("gen"), Expr::object("Running")))
        .with_effect(Effect::assign(Timing::end(), var("gen"), Expr::object("Off")))
        .with_effect(Effect::increase(Timing::start(), var("power"), 2))
        .with_effect(Effect::decrease(Timing::end(), var("power"), 2));

    let t = analyze(action).unwrap();
    assert_eq!(t.provides, Some(ResourceDelta::new("power", 2)));
    assert_eq!(t.consumes, None);
    assert_eq!(t.final_value, "Off");
}

#[test]
fn test_instantaneous_rejected() {
    let action = Action::from(InstantaneousAction::new("flip"));
    assert_eq!(
        analyze_action(&action, &model(), EndConditionPolicy::Ignore),
        Err(ShapeViolation::NotDurative)
    );
}

#[test]
fn test_simulated_effects_rejected() {
    let action = heat().with_simulated_effect(SimulatedEffect {
        timing: Timing::end(),
        fluents: vec![var("kettle")],
    });
    assert_eq!(analyze(action), Err(ShapeViolation::SimulatedEffects));
}

#[test]
fn test_duration_must_be_fixed() {
    let mut action = heat();
    action.duration = DurationInterval::closed(Expr::int(3), Expr::int(7));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::AsymmetricDuration { lower: 3, upper: 7 })
    );

    let mut action = heat();
    action.duration = DurationInterval::closed(Expr::Fluent(var("power")), Expr::int(7));
    assert_eq!(analyze(action), Err(ShapeViolation::NonConstantDuration));

    let mut action = heat();
    action.duration = DurationInterval::fixed(-2);
    assert_eq!(analyze(action), Err(ShapeViolation::InvalidDuration(-2)));
}

#[test]
fn test_overall_condition_rejected() {
    let action = heat().with_condition(TimeInterval::overall(), is("gen", "Running"));
    assert_eq!(analyze(action), Err(ShapeViolation::UnsupportedConditionTiming));
}

#[test]
fn test_end_condition_policy() {
    let action = heat().at_end(is("gen", "Running"));

    assert!(analyze(action.clone()).is_ok());
    assert_eq!(
        analyze_action(&Action::from(action), &model(), EndConditionPolicy::Reject),
        Err(ShapeViolation::EndCondition {
            fluent: "gen".to_string()
        })
    );
}

#[test]
fn test_conjunctive_start_condition() {
    let action = DurativeAction::new("heat", DurationInterval::fixed(5))
        .at_start(Expr::And(vec![is("kettle", "Cold"), is("kettle", "Cold")]))
        .with_effect(Effect::assign(Timing::start(), var("kettle"), Expr::object("Heating")))
        .with_effect(Effect::assign(Timing::end(), var("kettle"), Expr::object("Hot")));
    assert_eq!(analyze(action).unwrap().from, "Cold");
}

#[test]
fn test_conflicting_start_conditions() {
    let action = heat().at_start(is("kettle", "Hot"));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::ConflictingTransitionFrom {
            first: "Cold".to_string(),
            second: "Hot".to_string()
        })
    );
}

#[test]
fn test_condition_on_second_timeline() {
    let action = heat().at_start(is("gen", "Running"));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::MultipleStateVariables {
            first: "kettle".to_string(),
            second: "gen".to_string()
        })
    );
}

#[test]
fn test_condition_on_resource() {
    let action = heat().at_start(Expr::eq(Expr::Fluent(var("power")), Expr::int(0)));
    assert_eq!(analyze(action), Err(ShapeViolation::NonEqualityCondition));

    let action = heat().at_start(Expr::eq(Expr::Fluent(var("power")), Expr::object("Cold")));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::NotATimeline {
            fluent: "power".to_string()
        })
    );
}

#[test]
fn test_negated_condition_rejected() {
    let action = heat().at_start(Expr::not(is("gen", "Off")));
    assert_eq!(analyze(action), Err(ShapeViolation::NonEqualityCondition));
}

#[test]
fn test_conditional_effect_rejected() {
    let action = heat().with_effect(
        Effect::decrease(Timing::start(), var("power"), 1).with_condition(is("gen", "Running")),
    );
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::ConditionalEffect {
            fluent: "power".to_string()
        })
    );
}

#[test]
fn test_delayed_effect_rejected() {
    let action = heat().with_effect(Effect::decrease(
        Timing::delayed(Timepoint::Start, 1),
        var("power"),
        1,
    ));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::UnsupportedEffectTiming {
            fluent: "power".to_string()
        })
    );
}

#[test]
fn test_two_resources_consumed() {
    let action = heat()
        .with_effect(Effect::decrease(Timing::start(), var("power"), 1))
        .with_effect(Effect::decrease(Timing::start(), var("water"), 1));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::MultipleResources {
            direction: "consumed",
            point: ActionPoint::Start
        })
    );
}

#[test]
fn test_increase_on_timeline_rejected() {
    let action = heat().with_effect(Effect::increase(Timing::start(), var("gen"), 1));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::NotAResource {
            fluent: "gen".to_string()
        })
    );
}

#[test]
fn test_negative_amount_rejected() {
    let action = heat().with_effect(Effect::decrease(Timing::start(), var("power"), -1));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::InvalidResourceAmount {
            resource: "power".to_string()
        })
    );
}

#[test]
fn test_assign_to_resource_rejected() {
    let action = heat().with_effect(Effect::assign(Timing::start(), var("power"), Expr::int(3)));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::NonFiniteAssignTarget {
            fluent: "power".to_string()
        })
    );
}

#[test]
fn test_assign_non_constant_rejected() {
    let action = DurativeAction::new("heat", DurationInterval::fixed(5))
        .at_start(is("kettle", "Cold"))
        .with_effect(Effect::assign(
            Timing::start(),
            var("kettle"),
            Expr::Fluent(var("gen")),
        ));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::NonConstantAssignment {
            fluent: "kettle".to_string()
        })
    );
}

#[test]
fn test_conflicting_temporary_assignments() {
    let action = heat().with_effect(Effect::assign(
        Timing::start(),
        var("kettle"),
        Expr::object("Hot"),
    ));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::ConflictingTransitionTarget {
            point: ActionPoint::Start,
            first: "Heating".to_string(),
            second: "Hot".to_string()
        })
    );
}

#[test]
fn test_missing_parts() {
    let no_condition = DurativeAction::new("heat", DurationInterval::fixed(5))
        .with_effect(Effect::assign(Timing::start(), var("kettle"), Expr::object("Heating")))
        .with_effect(Effect::assign(Timing::end(), var("kettle"), Expr::object("Hot")));
    assert_eq!(
        analyze(no_condition),
        Err(ShapeViolation::MissingTransition(TransitionPart::From))
    );

    let no_final = DurativeAction::new("heat", DurationInterval::fixed(5))
        .at_start(is("kettle", "Cold"))
        .with_effect(Effect::assign(Timing::start(), var("kettle"), Expr::object("Heating")));
    assert_eq!(
        analyze(no_final),
        Err(ShapeViolation::MissingTransition(TransitionPart::Final))
    );
}

#[test]
fn test_unknown_value() {
    let action = DurativeAction::new("heat", DurationInterval::fixed(5))
        .at_start(is("kettle", "Cold"))
        .with_effect(Effect::assign(Timing::start(), var("kettle"), Expr::object("Boiling")))
        .with_effect(Effect::assign(Timing::end(), var("kettle"), Expr::object("Hot")));
    assert_eq!(
        analyze(action),
        Err(ShapeViolation::UnknownValue {
            timeline: "kettle".to_string(),
            value: "Boiling".to_string(),
            part: TransitionPart::Temporary
        })
    );
}

#[test]
fn test_asymmetric_resource_use() {
    let missing_release = heat().with_effect(Effect::decrease(Timing::start(), var("power"), 1));
    assert_eq!(analyze(missing_release), Err(ShapeViolation::ResourceAsymmetry));

    let different_amount = heat()
        .with_effect(Effect::decrease(Timing::start(), var("power"), 1))
        .with_effect(Effect::increase(Timing::end(), var("power"), 2));
    assert_eq!(analyze(different_amount), Err(ShapeViolation::ResourceAsymmetry));
}
