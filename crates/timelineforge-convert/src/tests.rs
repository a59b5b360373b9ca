//! End-to-end conversion tests.

use timelineforge_config::{ConversionConfig, EndConditionPolicy};
use timelineforge_core::planning::{
    DurationInterval, DurativeAction, Effect, Expr, FluentDecl, InstantaneousAction,
    PlanningProblem, Timing, ValueType,
};
use timelineforge_core::timeline::{
    Condition, DurationBounds, StaticToken, TemporalCondition, TemporalRelation,
};
use timelineforge_core::{ActionPoint, ConversionError, ShapeViolation};
use timelineforge_test::{conflicts, is, kitchen, rovers, switch, var};

use crate::{convert, Converter};

fn or(alternatives: Vec<TemporalCondition>) -> Condition {
    Condition::Or(alternatives)
}

#[test]
fn test_switch_scenario() {
    let result = convert(&switch::problem()).unwrap();
    assert_eq!(result.timelines.len(), 1);

    let mode = result.timeline(switch::MODE).unwrap();
    let values: Vec<_> = mode.token_types.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["Idle", "Active"]);
    assert_eq!(mode.static_tokens, vec![StaticToken::fact("Idle", 0)]);

    let idle = mode.token_type("Idle").unwrap();
    assert_eq!(idle.duration, DurationBounds::at_least(1));
    assert_eq!(idle.capacity, 0);
    // No fixed duration, so no outgoing Meets.
    assert_eq!(
        idle.conditions,
        vec![or(vec![TemporalCondition::met_by("mode", "Active")])]
    );

    let active = mode.token_type("Active").unwrap();
    assert_eq!(active.duration, DurationBounds::fixed(5));
    assert_eq!(active.capacity, 0);
    assert_eq!(
        active.conditions,
        vec![
            or(vec![TemporalCondition::met_by("mode", "Idle")]),
            or(vec![TemporalCondition::meets("mode", "Idle")]),
        ]
    );
}

#[test]
fn test_kitchen_scenario() {
    let result = convert(&kitchen::problem()).unwrap();

    let heating = result
        .timeline(kitchen::KETTLE)
        .and_then(|t| t.token_type("Heating"))
        .unwrap();
    let covers: Vec<_> = heating
        .conditions
        .iter()
        .filter(|c| c.relation() == Some(TemporalRelation::Cover))
        .collect();
    assert_eq!(
        covers,
        vec![&or(vec![TemporalCondition::cover("gen", "Running", 1)])]
    );
    assert_eq!(heating.conditions[0], *covers[0]);
    assert_eq!(heating.capacity, 0);

    let generator = result.timeline(kitchen::GENERATOR).unwrap();
    assert_eq!(generator.token_type("Running").unwrap().capacity, 2);
    assert_eq!(generator.token_type("Off").unwrap().capacity, 0);

    let kettle = result.timeline(kitchen::KETTLE).unwrap();
    assert_eq!(
        kettle.static_tokens,
        vec![StaticToken::fact("Cold", 0), StaticToken::goal("Hot")]
    );
}

#[test]
fn test_two_edges_per_action() {
    let result = convert(&kitchen::problem()).unwrap();

    // One MetBy alternative per distinct edge into a value.
    let met_by = result
        .timelines
        .iter()
        .flat_map(|t| &t.token_types)
        .flat_map(|t| &t.conditions)
        .filter(|c| c.relation() == Some(TemporalRelation::MetBy))
        .map(|c| c.alternatives().len())
        .sum::<usize>();
    assert_eq!(met_by, 2 * 2);
}

#[test]
fn test_two_providers_rejected() {
    assert_eq!(
        convert(&conflicts::two_providers()),
        Err(ConversionError::ResourceProviderConflict {
            resource: kitchen::POWER.to_string(),
            provider_count: 2,
        })
    );
}

#[test]
fn test_duplicate_provider_action_rejected() {
    assert_eq!(
        convert(&conflicts::duplicate_provider()),
        Err(ConversionError::ResourceProviderConflict {
            resource: kitchen::POWER.to_string(),
            provider_count: 2,
        })
    );
}

#[test]
fn test_unprovided_resource_rejected() {
    assert_eq!(
        convert(&conflicts::unprovided_resource()),
        Err(ConversionError::ResourceProviderConflict {
            resource: kitchen::POWER.to_string(),
            provider_count: 0,
        })
    );
}

#[test]
fn test_conflicting_temporary_rejected() {
    let err = convert(&conflicts::conflicting_temporary()).unwrap_err();
    assert_eq!(
        err,
        ConversionError::action_shape(
            "heat",
            ShapeViolation::ConflictingTransitionTarget {
                point: ActionPoint::Start,
                first: "Heating".to_string(),
                second: "Hot".to_string(),
            }
        )
    );
}

#[test]
fn test_asymmetric_consumer_rejected() {
    let err = convert(&conflicts::asymmetric_consumer()).unwrap_err();
    assert_eq!(err.shape_violation(), Some(&ShapeViolation::ResourceAsymmetry));
}

#[test]
fn test_conflicting_claims_rejected() {
    let err = convert(&conflicts::conflicting_claims()).unwrap_err();
    assert_eq!(
        err,
        ConversionError::action_shape(
            "heat_slow",
            ShapeViolation::ConflictingValueClaim {
                timeline: "kettle".to_string(),
                value: "Heating".to_string(),
                claimed_by: "heat".to_string(),
            }
        )
    );
}

#[test]
fn test_instantaneous_action_rejected() {
    let problem = switch::problem().with_action(InstantaneousAction::new("reset"));
    let err = convert(&problem).unwrap_err();
    assert_eq!(
        err,
        ConversionError::action_shape("reset", ShapeViolation::NotDurative)
    );
}

#[test]
fn test_end_condition_policy() {
    let guarded = switch::activate().at_end(is(switch::MODE, "Active"));
    let problem = switch::domain().with_action(guarded);

    assert!(convert(&problem).is_ok());

    let strict = Converter::new(
        ConversionConfig::default().with_end_conditions(EndConditionPolicy::Reject),
    );
    assert_eq!(
        strict.convert(&problem).unwrap_err().shape_violation(),
        Some(&ShapeViolation::EndCondition {
            fluent: switch::MODE.to_string()
        })
    );
}

#[test]
fn test_unbounded_min_duration_config() {
    let converter =
        Converter::new(ConversionConfig::default().with_unbounded_min_duration(4));
    let result = converter.convert(&switch::problem()).unwrap();
    let idle = result
        .timeline(switch::MODE)
        .and_then(|t| t.token_type("Idle"))
        .unwrap();
    assert_eq!(idle.duration, DurationBounds::at_least(4));
}

#[test]
fn test_rovers_grounding() {
    let result = convert(&rovers::problem()).unwrap();

    let names: Vec<_> = result.timelines.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["at(r1)", "at(r2)", "radio(r1)", "radio(r2)", "antenna"]
    );
    // Five initial facts plus two goals.
    assert_eq!(result.static_token_count(), 7);

    let at_r2 = result.timeline("at(r2)").unwrap();
    let values: Vec<_> = at_r2.token_types.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["base", "crater", "track"]);
    let track = at_r2.token_type("track").unwrap();
    assert_eq!(track.duration, DurationBounds::fixed(6));
    assert_eq!(
        track.conditions,
        vec![
            or(vec![TemporalCondition::met_by("at(r2)", "base")]),
            or(vec![TemporalCondition::meets("at(r2)", "crater")]),
        ]
    );

    let sending = result
        .timeline("radio(r1)")
        .and_then(|t| t.token_type("Sending"))
        .unwrap();
    assert_eq!(
        sending.conditions[0],
        or(vec![TemporalCondition::cover("antenna", "Open", 1)])
    );
    let antenna = result.timeline("antenna").unwrap();
    assert_eq!(antenna.token_type("Open").unwrap().capacity, 2);

    let radio_r2 = result.timeline("radio(r2)").unwrap();
    assert_eq!(
        radio_r2.static_tokens,
        vec![StaticToken::fact("Silent", 0), StaticToken::goal("Sent")]
    );
}

#[test]
fn test_bool_timeline() {
    let flash = DurativeAction::new("flash", DurationInterval::fixed(1))
        .at_start(Expr::eq(Expr::Fluent(var("lit")), Expr::Bool(false)))
        .with_effect(Effect::assign(Timing::start(), var("lit"), Expr::Bool(true)))
        .with_effect(Effect::assign(Timing::end(), var("lit"), Expr::Bool(false)));
    let problem = PlanningProblem::new("lamp")
        .with_fluent(FluentDecl::new("lit", ValueType::Bool))
        .with_initial_value(Expr::Fluent(var("lit")), Expr::Bool(false))
        .with_action(flash);

    let result = convert(&problem).unwrap();
    let lit = result.timeline("lit").unwrap();
    assert_eq!(lit.token_type("true").unwrap().duration, DurationBounds::fixed(1));
    assert_eq!(lit.static_tokens, vec![StaticToken::fact("false", 0)]);
}

#[test]
fn test_empty_problem() {
    let result = convert(&PlanningProblem::new("empty")).unwrap();
    assert!(result.timelines.is_empty());
    assert_eq!(result.token_type_count(), 0);
}
