//! Shape analysis of ground durative actions.
//!
//! An accepted action moves exactly one timeline through
//! `from -> temporary -> final` and optionally holds one resource while at
//! the temporary value, either providing it or consuming it. Analysis is a
//! pure function of the action and the grounded model; the checks run in a
//! fixed order and the first failing one is reported.

#[cfg(test)]
mod tests;

use timelineforge_config::EndConditionPolicy;
use timelineforge_core::planning::{Action, DurativeAction, Effect, EffectKind, Expr};
use timelineforge_core::{ActionPoint, ShapeViolation, TransitionPart};

use crate::stage1::{FluentKind, ResourceDelta, Stage1};

/// Everything the assembler needs from one accepted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTransition {
    pub action: String,
    pub timeline: String,
    pub from: String,
    pub temporary: String,
    pub final_value: String,
    pub duration: u32,
    /// Resource made available while at the temporary value.
    pub provides: Option<ResourceDelta>,
    /// Resource held while at the temporary value.
    pub consumes: Option<ResourceDelta>,
}

/// Validates one ground action and extracts its transition.
pub fn analyze_action(
    action: &Action,
    model: &Stage1,
    end_conditions: EndConditionPolicy,
) -> Result<ExtractedTransition, ShapeViolation> {
    let action = require_durative(action)?;
    require_no_simulated_effects(action)?;
    let duration = fixed_duration(action)?;
    let start = start_state(action, model, end_conditions)?;
    let effects = scan_effects(action, model, start.timeline.as_deref())?;
    let footprint = effects.footprint.symmetric()?;

    let timeline = effects
        .timeline
        .or(start.timeline)
        .ok_or(ShapeViolation::MissingTransition(TransitionPart::From))?;
    let from = start
        .from
        .ok_or(ShapeViolation::MissingTransition(TransitionPart::From))?;
    let temporary = effects
        .temporary
        .ok_or(ShapeViolation::MissingTransition(TransitionPart::Temporary))?;
    let final_value = effects
        .final_value
        .ok_or(ShapeViolation::MissingTransition(TransitionPart::Final))?;

    for (part, value) in [
        (TransitionPart::From, &from),
        (TransitionPart::Temporary, &temporary),
        (TransitionPart::Final, &final_value),
    ] {
        require_value(model, &timeline, value, part)?;
    }

    Ok(ExtractedTransition {
        action: action.name.clone(),
        timeline,
        from,
        temporary,
        final_value,
        duration,
        provides: footprint.provides,
        consumes: footprint.consumes,
    })
}

fn require_durative(action: &Action) -> Result<&DurativeAction, ShapeViolation> {
    action.as_durative().ok_or(ShapeViolation::NotDurative)
}

fn require_no_simulated_effects(action: &DurativeAction) -> Result<(), ShapeViolation> {
    if action.simulated_effects.is_empty() {
        Ok(())
    } else {
        Err(ShapeViolation::SimulatedEffects)
    }
}

fn fixed_duration(action: &DurativeAction) -> Result<u32, ShapeViolation> {
    let (lower, upper) = match (action.duration.lower.as_int(), action.duration.upper.as_int()) {
        (Some(lower), Some(upper)) => (lower, upper),
        _ => return Err(ShapeViolation::NonConstantDuration),
    };
    if lower != upper {
        return Err(ShapeViolation::AsymmetricDuration { lower, upper });
    }
    u32::try_from(lower).map_err(|_| ShapeViolation::InvalidDuration(lower))
}

fn require_value(
    model: &Stage1,
    timeline: &str,
    value: &str,
    part: TransitionPart,
) -> Result<(), ShapeViolation> {
    let known = model
        .timeline(timeline)
        .is_some_and(|t| t.has_value(value));
    if known {
        Ok(())
    } else {
        Err(ShapeViolation::UnknownValue {
            timeline: timeline.to_string(),
            value: value.to_string(),
            part,
        })
    }
}

// Timeline and source value fixed by the start conditions.
#[derive(Debug, Default)]
struct StartState {
    timeline: Option<String>,
    from: Option<String>,
}

fn start_state(
    action: &DurativeAction,
    model: &Stage1,
    end_conditions: EndConditionPolicy,
) -> Result<StartState, ShapeViolation> {
    let mut state = StartState::default();
    for timed in &action.conditions {
        let interval = timed.interval;
        if interval.is_at_end() {
            match end_conditions {
                EndConditionPolicy::Ignore => continue,
                EndConditionPolicy::Reject => {
                    return Err(ShapeViolation::EndCondition {
                        fluent: condition_subject(&timed.condition),
                    })
                }
            }
        }
        if !interval.is_at_start() {
            return Err(ShapeViolation::UnsupportedConditionTiming);
        }

        let mut conjuncts = Vec::new();
        flatten(&timed.condition, &mut conjuncts);
        for cond in conjuncts {
            let (timeline, value) = equality_test(cond, model)?;
            fix_once(&mut state.timeline, timeline, |first, second| {
                ShapeViolation::MultipleStateVariables { first, second }
            })?;
            fix_once(&mut state.from, value, |first, second| {
                ShapeViolation::ConflictingTransitionFrom { first, second }
            })?;
        }
    }
    Ok(state)
}

fn flatten<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::And(conjuncts) => conjuncts.iter().for_each(|c| flatten(c, out)),
        other => out.push(other),
    }
}

// Splits `timeline == value` into its ground timeline key and value.
fn equality_test(cond: &Expr, model: &Stage1) -> Result<(String, String), ShapeViolation> {
    let (lhs, rhs) = match cond {
        Expr::Eq(lhs, rhs) => (lhs, rhs),
        _ => return Err(ShapeViolation::NonEqualityCondition),
    };
    let fluent = lhs
        .as_fluent()
        .ok_or(ShapeViolation::NonEqualityCondition)?;
    let value = rhs
        .value_name()
        .ok_or(ShapeViolation::NonEqualityCondition)?;
    let key = fluent.display_key();
    if model.kind_of(&key) != Some(FluentKind::Timeline) {
        return Err(ShapeViolation::NotATimeline { fluent: key });
    }
    Ok((key, value))
}

fn condition_subject(cond: &Expr) -> String {
    match cond {
        Expr::Eq(lhs, _) => lhs.to_string(),
        other => other.to_string(),
    }
}

// Sets `slot` on first use; afterwards the same value must be seen again.
fn fix_once<F>(slot: &mut Option<String>, value: String, conflict: F) -> Result<(), ShapeViolation>
where
    F: FnOnce(String, String) -> ShapeViolation,
{
    match slot {
        Some(existing) if *existing != value => Err(conflict(existing.clone(), value)),
        Some(_) => Ok(()),
        None => {
            *slot = Some(value);
            Ok(())
        }
    }
}

/// Resource effects per action point.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Footprint {
    start_provide: Option<ResourceDelta>,
    end_provide: Option<ResourceDelta>,
    start_consume: Option<ResourceDelta>,
    end_consume: Option<ResourceDelta>,
}

/// A footprint whose start and end agree.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SymmetricFootprint {
    provides: Option<ResourceDelta>,
    consumes: Option<ResourceDelta>,
}

impl Footprint {
    // Acquired at one end, released in the same amount at the other.
    fn symmetric(self) -> Result<SymmetricFootprint, ShapeViolation> {
        if self.start_provide != self.end_provide || self.start_consume != self.end_consume {
            return Err(ShapeViolation::ResourceAsymmetry);
        }
        Ok(SymmetricFootprint {
            provides: self.start_provide,
            consumes: self.start_consume,
        })
    }
}

fn record(
    slot: &mut Option<ResourceDelta>,
    delta: ResourceDelta,
    direction: &'static str,
    point: ActionPoint,
) -> Result<(), ShapeViolation> {
    match slot {
        Some(existing) if *existing != delta => {
            Err(ShapeViolation::MultipleResources { direction, point })
        }
        _ => {
            *slot = Some(delta);
            Ok(())
        }
    }
}

#[derive(Debug, Default)]
struct EffectScan {
    timeline: Option<String>,
    temporary: Option<String>,
    final_value: Option<String>,
    footprint: Footprint,
}

fn scan_effects(
    action: &DurativeAction,
    model: &Stage1,
    timeline: Option<&str>,
) -> Result<EffectScan, ShapeViolation> {
    let mut scan = EffectScan {
        timeline: timeline.map(str::to_owned),
        ..EffectScan::default()
    };

    for effect in &action.effects {
        let fluent = effect.fluent.display_key();
        if !effect.is_unconditional() {
            return Err(ShapeViolation::ConditionalEffect { fluent });
        }
        let point = action_point(effect).ok_or_else(|| ShapeViolation::UnsupportedEffectTiming {
            fluent: fluent.clone(),
        })?;

        match effect.kind {
            EffectKind::Increase | EffectKind::Decrease => {
                let delta = resource_delta(effect, &fluent, model)?;
                let footprint = &mut scan.footprint;
                let increase = effect.kind == EffectKind::Increase;
                let (slot, direction) = match (increase, point) {
                    (true, ActionPoint::Start) => (&mut footprint.start_provide, "provided"),
                    (true, ActionPoint::End) => (&mut footprint.end_consume, "released"),
                    (false, ActionPoint::Start) => (&mut footprint.start_consume, "consumed"),
                    (false, ActionPoint::End) => (&mut footprint.end_provide, "withdrawn"),
                };
                record(slot, delta, direction, point)?;
            }
            EffectKind::Assign => {
                if model.kind_of(&fluent) != Some(FluentKind::Timeline) {
                    return Err(ShapeViolation::NonFiniteAssignTarget { fluent });
                }
                let value = effect.value.value_name().ok_or_else(|| {
                    ShapeViolation::NonConstantAssignment {
                        fluent: fluent.clone(),
                    }
                })?;
                fix_once(&mut scan.timeline, fluent, |first, second| {
                    ShapeViolation::MultipleStateVariables { first, second }
                })?;
                let slot = match point {
                    ActionPoint::Start => &mut scan.temporary,
                    ActionPoint::End => &mut scan.final_value,
                };
                fix_once(slot, value, |first, second| {
                    ShapeViolation::ConflictingTransitionTarget {
                        point,
                        first,
                        second,
                    }
                })?;
            }
        }
    }
    Ok(scan)
}

fn action_point(effect: &Effect) -> Option<ActionPoint> {
    if effect.timing.is_start() {
        Some(ActionPoint::Start)
    } else if effect.timing.is_end() {
        Some(ActionPoint::End)
    } else {
        None
    }
}

fn resource_delta(
    effect: &Effect,
    fluent: &str,
    model: &Stage1,
) -> Result<ResourceDelta, ShapeViolation> {
    if model.kind_of(fluent) != Some(FluentKind::Resource) {
        return Err(ShapeViolation::NotAResource {
            fluent: fluent.to_string(),
        });
    }
    let amount = effect
        .value
        .as_int()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| ShapeViolation::InvalidResourceAmount {
            resource: fluent.to_string(),
        })?;
    Ok(ResourceDelta::new(fluent, amount))
}
