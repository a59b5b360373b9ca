//! Initial values and goals of grounded fluents.

use timelineforge_core::planning::{Expr, PlanningProblem};
use timelineforge_core::{ConversionError, Result};

use crate::ground::{ground_fluent, Domains};
use crate::stage1::Stage1;

/// Applies fluent defaults, then explicit initial values.
///
/// Resources may only start at `0`; timelines must start at one of their
/// own values.
pub fn resolve_initial_values(
    problem: &PlanningProblem,
    domains: &Domains,
    model: &mut Stage1,
) -> Result<()> {
    if let Some((value_type, _)) = problem.initial_defaults.first() {
        return Err(ConversionError::UnsupportedInitialDefault {
            fluent: value_type.to_string(),
            reason: "per-type initial defaults are not supported".to_string(),
        });
    }

    for (fluent_name, value) in &problem.fluent_defaults {
        let decl =
            problem
                .fluent(fluent_name)
                .ok_or_else(|| ConversionError::UnsupportedInitialDefault {
                    fluent: fluent_name.clone(),
                    reason: "default for an undeclared fluent".to_string(),
                })?;
        for ground in ground_fluent(decl, domains)? {
            set_initial_value(model, &ground.name, value)?;
        }
    }

    for (fluent, value) in &problem.initial_values {
        let key = fluent
            .ground_key()
            .ok_or_else(|| ConversionError::UnsupportedInitialDefault {
                fluent: fluent.to_string(),
                reason: "state variable is not ground".to_string(),
            })?;
        set_initial_value(model, &key, value)?;
    }
    Ok(())
}

fn set_initial_value(model: &mut Stage1, name: &str, value: &Expr) -> Result<()> {
    let unsupported = |reason: String| ConversionError::UnsupportedInitialDefault {
        fluent: name.to_string(),
        reason,
    };

    if let Some(resource) = model.resource_mut(name) {
        return match value.as_int() {
            Some(0) => {
                resource.initial_value = Some(0);
                Ok(())
            }
            Some(other) => Err(unsupported(format!(
                "resource must start at 0, not {}",
                other
            ))),
            None => Err(unsupported(format!("`{}` is not an integer constant", value))),
        };
    }

    let timeline = model
        .timeline_mut(name)
        .ok_or_else(|| unsupported("unknown state variable".to_string()))?;
    let value_name = value
        .value_name()
        .ok_or_else(|| unsupported(format!("`{}` is not an object constant", value)))?;
    if !timeline.has_value(&value_name) {
        return Err(unsupported(format!(
            "`{}` is not a value of the timeline",
            value_name
        )));
    }
    timeline.initial_value = Some(value_name);
    Ok(())
}

/// Records `timeline = value` goals. Later goals for the same timeline
/// overwrite earlier ones.
pub fn resolve_goals(problem: &PlanningProblem, model: &mut Stage1) -> Result<()> {
    let mut goals = Vec::new();
    for goal in &problem.goals {
        flatten_conjunction(goal, &mut goals);
    }

    for goal in goals {
        let (lhs, rhs) = match goal {
            Expr::Eq(lhs, rhs) => (lhs, rhs),
            other => {
                return Err(ConversionError::UnsupportedGoalShape(format!(
                    "`{}` is not an equality",
                    other
                )))
            }
        };
        let key = lhs.as_fluent().and_then(|f| f.ground_key()).ok_or_else(|| {
            ConversionError::UnsupportedGoalShape(format!(
                "`{}` is not a ground state variable",
                lhs
            ))
        })?;

        if model.resource(&key).is_some() {
            return Err(ConversionError::UnsupportedGoalShape(format!(
                "resource `{}` cannot be a goal",
                key
            )));
        }
        let timeline = model.timeline_mut(&key).ok_or_else(|| {
            ConversionError::UnsupportedGoalShape(format!("`{}` is not a timeline", key))
        })?;
        let value = rhs.value_name().ok_or_else(|| {
            ConversionError::UnsupportedGoalShape(format!("`{}` is not an object constant", rhs))
        })?;
        if !timeline.has_value(&value) {
            return Err(ConversionError::UnsupportedGoalShape(format!(
                "`{}` is not a value of `{}`",
                value, key
            )));
        }
        timeline.goal = Some(value);
    }
    Ok(())
}

fn flatten_conjunction<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::And(conjuncts) => {
            for c in conjuncts {
                flatten_conjunction(c, out);
            }
        }
        other => out.push(other),
    }
}
