//! Folds extracted transitions into the intermediate model.

use timelineforge_core::timeline::ObjectRef;
use timelineforge_core::{ConversionError, Result, ShapeViolation, TransitionPart};

use crate::shape::ExtractedTransition;
use crate::stage1::{ConvValue, Provider, Stage1};

/// How a transition's temporary value was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// First action to claim the value.
    New,
    /// An earlier action claimed the value with the same footprint.
    Merged,
}

/// Records one accepted transition in `model`.
///
/// Adds the `from -> temporary` and `temporary -> final` edges, stamps the
/// temporary value with the action's footprint and registers the value as
/// provider of the resource it makes available.
pub fn apply(model: &mut Stage1, transition: &ExtractedTransition) -> Result<Claim> {
    let reject = |violation| ConversionError::action_shape(transition.action.clone(), violation);

    let timeline = model.timeline_mut(&transition.timeline).ok_or_else(|| {
        reject(ShapeViolation::NotATimeline {
            fluent: transition.timeline.clone(),
        })
    })?;
    timeline.add_transition(&transition.from, &transition.temporary);
    timeline.add_transition(&transition.temporary, &transition.final_value);

    let value = timeline.value_mut(&transition.temporary).ok_or_else(|| {
        reject(ShapeViolation::UnknownValue {
            timeline: transition.timeline.clone(),
            value: transition.temporary.clone(),
            part: TransitionPart::Temporary,
        })
    })?;

    if let Some(claimed_by) = &value.action {
        if !same_footprint(value, transition) {
            return Err(reject(ShapeViolation::ConflictingValueClaim {
                timeline: transition.timeline.clone(),
                value: transition.temporary.clone(),
                claimed_by: claimed_by.clone(),
            }));
        }
        // Every providing action counts as its own provider.
        if let Some(provided) = &transition.provides {
            let provider_count = model
                .resource(&provided.resource)
                .map_or(0, |r| r.providers.len());
            return Err(ConversionError::ResourceProviderConflict {
                resource: provided.resource.clone(),
                provider_count: provider_count + 1,
            });
        }
        return Ok(Claim::Merged);
    }

    value.fixed_duration = Some(transition.duration);
    value.action = Some(transition.action.clone());
    value.consumes = transition.consumes.iter().cloned().collect();
    value.provides = transition.provides.clone();

    if let Some(provided) = &transition.provides {
        let resource = model.resource_mut(&provided.resource).ok_or_else(|| {
            reject(ShapeViolation::NotAResource {
                fluent: provided.resource.clone(),
            })
        })?;
        if !resource.providers.is_empty() {
            return Err(ConversionError::ResourceProviderConflict {
                resource: resource.name.clone(),
                provider_count: resource.providers.len() + 1,
            });
        }
        resource.providers.push(Provider {
            timeline: ObjectRef::named(transition.timeline.clone()),
            value: transition.temporary.clone(),
            amount: provided.amount,
        });
    }
    Ok(Claim::New)
}

fn same_footprint(value: &ConvValue, transition: &ExtractedTransition) -> bool {
    value.fixed_duration == Some(transition.duration)
        && value.provides == transition.provides
        && value.consumes.iter().eq(transition.consumes.iter())
}
