//! Token-type synthesis.

use rayon::prelude::*;
use tracing::{debug, warn};

use timelineforge_config::{ConversionConfig, SynthesisThreadCount};
use timelineforge_core::timeline::{
    Condition, DurationBounds, StaticToken, TemporalCondition, Timeline, TimelineProblem,
    TokenType,
};

use crate::providers::ProviderTable;
use crate::stage1::{ConvTimeline, ConvValue, Stage1};

/// Builds the target timelines from the assembled model.
///
/// Timelines are independent of each other and may be synthesized in
/// parallel; the output keeps grounding order either way.
pub fn synthesize(
    model: &Stage1,
    providers: &ProviderTable,
    config: &ConversionConfig,
) -> TimelineProblem {
    let min_duration = config.unbounded_min_duration;
    let build = |timeline: &ConvTimeline| synthesize_timeline(timeline, providers, min_duration);

    let timelines = match config.synthesis_threads {
        SynthesisThreadCount::None => model.timelines().iter().map(build).collect(),
        SynthesisThreadCount::Auto => model.timelines().par_iter().map(build).collect(),
        SynthesisThreadCount::Count(n) => {
            match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => pool.install(|| model.timelines().par_iter().map(build).collect()),
                Err(err) => {
                    warn!(
                        event = "synthesis_pool_failed",
                        threads = n,
                        error = %err,
                    );
                    model.timelines().iter().map(build).collect()
                }
            }
        }
    };
    TimelineProblem::new(timelines)
}

/// Synthesizes the token types and static tokens of one timeline.
pub fn synthesize_timeline(
    timeline: &ConvTimeline,
    providers: &ProviderTable,
    min_duration: u32,
) -> Timeline {
    let mut out = Timeline::new(timeline.name.clone());

    if let Some(initial) = &timeline.initial_value {
        out.static_tokens.push(StaticToken::fact(initial.clone(), 0));
    }
    if let Some(goal) = &timeline.goal {
        out.static_tokens.push(StaticToken::goal(goal.clone()));
    }

    out.token_types = timeline
        .values
        .iter()
        .map(|value| token_type(timeline, value, providers, min_duration))
        .collect();

    debug!(
        event = "timeline_synthesized",
        timeline = %timeline.name,
        token_types = out.token_types.len(),
        static_tokens = out.static_tokens.len(),
    );
    out
}

fn token_type(
    timeline: &ConvTimeline,
    value: &ConvValue,
    providers: &ProviderTable,
    min_duration: u32,
) -> TokenType {
    let duration = match value.fixed_duration {
        Some(d) => DurationBounds::fixed(d),
        None => DurationBounds::at_least(min_duration),
    };
    let mut token = TokenType::new(value.name.clone(), duration);
    token.capacity = providers.capacity_of(&timeline.name, &value.name);

    let covers: Vec<_> = value
        .consumes
        .iter()
        .flat_map(|delta| {
            providers
                .providers_of(&delta.resource)
                .iter()
                .map(move |p| TemporalCondition::cover(&p.timeline, &p.value, delta.amount))
        })
        .collect();
    if !covers.is_empty() {
        token.conditions.push(Condition::Or(covers));
    }

    let met_by: Vec<_> = timeline
        .predecessors(&value.name)
        .map(|from| TemporalCondition::met_by(&timeline.name, from))
        .collect();
    if !met_by.is_empty() {
        token.conditions.push(Condition::Or(met_by));
    }

    // An unbounded value can be the last token on its timeline.
    if token.duration.is_fixed() {
        let meets: Vec<_> = timeline
            .successors(&value.name)
            .map(|to| TemporalCondition::meets(&timeline.name, to))
            .collect();
        if !meets.is_empty() {
            token.conditions.push(Condition::Or(meets));
        }
    }
    token
}
