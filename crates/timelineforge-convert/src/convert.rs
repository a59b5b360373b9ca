//! The conversion pipeline.

use std::time::Instant;

use tracing::{debug, info, warn};

use timelineforge_config::ConversionConfig;
use timelineforge_core::planning::PlanningProblem;
use timelineforge_core::timeline::TimelineProblem;
use timelineforge_core::{ConversionError, Result};

use crate::assemble::{apply, Claim};
use crate::ground::{ground_actions, Domains};
use crate::providers::check_providers;
use crate::resolve::{resolve_goals, resolve_initial_values};
use crate::shape::analyze_action;
use crate::stage1::Stage1;
use crate::synthesize::synthesize;

/// Converts planning problems into timeline problems.
///
/// Holds only configuration; every call to [`Converter::convert`] works on
/// its own intermediate model.
///
/// # Examples
///
/// ```
/// use timelineforge_config::ConversionConfig;
/// use timelineforge_convert::Converter;
/// use timelineforge_core::planning::PlanningProblem;
///
/// let converter = Converter::new(ConversionConfig::default());
/// let result = converter.convert(&PlanningProblem::new("empty")).unwrap();
/// assert!(result.timelines.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Runs the whole conversion. Fails on the first unsupported construct;
    /// nothing is returned for a rejected problem.
    pub fn convert(&self, problem: &PlanningProblem) -> Result<TimelineProblem> {
        let start = Instant::now();
        info!(
            event = "convert_start",
            problem = %problem.name,
            fluent_count = problem.fluents.len(),
            action_count = problem.actions.len(),
        );

        match self.run(problem) {
            Ok(result) => {
                info!(
                    event = "convert_end",
                    problem = %problem.name,
                    timeline_count = result.timelines.len(),
                    token_type_count = result.token_type_count(),
                    static_token_count = result.static_token_count(),
                    duration_ms = start.elapsed().as_millis(),
                );
                Ok(result)
            }
            Err(err) => {
                warn!(
                    event = "convert_rejected",
                    problem = %problem.name,
                    error = %err,
                    duration_ms = start.elapsed().as_millis(),
                );
                Err(err)
            }
        }
    }

    fn run(&self, problem: &PlanningProblem) -> Result<TimelineProblem> {
        let domains = Domains::from_problem(problem);
        let mut model = Stage1::ground(problem, &domains)?;
        info!(
            event = "fluents_grounded",
            timeline_count = model.timelines().len(),
            resource_count = model.resources().len(),
        );

        resolve_initial_values(problem, &domains, &mut model)?;
        resolve_goals(problem, &mut model)?;

        for action in ground_actions(problem, &domains)? {
            let transition = analyze_action(&action, &model, self.config.end_conditions)
                .map_err(|violation| ConversionError::action_shape(action.name(), violation))?;
            let claim = apply(&mut model, &transition)?;
            debug!(
                event = "action_analyzed",
                action = %transition.action,
                timeline = %transition.timeline,
                from = %transition.from,
                temporary = %transition.temporary,
                final_value = %transition.final_value,
                duration = transition.duration,
                merged = claim == Claim::Merged,
            );
        }

        let providers = check_providers(&model)?;
        Ok(synthesize(&model, &providers, &self.config))
    }
}

/// Converts `problem` with the default configuration.
pub fn convert(problem: &PlanningProblem) -> Result<TimelineProblem> {
    Converter::default().convert(problem)
}
