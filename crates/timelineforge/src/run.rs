//! Conversion entry points that hide configuration loading.

use timelineforge_config::ConversionConfig;
use timelineforge_convert::Converter;
use timelineforge_core::planning::PlanningProblem;
use timelineforge_core::timeline::TimelineProblem;
use timelineforge_core::Result;

/// Configuration file read by [`convert`] from the working directory.
pub const CONFIG_FILE: &str = "timelineforge.toml";

/// Converts a problem using `timelineforge.toml` when present, defaults otherwise.
pub fn convert(problem: &PlanningProblem) -> Result<TimelineProblem> {
    let config = ConversionConfig::load(CONFIG_FILE).unwrap_or_default();
    convert_with_config(problem, config)
}

/// Converts a problem with an explicit configuration.
pub fn convert_with_config(
    problem: &PlanningProblem,
    config: ConversionConfig,
) -> Result<TimelineProblem> {
    #[cfg(feature = "console")]
    timelineforge_console::init();

    Converter::new(config).convert(problem)
}

/// Renders a converted problem as pretty-printed JSON.
#[cfg(feature = "serde")]
pub fn to_json(problem: &TimelineProblem) -> serde_json::Result<String> {
    serde_json::to_string_pretty(problem)
}
