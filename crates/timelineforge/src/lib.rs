//! TimelineForge - temporal planning problems as timelines
//!
//! Build a [`PlanningProblem`](planning::PlanningProblem) and call
//! [`convert`] to get the timelines, token types and static tokens a
//! timeline solver consumes.
//!
//! # Example
//!
//! ```rust
//! use timelineforge::prelude::*;
//!
//! let switch = DurativeAction::new("activate", DurationInterval::fixed(5))
//!     .at_start(Expr::eq(Expr::fluent("mode", Vec::<String>::new()), Expr::object("Idle")))
//!     .with_effect(Effect::assign(Timing::start(), FluentApp::new("mode", vec![]), Expr::object("Active")))
//!     .with_effect(Effect::assign(Timing::end(), FluentApp::new("mode", vec![]), Expr::object("Idle")));
//!
//! let problem = PlanningProblem::new("switch")
//!     .with_type("Mode")
//!     .with_object("Idle", "Mode")
//!     .with_object("Active", "Mode")
//!     .with_fluent(FluentDecl::new("mode", ValueType::user("Mode")))
//!     .with_action(switch);
//!
//! let timelines = convert(&problem).unwrap();
//! let active = timelines.timeline("mode").unwrap().token_type("Active").unwrap();
//! assert_eq!(active.duration, DurationBounds::fixed(5));
//! ```

pub use timelineforge_config::{
    ConfigError, ConversionConfig, EndConditionPolicy, SynthesisThreadCount,
};
pub use timelineforge_convert::Converter;
pub use timelineforge_core::{planning, timeline};
pub use timelineforge_core::{ConversionError, Result, ShapeViolation};

#[cfg(feature = "console")]
pub use timelineforge_console as console;

mod run;
pub use run::{convert, convert_with_config, CONFIG_FILE};

#[cfg(feature = "serde")]
pub use run::to_json;


pub mod prelude {
    pub use super::planning::{
        Action, DurationInterval, DurativeAction, Effect, Expr, FluentApp, FluentDecl,
        PlanningProblem, TimeInterval, Timing, UserType, ValueType,
    };
    pub use super::timeline::{
        Condition, DurationBounds, StaticToken, TemporalCondition, TemporalRelation, Timeline,
        TimelineProblem, TokenType,
    };
    pub use super::{convert, convert_with_config, ConversionConfig, ConversionError};
}
