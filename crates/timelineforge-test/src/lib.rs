//! Shared test fixtures for TimelineForge crates.
//!
//! Every fixture is a complete [`PlanningProblem`] built with the core
//! builders. The crate does not depend on `timelineforge-convert` so the
//! conversion crate can use it as a dev-dependency.
//!
//! - [`switch`] - one timeline, one action, no resources
//! - [`kitchen`] - a generator providing power to a kettle
//! - [`conflicts`] - problems the conversion must reject
//! - [`rovers`] - parameterized fluents and actions
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! timelineforge-test = { workspace = true }
//! ```
//!
//! ```
//! use timelineforge_test::switch;
//!
//! let problem = switch::problem();
//! assert_eq!(problem.actions.len(), 1);
//! ```
//!
//! [`PlanningProblem`]: timelineforge_core::planning::PlanningProblem

pub mod conflicts;
pub mod kitchen;
pub mod rovers;
pub mod switch;

use timelineforge_core::planning::{Expr, FluentApp};

/// A nullary fluent application.
pub fn var(name: &str) -> FluentApp {
    FluentApp::new(name, Vec::new())
}

/// `name == value` for a nullary fluent and an object constant.
pub fn is(name: &str, value: &str) -> Expr {
    Expr::eq(Expr::Fluent(var(name)), Expr::object(value))
}
