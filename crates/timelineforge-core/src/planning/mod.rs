//! Source planning model.
//!
//! The subset of a classical temporal-planning formalism the conversion
//! consumes:
//! - `PlanningProblem`: types, objects, fluents, initial state, goals, actions
//! - `FluentDecl`: a (possibly parameterized) state variable
//! - `DurativeAction`: an action with a duration, timed conditions and effects
//! - `Expr`: expressions used by conditions, effects and goals

mod action;
mod expr;
mod problem;
mod types;


pub use action::{
    Action, DurationInterval, DurativeAction, Effect, EffectKind, InstantaneousAction,
    SimulatedEffect, TimeInterval, TimedCondition, Timepoint, Timing,
};
pub use expr::{ground_name, Expr, FluentApp};
pub use problem::PlanningProblem;
pub use types::{FluentDecl, ObjectDecl, Parameter, UserType, ValueType};
