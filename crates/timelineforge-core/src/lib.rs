//! TimelineForge Core - model types for timeline conversion
//!
//! This crate provides the types shared by the TimelineForge crates:
//! - Planning types describing the source temporal-planning problem
//! - Timeline types describing the token-based target problem
//! - The conversion error taxonomy

pub mod error;
pub mod planning;
pub mod timeline;

pub use error::{ActionPoint, ConversionError, Result, ShapeViolation, TransitionPart};
pub use planning::{DurativeAction, Expr, FluentApp, FluentDecl, PlanningProblem, ValueType};
pub use timeline::{
    Condition, DurationBounds, ObjectRef, StaticToken, TemporalCondition, TemporalRelation,
    Timeline, TimelineProblem, TokenTime, TokenType,
};
