//! Error types for TimelineForge

use std::fmt;

use thiserror::Error;

/// Main error type for conversion operations.
///
/// Every variant aborts the whole conversion; there is no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A fluent or action parameter has a type with no registered finite domain.
    #[error("Unsupported parameter type `{type_name}` in `{owner}`")]
    UnsupportedParameterType { owner: String, type_name: String },

    /// A fluent value type is neither integer nor a finite domain.
    #[error("Unsupported value type `{type_name}` for fluent `{fluent}`")]
    UnsupportedFluentType { fluent: String, type_name: String },

    /// An initial value the conversion cannot express.
    #[error("Unsupported initial value for `{fluent}`: {reason}")]
    UnsupportedInitialDefault { fluent: String, reason: String },

    /// A goal that is not `timeline = value`.
    #[error("Unsupported goal shape: {0}")]
    UnsupportedGoalShape(String),

    /// A durative action outside the single supported shape.
    #[error("Unsupported shape in action `{action}`: {violation}")]
    UnsupportedActionShape {
        action: String,
        violation: ShapeViolation,
    },

    /// A resource without exactly one provider value.
    #[error("Resource `{resource}` has {provider_count} providers, expected exactly one")]
    ResourceProviderConflict {
        resource: String,
        provider_count: usize,
    },
}

impl ConversionError {
    /// Wraps a shape violation with the name of the offending action.
    pub fn action_shape(action: impl Into<String>, violation: ShapeViolation) -> Self {
        ConversionError::UnsupportedActionShape {
            action: action.into(),
            violation,
        }
    }

    /// Returns the shape violation, if this is an action shape error.
    pub fn shape_violation(&self) -> Option<&ShapeViolation> {
        match self {
            ConversionError::UnsupportedActionShape { violation, .. } => Some(violation),
            _ => None,
        }
    }
}

/// The point of a durative action an effect or condition is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPoint {
    Start,
    End,
}

impl fmt::Display for ActionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionPoint::Start => write!(f, "start"),
            ActionPoint::End => write!(f, "end"),
        }
    }
}

/// Which part of the `from -> temporary -> final` transition is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionPart {
    From,
    Temporary,
    Final,
}

impl fmt::Display for TransitionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionPart::From => write!(f, "transition source"),
            TransitionPart::Temporary => write!(f, "temporary value"),
            TransitionPart::Final => write!(f, "final value"),
        }
    }
}

/// A single reason a durative action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    #[error("action is not durative")]
    NotDurative,

    #[error("simulated effects are not supported")]
    SimulatedEffects,

    #[error("duration bounds must be integer constants")]
    NonConstantDuration,

    #[error("duration lower bound {lower} differs from upper bound {upper}")]
    AsymmetricDuration { lower: i64, upper: i64 },

    #[error("duration {0} is not a valid token duration")]
    InvalidDuration(i64),

    #[error("condition is not attached to the action start")]
    UnsupportedConditionTiming,

    #[error("condition is not an equality between a state variable and a value")]
    NonEqualityCondition,

    #[error("`{fluent}` is not a timeline state variable")]
    NotATimeline { fluent: String },

    #[error("references state variables `{first}` and `{second}`")]
    MultipleStateVariables { first: String, second: String },

    #[error("start conditions require both `{first}` and `{second}`")]
    ConflictingTransitionFrom { first: String, second: String },

    #[error("effect on `{fluent}` has a guard condition")]
    ConditionalEffect { fluent: String },

    #[error("effect on `{fluent}` is not at the action start or end")]
    UnsupportedEffectTiming { fluent: String },

    #[error("`{fluent}` is not an integer resource")]
    NotAResource { fluent: String },

    #[error("amount for `{resource}` must be a non-negative integer constant")]
    InvalidResourceAmount { resource: String },

    #[error("more than one resource {direction} at the action {point}")]
    MultipleResources {
        direction: &'static str,
        point: ActionPoint,
    },

    #[error("assignment target `{fluent}` is not a finite-domain state variable")]
    NonFiniteAssignTarget { fluent: String },

    #[error("assignment to `{fluent}` is not an object constant")]
    NonConstantAssignment { fluent: String },

    #[error("conflicting {point} assignments `{first}` and `{second}`")]
    ConflictingTransitionTarget {
        point: ActionPoint,
        first: String,
        second: String,
    },

    #[error("end condition on `{fluent}` is not allowed")]
    EndCondition { fluent: String },

    #[error("missing {0}")]
    MissingTransition(TransitionPart),

    #[error("{part} `{value}` is not a value of timeline `{timeline}`")]
    UnknownValue {
        timeline: String,
        value: String,
        part: TransitionPart,
    },

    #[error("resource use differs between action start and end")]
    ResourceAsymmetry,

    #[error("value `{value}` of `{timeline}` is already claimed by `{claimed_by}` with a different footprint")]
    ConflictingValueClaim {
        timeline: String,
        value: String,
        claimed_by: String,
    },
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;
