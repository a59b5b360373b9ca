//! Target timeline model handed to the timeline solver.

mod condition;
mod object_ref;
mod token;

pub use condition::{Condition, TemporalCondition, TemporalRelation};
pub use object_ref::ObjectRef;
pub use token::{DurationBounds, StaticToken, TokenTime, TokenType};

/// A state variable as a sequence of non-overlapping value tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    pub name: String,
    pub token_types: Vec<TokenType>,
    pub static_tokens: Vec<StaticToken>,
}

impl Timeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token_types: Vec::new(),
            static_tokens: Vec::new(),
        }
    }

    pub fn token_type(&self, value: &str) -> Option<&TokenType> {
        self.token_types.iter().find(|t| t.value == value)
    }
}

/// The converted problem: a list of independent timelines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineProblem {
    pub timelines: Vec<Timeline>,
}

impl TimelineProblem {
    pub fn new(timelines: Vec<Timeline>) -> Self {
        Self { timelines }
    }

    pub fn timeline(&self, name: &str) -> Option<&Timeline> {
        self.timelines.iter().find(|t| t.name == name)
    }

    pub fn token_type_count(&self) -> usize {
        self.timelines.iter().map(|t| t.token_types.len()).sum()
    }

    pub fn static_token_count(&self) -> usize {
        self.timelines.iter().map(|t| t.static_tokens.len()).sum()
    }
}
