//! Token types and static tokens.

use super::condition::Condition;

/// Lower and optional upper bound on a token's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationBounds {
    pub min: u32,
    /// `None` means unbounded.
    pub max: Option<u32>,
}

impl DurationBounds {
    pub const fn fixed(duration: u32) -> Self {
        DurationBounds {
            min: duration,
            max: Some(duration),
        }
    }

    pub const fn at_least(min: u32) -> Self {
        DurationBounds { min, max: None }
    }

    pub fn is_fixed(&self) -> bool {
        self.max == Some(self.min)
    }
}

/// Template for the tokens a timeline may instantiate for one value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenType {
    pub value: String,
    pub conditions: Vec<Condition>,
    pub duration: DurationBounds,
    pub capacity: u32,
}

impl TokenType {
    pub fn new(value: impl Into<String>, duration: DurationBounds) -> Self {
        Self {
            value: value.into(),
            conditions: Vec::new(),
            duration,
            capacity: 0,
        }
    }
}

/// Time placement of a static token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenTime {
    /// A fact holding from `start` (and until `end`, when set).
    Fact { start: Option<u32>, end: Option<u32> },
    /// A goal whose time is left to the solver.
    Goal,
}

impl TokenTime {
    pub const fn fact_at(start: u32) -> Self {
        TokenTime::Fact {
            start: Some(start),
            end: None,
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, TokenTime::Goal)
    }
}

/// A token with fixed or goal-marked time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticToken {
    pub value: String,
    pub time: TokenTime,
    pub capacity: u32,
    pub conditions: Vec<Condition>,
}

impl StaticToken {
    pub fn fact(value: impl Into<String>, start: u32) -> Self {
        Self {
            value: value.into(),
            time: TokenTime::fact_at(start),
            capacity: 0,
            conditions: Vec::new(),
        }
    }

    pub fn goal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            time: TokenTime::Goal,
            capacity: 0,
            conditions: Vec::new(),
        }
    }
}
