//! Temporal conditions attached to token types.

use std::fmt;

/// Temporal relation between a token and the token a condition refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemporalRelation {
    /// The token is immediately preceded by the referenced value.
    MetBy,
    /// The token is immediately followed by the referenced value.
    Meets,
    /// The referenced value contains the token and supplies `amount` units.
    Cover,
}

impl fmt::Display for TemporalRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalRelation::MetBy => write!(f, "met-by"),
            TemporalRelation::Meets => write!(f, "meets"),
            TemporalRelation::Cover => write!(f, "cover"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporalCondition {
    pub timeline: String,
    pub value: String,
    pub relation: TemporalRelation,
    pub amount: u32,
}

impl TemporalCondition {
    pub fn new(
        timeline: impl Into<String>,
        value: impl Into<String>,
        relation: TemporalRelation,
        amount: u32,
    ) -> Self {
        Self {
            timeline: timeline.into(),
            value: value.into(),
            relation,
            amount,
        }
    }

    pub fn met_by(timeline: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(timeline, value, TemporalRelation::MetBy, 0)
    }

    pub fn meets(timeline: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(timeline, value, TemporalRelation::Meets, 0)
    }

    pub fn cover(timeline: impl Into<String>, value: impl Into<String>, amount: u32) -> Self {
        Self::new(timeline, value, TemporalRelation::Cover, amount)
    }
}

impl fmt::Display for TemporalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}={}", self.relation, self.timeline, self.value)?;
        if self.relation == TemporalRelation::Cover {
            write!(f, " x{}", self.amount)?;
        }
        Ok(())
    }
}

/// A single temporal condition or a disjunction of them.
///
/// A token type's condition list is a conjunction of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Temporal(TemporalCondition),
    Or(Vec<TemporalCondition>),
}

impl Condition {
    /// The alternatives of this condition; one for a plain temporal condition.
    pub fn alternatives(&self) -> &[TemporalCondition] {
        match self {
            Condition::Temporal(cond) => std::slice::from_ref(cond),
            Condition::Or(alts) => alts,
        }
    }

    /// The relation shared by all alternatives, if there is exactly one.
    pub fn relation(&self) -> Option<TemporalRelation> {
        let mut alts = self.alternatives().iter();
        let first = alts.next()?.relation;
        alts.all(|c| c.relation == first).then_some(first)
    }
}
