//! References to timelines by name or by class.

use std::fmt;

/// Reference to a timeline: one named instance, or any instance of a class.
///
/// Must be resolved to concrete timeline names before token synthesis.
///
/// # Examples
///
/// ```
/// use timelineforge_core::timeline::ObjectRef;
///
/// let timelines = [("heater(h1)", "heater"), ("heater(h2)", "heater"), ("lamp", "lamp")];
///
/// let any = ObjectRef::any_of_class("heater");
/// assert_eq!(any.resolve(timelines), vec!["heater(h1)", "heater(h2)"]);
///
/// let named = ObjectRef::named("lamp");
/// assert_eq!(named.resolve(timelines), vec!["lamp"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectRef {
    Named(String),
    AnyOfClass(String),
}

impl ObjectRef {
    pub fn named(name: impl Into<String>) -> Self {
        ObjectRef::Named(name.into())
    }

    pub fn any_of_class(class: impl Into<String>) -> Self {
        ObjectRef::AnyOfClass(class.into())
    }

    /// Resolves against `(timeline name, class)` pairs, keeping their order.
    ///
    /// An unknown name or class resolves to nothing.
    pub fn resolve<'a, I>(&self, timelines: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        timelines
            .into_iter()
            .filter(|(name, class)| self.matches(name, class))
            .map(|(name, _)| name)
            .collect()
    }

    /// True if the timeline `name` of class `class` is referenced.
    pub fn matches(&self, name: &str, class: &str) -> bool {
        match self {
            ObjectRef::Named(id) => id == name,
            ObjectRef::AnyOfClass(c) => c == class,
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectRef::Named(id) => write!(f, "{}", id),
            ObjectRef::AnyOfClass(class) => write!(f, "any {}", class),
        }
    }
}
