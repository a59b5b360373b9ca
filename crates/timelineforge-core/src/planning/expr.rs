//! Expression trees for conditions, effect values and goals.

use std::collections::HashMap;
use std::fmt;

/// Application of a fluent to arguments, e.g. `at(rover1, base)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FluentApp {
    pub name: String,
    pub args: Vec<Expr>,
}

impl FluentApp {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Returns the ground key `name(a1, a2)`, or `name` for a nullary fluent.
    ///
    /// Returns `None` while any argument is not an object constant.
    pub fn ground_key(&self) -> Option<String> {
        let args = self
            .args
            .iter()
            .map(|a| a.as_object().map(str::to_owned))
            .collect::<Option<Vec<_>>>()?;
        Some(ground_name(&self.name, &args))
    }

    /// Ground key if available, otherwise the textual form (for diagnostics).
    pub fn display_key(&self) -> String {
        self.ground_key().unwrap_or_else(|| self.to_string())
    }

    pub fn substitute(&self, bindings: &HashMap<&str, &str>) -> FluentApp {
        FluentApp {
            name: self.name.clone(),
            args: self.args.iter().map(|a| a.substitute(bindings)).collect(),
        }
    }
}

impl fmt::Display for FluentApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            return write!(f, "{}", self.name);
        }
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// Renders the name of a ground instance: `name(a1, a2, ...)`.
pub fn ground_name(name: &str, args: &[String]) -> String {
    if args.is_empty() {
        name.to_string()
    } else {
        format!("{}({})", name, args.join(", "))
    }
}

/// An expression node in the source planning model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    Bool(bool),
    Int(i64),
    Real(f64),
    /// A named object constant.
    Object(String),
    /// Reference to an action parameter, replaced during grounding.
    Param(String),
    Fluent(FluentApp),
    Eq(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    pub fn object(name: impl Into<String>) -> Self {
        Expr::Object(name.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        Expr::Param(name.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Int(value)
    }

    /// A ground fluent whose arguments are all object constants.
    pub fn fluent<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::Fluent(FluentApp::new(
            name,
            args.into_iter().map(|a| Expr::Object(a.into())).collect(),
        ))
    }

    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Expr::Eq(Box::new(lhs), Box::new(rhs))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Expr::Bool(true))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Expr::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&str> {
        match self {
            Expr::Object(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_fluent(&self) -> Option<&FluentApp> {
        match self {
            Expr::Fluent(app) => Some(app),
            _ => None,
        }
    }

    /// The timeline value this constant denotes: an object name, or
    /// `true`/`false` for boolean constants.
    pub fn value_name(&self) -> Option<String> {
        match self {
            Expr::Object(name) => Some(name.clone()),
            Expr::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Replaces every bound parameter reference by its object.
    pub fn substitute(&self, bindings: &HashMap<&str, &str>) -> Expr {
        match self {
            Expr::Param(name) => match bindings.get(name.as_str()) {
                Some(obj) => Expr::Object((*obj).to_string()),
                None => self.clone(),
            },
            Expr::Fluent(app) => Expr::Fluent(app.substitute(bindings)),
            Expr::Eq(a, b) => Expr::eq(a.substitute(bindings), b.substitute(bindings)),
            Expr::Not(e) => Expr::not(e.substitute(bindings)),
            Expr::And(es) => Expr::And(es.iter().map(|e| e.substitute(bindings)).collect()),
            Expr::Or(es) => Expr::Or(es.iter().map(|e| e.substitute(bindings)).collect()),
            Expr::Bool(_) | Expr::Int(_) | Expr::Real(_) | Expr::Object(_) => self.clone(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Bool(b) => write!(f, "{}", b),
            Expr::Int(v) => write!(f, "{}", v),
            Expr::Real(v) => write!(f, "{}", v),
            Expr::Object(name) => write!(f, "{}", name),
            Expr::Param(name) => write!(f, "?{}", name),
            Expr::Fluent(app) => write!(f, "{}", app),
            Expr::Eq(a, b) => write!(f, "({} == {})", a, b),
            Expr::Not(e) => write!(f, "(not {})", e),
            Expr::And(es) => write_joined(f, es, " and "),
            Expr::Or(es) => write_joined(f, es, " or "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, es: &[Expr], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, e) in es.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", e)?;
    }
    write!(f, ")")
}
