//! Type, object and fluent declarations.

use std::fmt;

/// Value type of a fluent or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueType {
    Bool,
    Int,
    Real,
    /// A user-declared object type.
    User(String),
}

impl ValueType {
    pub fn user(name: impl Into<String>) -> Self {
        ValueType::User(name.into())
    }

    /// Name used to look the type up in the domain table.
    pub fn type_name(&self) -> &str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "integer",
            ValueType::Real => "real",
            ValueType::User(name) => name,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, ValueType::Int)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A user type, optionally extending a previously declared parent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserType {
    pub name: String,
    pub parent: Option<String>,
}

impl UserType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectDecl {
    pub name: String,
    pub type_name: String,
}

impl ObjectDecl {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Typed, named parameter of a fluent or action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A lifted state variable declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FluentDecl {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub value_type: ValueType,
}

impl FluentDecl {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            value_type,
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}
