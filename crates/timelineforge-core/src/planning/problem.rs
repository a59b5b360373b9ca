//! The planning problem container.

use super::action::Action;
use super::expr::{Expr, FluentApp};
use super::types::{FluentDecl, ObjectDecl, UserType, ValueType};

/// A temporal planning problem in the source formalism.
///
/// # Examples
///
/// ```
/// use timelineforge_core::planning::{Expr, FluentDecl, PlanningProblem, ValueType};
///
/// let problem = PlanningProblem::new("lamp")
///     .with_type("Mode")
///     .with_object("Off", "Mode")
///     .with_object("On", "Mode")
///     .with_fluent(FluentDecl::new("mode", ValueType::user("Mode")))
///     .with_initial_value(Expr::fluent("mode", Vec::<String>::new()), Expr::object("Off"));
///
/// assert_eq!(problem.objects_of("Mode"), vec!["Off", "On"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanningProblem {
    pub name: String,
    pub user_types: Vec<UserType>,
    pub objects: Vec<ObjectDecl>,
    pub fluents: Vec<FluentDecl>,
    /// Default value per lifted fluent, applied to every ground instance.
    pub fluent_defaults: Vec<(String, Expr)>,
    /// Default value per value type; not supported by the conversion.
    pub initial_defaults: Vec<(ValueType, Expr)>,
    pub initial_values: Vec<(FluentApp, Expr)>,
    pub goals: Vec<Expr>,
    pub actions: Vec<Action>,
}

impl PlanningProblem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_user_type(mut self, user_type: UserType) -> Self {
        self.user_types.push(user_type);
        self
    }

    pub fn with_type(self, name: impl Into<String>) -> Self {
        self.with_user_type(UserType::new(name))
    }

    pub fn with_object(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.objects.push(ObjectDecl::new(name, type_name));
        self
    }

    pub fn with_fluent(mut self, fluent: FluentDecl) -> Self {
        self.fluents.push(fluent);
        self
    }

    pub fn with_fluent_default(mut self, fluent: impl Into<String>, value: Expr) -> Self {
        self.fluent_defaults.push((fluent.into(), value));
        self
    }

    pub fn with_initial_default(mut self, value_type: ValueType, value: Expr) -> Self {
        self.initial_defaults.push((value_type, value));
        self
    }

    /// Sets the initial value of a ground fluent.
    ///
    /// Non-fluent left-hand sides are ignored.
    pub fn with_initial_value(mut self, fluent: Expr, value: Expr) -> Self {
        if let Expr::Fluent(app) = fluent {
            self.initial_values.push((app, value));
        }
        self
    }

    pub fn with_goal(mut self, goal: Expr) -> Self {
        self.goals.push(goal);
        self
    }

    pub fn with_action(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn fluent(&self, name: &str) -> Option<&FluentDecl> {
        self.fluents.iter().find(|f| f.name == name)
    }

    pub fn user_type(&self, name: &str) -> Option<&UserType> {
        self.user_types.iter().find(|t| t.name == name)
    }

    /// True if `type_name` is `ancestor` or one of its descendants.
    pub fn is_subtype_of(&self, type_name: &str, ancestor: &str) -> bool {
        let mut current = Some(type_name);
        let mut steps = 0;
        while let Some(name) = current {
            if name == ancestor {
                return true;
            }
            // Bound the walk in case of a cyclic declaration.
            steps += 1;
            if steps > self.user_types.len() {
                return false;
            }
            current = self.user_type(name).and_then(|t| t.parent.as_deref());
        }
        false
    }

    /// Names of all objects of the given type, including subtypes, in
    /// declaration order.
    pub fn objects_of(&self, type_name: &str) -> Vec<&str> {
        self.objects
            .iter()
            .filter(|o| self.is_subtype_of(&o.type_name, type_name))
            .map(|o| o.name.as_str())
            .collect()
    }
}
