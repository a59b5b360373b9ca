//! Grounding of fluents and actions over finite object domains.

use std::collections::HashMap;

use timelineforge_core::planning::{
    ground_name, Action, FluentDecl, Parameter, PlanningProblem, ValueType,
};
use timelineforge_core::{ConversionError, Result};

/// Name of the built-in boolean domain.
pub const BOOL_TYPE: &str = "bool";

/// Ordered object names for every finite type.
///
/// `bool` is always registered as `[true, false]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    by_type: HashMap<String, Vec<String>>,
}

impl Domains {
    /// Builds the table from the problem's user types and objects.
    pub fn from_problem(problem: &PlanningProblem) -> Self {
        let mut by_type: HashMap<String, Vec<String>> = problem
            .user_types
            .iter()
            .map(|t| {
                let objects = problem
                    .objects_of(&t.name)
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
                (t.name.clone(), objects)
            })
            .collect();
        by_type.insert(
            BOOL_TYPE.to_string(),
            vec!["true".to_string(), "false".to_string()],
        );
        Self { by_type }
    }

    pub fn get(&self, type_name: &str) -> Option<&[String]> {
        self.by_type.get(type_name).map(Vec::as_slice)
    }

    /// The finite domain of a value type; `None` for numeric types.
    pub fn of_value_type(&self, value_type: &ValueType) -> Option<&[String]> {
        match value_type {
            ValueType::Bool | ValueType::User(_) => self.get(value_type.type_name()),
            ValueType::Int | ValueType::Real => None,
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.by_type.contains_key(type_name)
    }
}

/// A concrete instance of a lifted fluent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundFluent {
    /// Unique key, `name(a1, a2, ...)`.
    pub name: String,
    /// Name of the lifted fluent this instance came from.
    pub class: String,
    pub args: Vec<String>,
    pub value_type: ValueType,
}

impl GroundFluent {
    pub fn is_resource(&self) -> bool {
        self.value_type.is_int()
    }
}

/// Expands a fluent declaration into its ground instances.
///
/// A fluent with `k` parameters of domain sizes `d1..dk` yields
/// `d1 * ... * dk` instances, in domain order.
pub fn ground_fluent(fluent: &FluentDecl, domains: &Domains) -> Result<Vec<GroundFluent>> {
    let combinations = parameter_combinations(&fluent.name, &fluent.parameters, domains)?;
    Ok(combinations
        .into_iter()
        .map(|args| GroundFluent {
            name: ground_name(&fluent.name, &args),
            class: fluent.name.clone(),
            args,
            value_type: fluent.value_type.clone(),
        })
        .collect())
}

/// Grounds every parameterized durative action of the problem.
///
/// Instantaneous actions are passed through unchanged.
pub fn ground_actions(problem: &PlanningProblem, domains: &Domains) -> Result<Vec<Action>> {
    let mut ground = Vec::with_capacity(problem.actions.len());
    for action in &problem.actions {
        let durative = match action {
            Action::Durative(a) if !a.parameters.is_empty() => a,
            _ => {
                ground.push(action.clone());
                continue;
            }
        };

        let combinations = parameter_combinations(&durative.name, &durative.parameters, domains)?;
        for args in combinations {
            let bindings: HashMap<&str, &str> = durative
                .parameters
                .iter()
                .zip(&args)
                .map(|(p, a)| (p.name.as_str(), a.as_str()))
                .collect();
            let name = ground_name(&durative.name, &args);
            ground.push(Action::Durative(durative.ground(name, &bindings)));
        }
    }
    Ok(ground)
}

fn parameter_combinations(
    owner: &str,
    parameters: &[Parameter],
    domains: &Domains,
) -> Result<Vec<Vec<String>>> {
    let mut axes = Vec::with_capacity(parameters.len());
    for param in parameters {
        let domain =
            domains
                .get(&param.type_name)
                .ok_or_else(|| ConversionError::UnsupportedParameterType {
                    owner: owner.to_string(),
                    type_name: param.type_name.clone(),
                })?;
        axes.push(domain);
    }
    Ok(cartesian_product(&axes))
}

/// All combinations picking one element per axis, first axis varying slowest.
///
/// Zero axes yield a single empty combination.
pub(crate) fn cartesian_product(axes: &[&[String]]) -> Vec<Vec<String>> {
    let mut combinations: Vec<Vec<String>> = vec![Vec::with_capacity(axes.len())];
    for axis in axes {
        let mut next = Vec::with_capacity(combinations.len() * axis.len());
        for prefix in &combinations {
            for item in axis.iter() {
                let mut combination = prefix.clone();
                combination.push(item.clone());
                next.push(combination);
            }
        }
        combinations = next;
    }
    combinations
}
