//! Intermediate per-timeline and per-resource model.

use std::collections::HashMap;

use timelineforge_core::planning::PlanningProblem;
use timelineforge_core::timeline::ObjectRef;
use timelineforge_core::{ConversionError, Result};

use crate::ground::{ground_fluent, Domains, GroundFluent};

/// Amount of a resource provided or consumed by a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceDelta {
    pub resource: String,
    pub amount: u32,
}

impl ResourceDelta {
    pub fn new(resource: impl Into<String>, amount: u32) -> Self {
        Self {
            resource: resource.into(),
            amount,
        }
    }
}

/// One domain value of a timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvValue {
    pub name: String,
    /// Resources held while the timeline is at this value.
    pub consumes: Vec<ResourceDelta>,
    /// Resource made available while the timeline is at this value.
    pub provides: Option<ResourceDelta>,
    /// `None` means the value is unbounded.
    pub fixed_duration: Option<u32>,
    /// Action that claimed this value as its temporary value.
    pub action: Option<String>,
}

impl ConvValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            consumes: Vec::new(),
            provides: None,
            fixed_duration: None,
            action: None,
        }
    }
}

/// A grounded finite-domain fluent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvTimeline {
    pub name: String,
    /// Lifted fluent the timeline was grounded from.
    pub class: String,
    pub initial_value: Option<String>,
    pub goal: Option<String>,
    /// Valid `(from, to)` edges in insertion order, without duplicates.
    pub transitions: Vec<(String, String)>,
    pub values: Vec<ConvValue>,
}

impl ConvTimeline {
    pub fn new(name: impl Into<String>, class: impl Into<String>, values: &[String]) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            initial_value: None,
            goal: None,
            transitions: Vec::new(),
            values: values.iter().map(ConvValue::new).collect(),
        }
    }

    pub fn value(&self, name: &str) -> Option<&ConvValue> {
        self.values.iter().find(|v| v.name == name)
    }

    pub fn value_mut(&mut self, name: &str) -> Option<&mut ConvValue> {
        self.values.iter_mut().find(|v| v.name == name)
    }

    pub fn has_value(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// Adds an edge unless it is already present.
    pub fn add_transition(&mut self, from: &str, to: &str) {
        if !self.transitions.iter().any(|(a, b)| a == from && b == to) {
            self.transitions.push((from.to_string(), to.to_string()));
        }
    }

    /// Values with an edge into `value`, in edge order.
    pub fn predecessors<'a>(&'a self, value: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.transitions
            .iter()
            .filter(move |(_, to)| to == value)
            .map(|(from, _)| from.as_str())
    }

    /// Values with an edge out of `value`, in edge order.
    pub fn successors<'a>(&'a self, value: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.transitions
            .iter()
            .filter(move |(from, _)| from == value)
            .map(|(_, to)| to.as_str())
    }
}

/// A timeline value that makes a resource available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub timeline: ObjectRef,
    pub value: String,
    pub amount: u32,
}

/// A grounded integer fluent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvResource {
    pub name: String,
    /// Always `Some(0)` once set.
    pub initial_value: Option<i64>,
    pub providers: Vec<Provider>,
}

impl ConvResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_value: None,
            providers: Vec::new(),
        }
    }
}

/// Classification of a ground fluent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FluentKind {
    Timeline,
    Resource,
}

/// Timelines and resources of one conversion, in grounding order.
#[derive(Debug, Clone, Default)]
pub struct Stage1 {
    timelines: Vec<ConvTimeline>,
    resources: Vec<ConvResource>,
    timeline_indices: HashMap<String, usize>,
    resource_indices: HashMap<String, usize>,
}

impl Stage1 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grounds every fluent of the problem and registers it.
    pub fn ground(problem: &PlanningProblem, domains: &Domains) -> Result<Self> {
        let mut model = Stage1::new();
        for fluent in &problem.fluents {
            for ground in ground_fluent(fluent, domains)? {
                model.register(ground, domains)?;
            }
        }
        Ok(model)
    }

    /// Registers a ground fluent as a resource (integer) or a timeline.
    pub fn register(&mut self, fluent: GroundFluent, domains: &Domains) -> Result<FluentKind> {
        if fluent.is_resource() {
            self.add_resource(ConvResource::new(fluent.name));
            return Ok(FluentKind::Resource);
        }
        let values = domains.of_value_type(&fluent.value_type).ok_or_else(|| {
            ConversionError::UnsupportedFluentType {
                fluent: fluent.name.clone(),
                type_name: fluent.value_type.type_name().to_string(),
            }
        })?;
        self.add_timeline(ConvTimeline::new(fluent.name, fluent.class, values));
        Ok(FluentKind::Timeline)
    }

    pub fn add_timeline(&mut self, timeline: ConvTimeline) {
        let idx = self.timelines.len();
        self.timeline_indices.insert(timeline.name.clone(), idx);
        self.timelines.push(timeline);
    }

    pub fn add_resource(&mut self, resource: ConvResource) {
        let idx = self.resources.len();
        self.resource_indices.insert(resource.name.clone(), idx);
        self.resources.push(resource);
    }

    pub fn timelines(&self) -> &[ConvTimeline] {
        &self.timelines
    }

    pub fn resources(&self) -> &[ConvResource] {
        &self.resources
    }

    pub fn timeline(&self, name: &str) -> Option<&ConvTimeline> {
        self.timeline_indices.get(name).map(|&i| &self.timelines[i])
    }

    pub fn timeline_mut(&mut self, name: &str) -> Option<&mut ConvTimeline> {
        self.timeline_indices
            .get(name)
            .map(|&i| &mut self.timelines[i])
    }

    pub fn resource(&self, name: &str) -> Option<&ConvResource> {
        self.resource_indices.get(name).map(|&i| &self.resources[i])
    }

    pub fn resource_mut(&mut self, name: &str) -> Option<&mut ConvResource> {
        self.resource_indices
            .get(name)
            .map(|&i| &mut self.resources[i])
    }

    pub fn kind_of(&self, name: &str) -> Option<FluentKind> {
        if self.timeline_indices.contains_key(name) {
            Some(FluentKind::Timeline)
        } else if self.resource_indices.contains_key(name) {
            Some(FluentKind::Resource)
        } else {
            None
        }
    }

    /// `(timeline name, class)` pairs for resolving `ObjectRef`s.
    pub fn timeline_classes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.timelines
            .iter()
            .map(|t| (t.name.as_str(), t.class.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timelineforge_core::planning::{FluentDecl, ValueType};

    fn problem() -> PlanningProblem {
        PlanningProblem::new("kitchen")
            .with_type("Heater")
            .with_type("State")
            .with_object("h1", "Heater")
            .with_object("h2", "Heater")
            .with_object("Cold", "State")
            .with_object("Hot", "State")
            .with_fluent(
                FluentDecl::new("heater", ValueType::user("State")).with_parameter("h", "Heater"),
            )
            .with_fluent(FluentDecl::new("power", ValueType::Int))
            .with_fluent(FluentDecl::new("lit", ValueType::Bool))
    }

    #[test]
    fn test_classification() {
        let p = problem();
        let model = Stage1::ground(&p, &Domains::from_problem(&p)).unwrap();

        assert_eq!(model.timelines().len(), 3);
        assert_eq!(model.resources().len(), 1);
        assert_eq!(model.kind_of("heater(h1)"), Some(FluentKind::Timeline));
        assert_eq!(model.kind_of("lit"), Some(FluentKind::Timeline));
        assert_eq!(model.kind_of("power"), Some(FluentKind::Resource));
        assert_eq!(model.kind_of("heater"), None);
    }

    #[test]
    fn test_timeline_values_follow_domain() {
        let p = problem();
        let model = Stage1::ground(&p, &Domains::from_problem(&p)).unwrap();

        let heater = model.timeline("heater(h2)").unwrap();
        assert_eq!(heater.class, "heater");
        let values: Vec<_> = heater.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(values, vec!["Cold", "Hot"]);
        assert!(heater.values.iter().all(|v| v.fixed_duration.is_none()
            && v.consumes.is_empty()
            && v.action.is_none()));

        let lit = model.timeline("lit").unwrap();
        assert!(lit.has_value("true"));
        assert!(lit.has_value("false"));
    }

    #[test]
    fn test_real_fluent_rejected() {
        let p = PlanningProblem::new("real")
            .with_fluent(FluentDecl::new("temperature", ValueType::Real));

        let err = Stage1::ground(&p, &Domains::from_problem(&p)).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedFluentType { .. }));
    }

    #[test]
    fn test_transitions_deduplicated() {
        let mut timeline = ConvTimeline::new("lamp", "lamp", &["Off".into(), "On".into()]);
        timeline.add_transition("Off", "On");
        timeline.add_transition("On", "Off");
        timeline.add_transition("Off", "On");

        assert_eq!(timeline.transitions.len(), 2);
        assert_eq!(timeline.predecessors("On").collect::<Vec<_>>(), vec!["Off"]);
        assert_eq!(timeline.successors("On").collect::<Vec<_>>(), vec!["Off"]);
    }
}
