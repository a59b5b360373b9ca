//! Provider consistency check and lookup table.

use std::collections::HashMap;

use timelineforge_core::{ConversionError, Result};

use crate::stage1::Stage1;

/// A provider whose timeline reference has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProvider {
    pub timeline: String,
    pub value: String,
    pub amount: u32,
}

/// Providers of every resource, with timeline references resolved.
#[derive(Debug, Clone, Default)]
pub struct ProviderTable {
    resources: Vec<String>,
    providers: Vec<Vec<ResolvedProvider>>,
    indices: HashMap<String, usize>,
}

impl ProviderTable {
    pub fn providers_of(&self, resource: &str) -> &[ResolvedProvider] {
        self.indices
            .get(resource)
            .map(|&i| self.providers[i].as_slice())
            .unwrap_or(&[])
    }

    /// Amount `value` of `timeline` provides. With several matches the last
    /// registered one wins; `0` when the value provides nothing.
    pub fn capacity_of(&self, timeline: &str, value: &str) -> u32 {
        self.providers
            .iter()
            .flatten()
            .filter(|p| p.timeline == timeline && p.value == value)
            .last()
            .map_or(0, |p| p.amount)
    }

    /// Resource names in declaration order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(String::as_str)
    }

    fn push(&mut self, resource: &str, providers: Vec<ResolvedProvider>) {
        self.indices.insert(resource.to_string(), self.resources.len());
        self.resources.push(resource.to_string());
        self.providers.push(providers);
    }
}

/// Checks that every resource has exactly one provider value and resolves
/// the providers' timeline references.
///
/// Resources are checked in declaration order; the first offending one is
/// reported.
pub fn check_providers(model: &Stage1) -> Result<ProviderTable> {
    let mut table = ProviderTable::default();
    for resource in model.resources() {
        let conflict = |provider_count| ConversionError::ResourceProviderConflict {
            resource: resource.name.clone(),
            provider_count,
        };
        if resource.providers.len() != 1 {
            return Err(conflict(resource.providers.len()));
        }

        let mut resolved = Vec::new();
        for provider in &resource.providers {
            let timelines = provider.timeline.resolve(model.timeline_classes());
            if timelines.is_empty() {
                return Err(conflict(0));
            }
            resolved.extend(timelines.into_iter().map(|timeline| ResolvedProvider {
                timeline: timeline.to_string(),
                value: provider.value.clone(),
                amount: provider.amount,
            }));
        }
        table.push(&resource.name, resolved);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage1::{ConvResource, ConvTimeline, Provider};
    use timelineforge_core::timeline::ObjectRef;

    fn model(providers: Vec<Provider>) -> Stage1 {
        let mut model = Stage1::new();
        for name in ["gen(g1)", "gen(g2)"] {
            model.add_timeline(ConvTimeline::new(
                name,
                "gen",
                &["Off".into(), "Running".into()],
            ));
        }
        let mut power = ConvResource::new("power");
        power.providers = providers;
        model.add_resource(power);
        model
    }

    fn running(timeline: ObjectRef, amount: u32) -> Provider {
        Provider {
            timeline,
            value: "Running".to_string(),
            amount,
        }
    }

    #[test]
    fn test_single_provider() {
        let model = model(vec![running(ObjectRef::named("gen(g1)"), 3)]);
        let table = check_providers(&model).unwrap();

        assert_eq!(
            table.providers_of("power"),
            &[ResolvedProvider {
                timeline: "gen(g1)".to_string(),
                value: "Running".to_string(),
                amount: 3,
            }]
        );
        assert_eq!(table.capacity_of("gen(g1)", "Running"), 3);
        assert_eq!(table.capacity_of("gen(g2)", "Running"), 0);
        assert_eq!(table.capacity_of("gen(g1)", "Off"), 0);
        assert_eq!(table.resources().collect::<Vec<_>>(), vec!["power"]);
    }

    #[test]
    fn test_class_reference_resolved() {
        let model = model(vec![running(ObjectRef::any_of_class("gen"), 1)]);
        let table = check_providers(&model).unwrap();

        let timelines: Vec<_> = table
            .providers_of("power")
            .iter()
            .map(|p| p.timeline.as_str())
            .collect();
        assert_eq!(timelines, vec!["gen(g1)", "gen(g2)"]);
        assert_eq!(table.capacity_of("gen(g2)", "Running"), 1);
    }

    #[test]
    fn test_missing_provider() {
        let err = check_providers(&model(Vec::new())).unwrap_err();
        assert_eq!(
            err,
            ConversionError::ResourceProviderConflict {
                resource: "power".to_string(),
                provider_count: 0,
            }
        );
    }

    #[test]
    fn test_two_providers() {
        let model = model(vec![
            running(ObjectRef::named("gen(g1)"), 1),
            running(ObjectRef::named("gen(g2)"), 1),
        ]);
        assert!(matches!(
            check_providers(&model),
            Err(ConversionError::ResourceProviderConflict {
                provider_count: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_unresolvable_reference() {
        let model = model(vec![running(ObjectRef::named("boiler"), 1)]);
        assert!(matches!(
            check_providers(&model),
            Err(ConversionError::ResourceProviderConflict { .. })
        ));
    }
}
