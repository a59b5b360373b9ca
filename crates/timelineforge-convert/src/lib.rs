//! Planning-to-timeline conversion for TimelineForge.
//!
//! The pass runs in a fixed order over one problem:
//!
//! - [`ground`]: expands fluents and actions over finite object domains
//! - [`resolve`]: initial values and goals of the grounded fluents
//! - [`shape`]: validates each ground durative action and extracts its transition
//! - [`assemble`]: folds transitions into the per-timeline model
//! - [`providers`]: every resource needs exactly one provider value
//! - [`synthesize`]: emits token types and static tokens per timeline
//!
//! [`Converter`] drives all of them.

pub mod assemble;
pub mod convert;
pub mod ground;
pub mod providers;
pub mod resolve;
pub mod shape;
pub mod stage1;
pub mod synthesize;

#[cfg(test)]
mod tests;

pub use assemble::Claim;
pub use convert::{convert, Converter};
pub use ground::{Domains, GroundFluent, BOOL_TYPE};
pub use providers::{check_providers, ProviderTable, ResolvedProvider};
pub use shape::{analyze_action, ExtractedTransition};
pub use stage1::{ConvResource, ConvTimeline, ConvValue, FluentKind, Provider, ResourceDelta, Stage1};
pub use synthesize::{synthesize, synthesize_timeline};
