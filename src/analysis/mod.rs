//! # Analysis Module
//!
//! Turns the built model graph into per-model analyses that drive generation:
//!
//! - **Relationship classification** - cardinality and ownership for every
//!   relation field, resolved against the rest of the schema
//! - **Junction-table detection** - structural heuristic flagging models that
//!   exist only to join two others
//! - **Capability and special-field inference** - which generator features
//!   apply to a model (filter, search, sort, paginate, timestamps,
//!   soft-delete) and which field names match known domain patterns
//!
//! All analyses are pure, deterministic functions of a model's field set:
//! identical input always produces identical output. Heuristic thresholds are
//! policy with real false-positive risk, so they are exposed on
//! [`AnalysisConfig`] rather than hard-coded.

mod capabilities;
mod junction;
mod relationships;


pub use capabilities::{
    capabilities, special_field_marker, special_fields, Capabilities, SpecialField,
};
pub use junction::is_junction_table;
pub use relationships::{classify_relationships, Cardinality, Relationship};

use indexmap::IndexMap;

use crate::schema::{Model, Schema};

/// Tuning knobs for the heuristic analyses
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Minimum number of relation fields before a model is junction-eligible
    pub junction_min_relations: usize,
    /// Maximum number of non-structural scalar fields (anything beyond the id
    /// and timestamp columns) a junction model may carry
    pub junction_max_extra_scalars: usize,
    /// Mark required to-one relations as includable-by-default on reads
    pub auto_include_required_to_one: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            junction_min_relations: 2,
            junction_max_extra_scalars: 2,
            auto_include_required_to_one: true,
        }
    }
}

/// Everything downstream generators need to know about one model
///
/// Constructed once per run and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAnalysis {
    /// Name of the analyzed model
    pub model: String,
    /// One entry per relation field, in declaration order
    pub relationships: Vec<Relationship>,
    /// Structural join-model heuristic (see [`is_junction_table`])
    pub is_junction_table: bool,
    /// Field name → recognized domain marker, in declaration order
    pub special_fields: IndexMap<String, SpecialField>,
    /// Feature flags for the generated API surface
    pub capabilities: Capabilities,
}

/// Per-model analyses keyed by model name, in schema order
pub type AnalysisMap = IndexMap<String, ModelAnalysis>;

/// Analyze a single model against the schema it belongs to
pub fn analyze_model(model: &Model, schema: &Schema, config: &AnalysisConfig) -> ModelAnalysis {
    ModelAnalysis {
        model: model.name.clone(),
        relationships: classify_relationships(model, schema, config),
        is_junction_table: is_junction_table(model, config),
        special_fields: special_fields(model),
        capabilities: capabilities(model),
    }
}

/// Analyze every model in the schema, preserving input order
pub fn analyze_schema(schema: &Schema, config: &AnalysisConfig) -> AnalysisMap {
    schema
        .models
        .iter()
        .map(|model| (model.name.clone(), analyze_model(model, schema, config)))
        .collect()
}
