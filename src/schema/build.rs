use std::collections::HashSet;

use tracing::warn;

use super::types::{Model, RawSchema, Schema};

/// A structural defect found in a single model definition
///
/// Fatal to that model's generation only: the model is excluded from the
/// built schema and every downstream stage, while the rest of the run
/// proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Name of the defective model
    pub model: String,
    /// Human-readable description of the defect
    pub message: String,
}

impl ValidationIssue {
    pub fn new(model: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            model: model.into(),
            message: message.into(),
        }
    }
}

/// Output of the model graph builder
#[derive(Debug, Clone, Default)]
pub struct SchemaBuild {
    /// Models that passed structural validation, in input order
    pub schema: Schema,
    /// One entry per excluded model, in input order
    pub issues: Vec<ValidationIssue>,
}

/// Normalize raw model definitions into a validated model graph
///
/// Resolves each model's id field (the first field flagged `is_id`) and
/// checks for duplicate model and field names. A defective model is recorded
/// as a [`ValidationIssue`] and dropped; it never aborts the other models.
pub fn build_schema(raw: RawSchema) -> SchemaBuild {
    let mut schema = Schema {
        models: Vec::with_capacity(raw.models.len()),
        enums: raw.enums,
    };
    let mut issues = Vec::new();
    let mut seen_models = HashSet::new();

    for raw_model in raw.models {
        if !seen_models.insert(raw_model.name.clone()) {
            warn!(model = %raw_model.name, "duplicate model definition dropped");
            issues.push(ValidationIssue::new(
                &raw_model.name,
                format!("duplicate model definition '{}'", raw_model.name),
            ));
            continue;
        }

        let mut seen_fields = HashSet::new();
        let duplicate_field = raw_model
            .fields
            .iter()
            .find(|f| !seen_fields.insert(f.name.as_str()));
        if let Some(field) = duplicate_field {
            issues.push(ValidationIssue::new(
                &raw_model.name,
                format!(
                    "model '{}' declares field '{}' more than once",
                    raw_model.name, field.name
                ),
            ));
            continue;
        }

        let Some(id_field) = raw_model.fields.iter().position(|f| f.is_id) else {
            issues.push(ValidationIssue::new(
                &raw_model.name,
                format!("model '{}' has no id field", raw_model.name),
            ));
            continue;
        };

        schema
            .models
            .push(Model::new(raw_model.name, raw_model.fields, id_field));
    }

    SchemaBuild { schema, issues }
}
