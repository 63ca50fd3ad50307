//! Crate-level error taxonomy.
//!
//! Three failure classes with different blast radii:
//!
//! - [`GeneratorError::Validation`] - structural defect in a single model;
//!   fatal to that model's generation only, the run continues
//! - [`GeneratorError::Generation`] - a renderer collaborator failed; caught
//!   per unit and recorded, the run continues unless fail-fast is configured
//! - [`GeneratorError::Configuration`] - contradictory orchestrator options;
//!   fatal to the whole run, surfaced before any unit executes

use thiserror::Error;

use crate::schema::ValidationIssue;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Structural defect in a single model definition
    #[error("model '{model}': {message}")]
    Validation { model: String, message: String },

    /// A renderer collaborator failed for one model or service annotation
    #[error("generation failed for '{unit}': {message}")]
    Generation {
        unit: String,
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Contradictory or invalid orchestrator options
    #[error("invalid generator configuration: {0}")]
    Configuration(String),
}

impl From<ValidationIssue> for GeneratorError {
    fn from(issue: ValidationIssue) -> Self {
        GeneratorError::Validation {
            model: issue.model,
            message: issue.message,
        }
    }
}
