//! # Schema Module
//!
//! Raw data-model definitions and the model graph builder.
//!
//! An external adapter parses a stored schema format (out of scope here) into
//! [`RawSchema`]: an ordered list of models with their fields plus enum
//! declarations. [`build_schema`] normalizes that into a [`Schema`] of typed
//! [`Model`] records with the id field resolved and scalar/relation
//! partitions available, excluding structurally defective models without
//! aborting the rest.

mod build;
mod types;


pub use build::{build_schema, SchemaBuild, ValidationIssue};
pub use types::{
    scalar_category, EnumDef, Field, FieldKind, Model, RawModel, RawSchema, ScalarCategory, Schema,
};
