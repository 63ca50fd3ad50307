//! # modelforge
//!
//! **modelforge** is a schema-driven CRUD scaffolding engine. It takes a flat,
//! declarative data-model description (models, fields, enum declarations) and
//! turns it into a fully annotated model graph, then drives independent
//! per-model and per-service artifact generators over that graph with
//! per-unit failure isolation and deterministic merge semantics.
//!
//! ## Overview
//!
//! The crate is deliberately narrow: it owns schema *analysis* and generation
//! *orchestration*. Parsing a stored schema format into [`schema::RawSchema`],
//! the literal text templates that render target source code, and writing
//! generated files to disk are collaborator concerns that live outside this
//! crate.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`schema`]** - Raw definitions and the model graph builder that
//!   normalizes them into typed [`schema::Model`] records
//! - **[`analysis`]** - Relationship classification, junction-table detection,
//!   and capability / special-field inference
//! - **[`services`]** - Service annotation linking (method name → HTTP verb
//!   and route path)
//! - **[`generator`]** - The registry-mode orchestrator, renderer collaborator
//!   contracts, and the additive result merger
//! - **[`error`]** - The crate-level error taxonomy
//!
//! ### Generation Flow
//!
//! ```text
//! RawSchema ──► schema::build_schema ──► Schema + validation issues
//!                       │
//!                       ▼
//!           analysis::analyze_schema ──► AnalysisMap
//!                       │
//!                       ▼
//!   generator::Generator::generate(schema, analyses, annotations, renderers)
//!                       │
//!                       ▼
//!               GenerationResult ──► GeneratedArtifacts::absorb
//! ```
//!
//! Each model and each service annotation is one atomic generation unit: it
//! either completes or fails as a whole, and a failing unit never aborts the
//! run (unless fail-fast is configured). Every recorded failure appears in
//! the result's ordered error list.
//!
//! ## Example
//!
//! ```rust,ignore
//! use modelforge::analysis::AnalysisConfig;
//! use modelforge::generator::{run_pipeline, GeneratorOptions};
//!
//! let result = run_pipeline(
//!     raw_schema,
//!     &annotations,
//!     &AnalysisConfig::default(),
//!     &GeneratorOptions::default(),
//!     &my_model_renderer,
//!     Some(&my_service_renderer),
//!     None,
//! )?;
//! for failure in &result.errors {
//!     eprintln!("{}: {}", failure.unit, failure.message);
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod generator;
pub mod schema;
pub mod services;

pub use error::GeneratorError;
