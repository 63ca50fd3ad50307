//! # Generator Module
//!
//! The registry-mode generation orchestrator and its collaborator contracts.
//!
//! ## Overview
//!
//! "Registry mode" aggregates per-model artifacts into shared, keyed maps
//! rather than scattering one file per concern: contracts and validators are
//! keyed by model name, service controller/route/scaffold artifacts by
//! filename. An out-of-scope file writer consumes the resulting
//! [`GenerationResult`].
//!
//! ## Architecture
//!
//! ```text
//! Schema + AnalysisMap + ServiceAnnotations
//!         │
//!         ▼
//! Generator::generate ──► per-model fold ──► per-annotation fold
//!         │                    │ isolation        │ isolation
//!         ▼                    ▼                  ▼
//!    GenerationResult { contracts, validators, controllers, routes,
//!                       scaffolds, counts, errors }
//! ```
//!
//! The orchestrator is synchronous and performs no I/O. Each model and each
//! annotation is one atomic unit: a unit either lands all of its artifacts or
//! none, and a failing unit is recorded and skipped rather than aborting the
//! run. `continue_on_error = false` inverts that: the first failure is
//! re-raised to the caller immediately.
//!
//! Renderer collaborators are passed in per run as trait objects - an
//! explicit registry value, never a module-level singleton - so independent
//! runs share no mutable state and can execute concurrently.

mod merge;
mod registry;
mod renderers;

#[cfg(test)]
mod tests;

pub use merge::GeneratedArtifacts;
pub use registry::{
    run_pipeline, GenerationFailure, GenerationResult, Generator, GeneratorOptions,
};
pub use renderers::{CodeValidator, ContractSet, ModelRenderer, ServiceRenderer, ValidatorSet};
