use anyhow::anyhow;
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::renderers::{CodeValidator, ModelRenderer, ServiceRenderer};
use crate::analysis::{analyze_schema, AnalysisConfig, AnalysisMap, ModelAnalysis};
use crate::error::GeneratorError;
use crate::schema::{build_schema, Model, RawSchema, Schema, ValidationIssue};
use crate::services::{resolve_service, ServiceAnnotation};

/// Options controlling a single generation run
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Gate every generated model file through the code-quality predicate
    pub validate_code: bool,
    /// Skip models the analysis flags as junction tables
    pub skip_junction_tables: bool,
    /// Generate controller/route/scaffold artifacts for service annotations
    pub include_service_integrations: bool,
    /// Record per-unit failures and keep going; `false` re-raises the first
    /// failure to the caller immediately
    pub continue_on_error: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            validate_code: true,
            skip_junction_tables: true,
            include_service_integrations: true,
            continue_on_error: true,
        }
    }
}

/// A recorded per-unit failure
///
/// `unit` is the model name or service annotation name that failed; the
/// original renderer error is kept as `source` for reporting layers that
/// want the full chain.
#[derive(Debug)]
pub struct GenerationFailure {
    pub unit: String,
    pub message: String,
    pub source: anyhow::Error,
}

impl From<ValidationIssue> for GenerationFailure {
    fn from(issue: ValidationIssue) -> Self {
        GenerationFailure {
            unit: issue.model,
            source: anyhow!("{}", issue.message),
            message: issue.message,
        }
    }
}

/// Everything one orchestrator run produced
///
/// Contracts and validators are keyed by model name, then by filename within
/// the model; service artifacts are flat filename → content maps. All maps
/// iterate in insertion order, which follows input order.
#[derive(Debug, Default)]
pub struct GenerationResult {
    pub contracts: IndexMap<String, IndexMap<String, String>>,
    pub validators: IndexMap<String, IndexMap<String, String>>,
    pub controllers: IndexMap<String, String>,
    pub routes: IndexMap<String, String>,
    pub scaffolds: IndexMap<String, String>,
    /// Models that completed generation (skipped and failed models excluded)
    pub models_processed: usize,
    /// Service annotations that completed generation
    pub service_integrations: usize,
    /// Ordered list of recorded per-unit failures
    pub errors: Vec<GenerationFailure>,
}

impl GenerationResult {
    /// True when no unit failed
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The registry-mode generation orchestrator
///
/// Holds the run options and the optional code-quality predicate; renderer
/// collaborators arrive per [`Generator::generate`] call. The orchestrator is
/// synchronous, performs no I/O, and shares no mutable state between runs.
pub struct Generator<'a> {
    options: GeneratorOptions,
    code_validator: Option<&'a CodeValidator>,
}

impl<'a> Generator<'a> {
    pub fn new(options: GeneratorOptions) -> Self {
        Generator {
            options,
            code_validator: None,
        }
    }

    /// Replace the default non-empty check with a caller-supplied predicate
    pub fn with_code_validator(mut self, validator: &'a CodeValidator) -> Self {
        self.code_validator = Some(validator);
        self
    }

    /// Run generation over the schema and annotations
    ///
    /// Models are processed in input-schema order, service annotations in
    /// insertion order. Per-unit failures are recorded in the result's error
    /// list; the call itself only fails for run-level misconfiguration or,
    /// with `continue_on_error = false`, the first unit failure.
    pub fn generate(
        &self,
        schema: &Schema,
        analyses: &AnalysisMap,
        annotations: &[ServiceAnnotation],
        renderer: &dyn ModelRenderer,
        services: Option<&dyn ServiceRenderer>,
    ) -> Result<GenerationResult, GeneratorError> {
        if self.options.include_service_integrations
            && !annotations.is_empty()
            && services.is_none()
        {
            return Err(GeneratorError::Configuration(
                "service integrations requested but no service renderer supplied".to_string(),
            ));
        }

        let mut result = GenerationResult::default();

        for model in &schema.models {
            let Some(analysis) = analyses.get(&model.name) else {
                return Err(GeneratorError::Configuration(format!(
                    "no analysis supplied for model '{}'",
                    model.name
                )));
            };
            if self.options.skip_junction_tables && analysis.is_junction_table {
                debug!(model = %model.name, "skipping junction table");
                continue;
            }
            match self.render_model(model, analysis, renderer) {
                Ok((contracts, validators)) => {
                    result.contracts.insert(model.name.clone(), contracts);
                    result.validators.insert(model.name.clone(), validators);
                    result.models_processed += 1;
                }
                Err(err) => self.record_failure(&mut result, &model.name, err)?,
            }
        }

        if self.options.include_service_integrations {
            if let Some(services) = services {
                for annotation in annotations {
                    match self.render_service(annotation, services, &mut result) {
                        Ok(()) => result.service_integrations += 1,
                        Err(err) => self.record_failure(&mut result, &annotation.name, err)?,
                    }
                }
            }
        }

        Ok(result)
    }

    /// Render both artifact sets for one model, atomically
    ///
    /// Either both sets land or the whole model fails; a validator-set error
    /// never leaves half a model in the result.
    fn render_model(
        &self,
        model: &Model,
        analysis: &ModelAnalysis,
        renderer: &dyn ModelRenderer,
    ) -> anyhow::Result<(IndexMap<String, String>, IndexMap<String, String>)> {
        let contracts = renderer.contracts(model, analysis)?;
        let validators = renderer.validators(model, analysis)?;
        Ok((
            self.gate(contracts.into_named_files()),
            self.gate(validators.into_named_files()),
        ))
    }

    fn render_service(
        &self,
        annotation: &ServiceAnnotation,
        renderer: &dyn ServiceRenderer,
        result: &mut GenerationResult,
    ) -> anyhow::Result<()> {
        let resolved = resolve_service(annotation);
        // Render all three artifacts before touching the result, so a
        // mid-annotation failure stays atomic.
        let controller = renderer.controller(&resolved)?;
        let routes = renderer.routes(&resolved)?;
        let scaffold = renderer.scaffold(&resolved)?;
        result
            .controllers
            .insert(format!("{}.controller", resolved.name), controller);
        result
            .routes
            .insert(format!("{}.routes", resolved.name), routes);
        result
            .scaffolds
            .insert(format!("{}.scaffold", resolved.name), scaffold);
        Ok(())
    }

    /// Apply the code-quality gate; failing files are dropped, not errors
    fn gate(
        &self,
        files: impl IntoIterator<Item = (&'static str, String)>,
    ) -> IndexMap<String, String> {
        files
            .into_iter()
            .filter(|(name, content)| {
                let accepted = self.accepts(content, name);
                if !accepted {
                    debug!(file = name, "generated file failed validation, dropped");
                }
                accepted
            })
            .map(|(name, content)| (name.to_string(), content))
            .collect()
    }

    fn accepts(&self, content: &str, filename: &str) -> bool {
        if !self.options.validate_code {
            return true;
        }
        match self.code_validator {
            Some(validator) => validator(content, filename),
            None => !content.is_empty(),
        }
    }

    fn record_failure(
        &self,
        result: &mut GenerationResult,
        unit: &str,
        source: anyhow::Error,
    ) -> Result<(), GeneratorError> {
        warn!(unit, error = %source, "generation unit failed");
        if !self.options.continue_on_error {
            return Err(GeneratorError::Generation {
                unit: unit.to_string(),
                message: source.to_string(),
                source: source.into(),
            });
        }
        result.errors.push(GenerationFailure {
            unit: unit.to_string(),
            message: source.to_string(),
            source,
        });
        Ok(())
    }
}

/// Build, analyze, and generate in one call
///
/// Convenience wiring for callers that start from a raw schema: model-graph
/// validation issues are folded into the result's error list ahead of any
/// per-unit failures, so nothing is silently lost. With `continue_on_error =
/// false` the first validation issue is re-raised instead.
#[allow(clippy::too_many_arguments)]
pub fn run_pipeline(
    raw: RawSchema,
    annotations: &[ServiceAnnotation],
    analysis_config: &AnalysisConfig,
    options: &GeneratorOptions,
    renderer: &dyn ModelRenderer,
    services: Option<&dyn ServiceRenderer>,
    code_validator: Option<&CodeValidator>,
) -> Result<GenerationResult, GeneratorError> {
    let build = build_schema(raw);
    if !options.continue_on_error {
        if let Some(issue) = build.issues.into_iter().next() {
            return Err(issue.into());
        }
        let analyses = analyze_schema(&build.schema, analysis_config);
        let generator = make_generator(options, code_validator);
        return generator.generate(&build.schema, &analyses, annotations, renderer, services);
    }

    let analyses = analyze_schema(&build.schema, analysis_config);
    let generator = make_generator(options, code_validator);
    let mut result =
        generator.generate(&build.schema, &analyses, annotations, renderer, services)?;

    let mut errors: Vec<GenerationFailure> = build
        .issues
        .into_iter()
        .map(GenerationFailure::from)
        .collect();
    errors.append(&mut result.errors);
    result.errors = errors;
    Ok(result)
}

fn make_generator<'a>(
    options: &GeneratorOptions,
    code_validator: Option<&'a CodeValidator>,
) -> Generator<'a> {
    let generator = Generator::new(options.clone());
    match code_validator {
        Some(validator) => generator.with_code_validator(validator),
        None => generator,
    }
}
