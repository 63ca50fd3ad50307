#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::analysis::{analyze_schema, AnalysisConfig, AnalysisMap};
use crate::error::GeneratorError;
use crate::schema::{build_schema, Field, RawModel, RawSchema, Schema};
use crate::services::{ResolvedService, ServiceAnnotation};

/// Deterministic stand-in for the out-of-scope template renderers
#[derive(Default)]
struct StubModelRenderer {
    fail_contracts_on: Option<&'static str>,
    fail_validators_on: Option<&'static str>,
    empty_query: bool,
}

impl ModelRenderer for StubModelRenderer {
    fn contracts(
        &self,
        model: &crate::schema::Model,
        _analysis: &crate::analysis::ModelAnalysis,
    ) -> anyhow::Result<ContractSet> {
        if self.fail_contracts_on == Some(model.name.as_str()) {
            anyhow::bail!("contract template exploded for {}", model.name);
        }
        Ok(ContractSet {
            create: format!("contract create {}", model.name),
            update: format!("contract update {}", model.name),
            read: format!("contract read {}", model.name),
            query: if self.empty_query {
                String::new()
            } else {
                format!("contract query {}", model.name)
            },
        })
    }

    fn validators(
        &self,
        model: &crate::schema::Model,
        _analysis: &crate::analysis::ModelAnalysis,
    ) -> anyhow::Result<ValidatorSet> {
        if self.fail_validators_on == Some(model.name.as_str()) {
            anyhow::bail!("validator template exploded for {}", model.name);
        }
        Ok(ValidatorSet {
            create: format!("validator create {}", model.name),
            update: format!("validator update {}", model.name),
            query: format!("validator query {}", model.name),
        })
    }
}

#[derive(Default)]
struct StubServiceRenderer {
    fail_on: Option<&'static str>,
}

impl ServiceRenderer for StubServiceRenderer {
    fn controller(&self, service: &ResolvedService) -> anyhow::Result<String> {
        if self.fail_on == Some(service.name.as_str()) {
            anyhow::bail!("controller template exploded for {}", service.name);
        }
        Ok(format!("controller {}", service.name))
    }

    fn routes(&self, service: &ResolvedService) -> anyhow::Result<String> {
        Ok(format!("routes {}", service.name))
    }

    fn scaffold(&self, service: &ResolvedService) -> anyhow::Result<String> {
        Ok(format!("scaffold {}", service.name))
    }
}

/// Three models where B is a pure join model between A and C
fn fixture() -> (Schema, AnalysisMap) {
    let build = build_schema(RawSchema {
        models: vec![
            RawModel {
                name: "A".to_string(),
                fields: vec![
                    Field::scalar("id", "String").id(),
                    Field::scalar("name", "String").required(),
                    Field::relation("links", "B").list(),
                ],
            },
            RawModel {
                name: "B".to_string(),
                fields: vec![
                    Field::scalar("id", "String").id(),
                    Field::scalar("aId", "String").required(),
                    Field::scalar("cId", "String").required(),
                    Field::relation("a", "A").required().foreign_keys(["aId"]),
                    Field::relation("c", "C").required().foreign_keys(["cId"]),
                ],
            },
            RawModel {
                name: "C".to_string(),
                fields: vec![
                    Field::scalar("id", "String").id(),
                    Field::scalar("title", "String").required(),
                    Field::relation("links", "B").list(),
                ],
            },
        ],
        enums: vec![],
    });
    assert!(build.issues.is_empty());
    let analyses = analyze_schema(&build.schema, &AnalysisConfig::default());
    (build.schema, analyses)
}

fn options() -> GeneratorOptions {
    GeneratorOptions::default()
}

#[test]
fn test_skip_junction_tables() {
    let (schema, analyses) = fixture();
    assert!(analyses.get("B").unwrap().is_junction_table);

    let generator = Generator::new(options());
    let result = generator
        .generate(&schema, &analyses, &[], &StubModelRenderer::default(), None)
        .unwrap();
    assert_eq!(result.models_processed, 2);
    assert!(result.contracts.contains_key("A"));
    assert!(!result.contracts.contains_key("B"));
    assert!(result.contracts.contains_key("C"));
    assert!(!result.validators.contains_key("B"));
    assert!(result.is_clean());
}

#[test]
fn test_junction_generated_when_not_skipped() {
    let (schema, analyses) = fixture();
    let generator = Generator::new(GeneratorOptions {
        skip_junction_tables: false,
        ..options()
    });
    let result = generator
        .generate(&schema, &analyses, &[], &StubModelRenderer::default(), None)
        .unwrap();
    assert_eq!(result.models_processed, 3);
    assert!(result.contracts.contains_key("B"));
}

#[test]
fn test_per_model_isolation() {
    let (schema, analyses) = fixture();
    let renderer = StubModelRenderer {
        fail_contracts_on: Some("A"),
        ..StubModelRenderer::default()
    };
    let result = Generator::new(options())
        .generate(&schema, &analyses, &[], &renderer, None)
        .unwrap();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].unit, "A");
    assert!(result.errors[0].message.contains("exploded"));
    assert!(!result.contracts.contains_key("A"));
    assert!(result.contracts.contains_key("C"));
    assert_eq!(result.models_processed, 1, "only C completed");
}

#[test]
fn test_model_step_is_atomic() {
    // Contracts succeed, validators fail: neither set may land
    let (schema, analyses) = fixture();
    let renderer = StubModelRenderer {
        fail_validators_on: Some("C"),
        ..StubModelRenderer::default()
    };
    let result = Generator::new(options())
        .generate(&schema, &analyses, &[], &renderer, None)
        .unwrap();
    assert!(!result.contracts.contains_key("C"));
    assert!(!result.validators.contains_key("C"));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].unit, "C");
}

#[test]
fn test_fail_fast_reraises_first_error() {
    let (schema, analyses) = fixture();
    let renderer = StubModelRenderer {
        fail_contracts_on: Some("A"),
        ..StubModelRenderer::default()
    };
    let generator = Generator::new(GeneratorOptions {
        continue_on_error: false,
        ..options()
    });
    let err = generator
        .generate(&schema, &analyses, &[], &renderer, None)
        .unwrap_err();
    match err {
        GeneratorError::Generation { unit, .. } => assert_eq!(unit, "A"),
        other => panic!("expected generation error, got {other}"),
    }
}

#[test]
fn test_missing_service_renderer_is_configuration_error() {
    let (schema, analyses) = fixture();
    let annotations = [ServiceAnnotation::new("ai-agent", ["sendMessage"])];
    let err = Generator::new(options())
        .generate(
            &schema,
            &analyses,
            &annotations,
            &StubModelRenderer::default(),
            None,
        )
        .unwrap_err();
    assert!(matches!(err, GeneratorError::Configuration(_)));
}

#[test]
fn test_missing_analysis_is_configuration_error() {
    let (schema, _) = fixture();
    let err = Generator::new(options())
        .generate(
            &schema,
            &AnalysisMap::default(),
            &[],
            &StubModelRenderer::default(),
            None,
        )
        .unwrap_err();
    assert!(matches!(err, GeneratorError::Configuration(_)));
}

#[test]
fn test_default_gate_drops_empty_files_silently() {
    let (schema, analyses) = fixture();
    let renderer = StubModelRenderer {
        empty_query: true,
        ..StubModelRenderer::default()
    };
    let result = Generator::new(options())
        .generate(&schema, &analyses, &[], &renderer, None)
        .unwrap();
    let a_contracts = result.contracts.get("A").unwrap();
    assert!(!a_contracts.contains_key("query"));
    assert_eq!(a_contracts.len(), 3);
    // Dropped files are not errors
    assert!(result.is_clean());
    assert_eq!(result.models_processed, 2);
}

#[test]
fn test_gate_disabled_keeps_everything() {
    let (schema, analyses) = fixture();
    let renderer = StubModelRenderer {
        empty_query: true,
        ..StubModelRenderer::default()
    };
    let generator = Generator::new(GeneratorOptions {
        validate_code: false,
        ..options()
    });
    let result = generator
        .generate(&schema, &analyses, &[], &renderer, None)
        .unwrap();
    assert_eq!(result.contracts.get("A").unwrap().len(), 4);
}

#[test]
fn test_custom_code_validator() {
    let (schema, analyses) = fixture();
    let reject_updates = |_code: &str, filename: &str| filename != "update";
    let result = Generator::new(options())
        .with_code_validator(&reject_updates)
        .generate(&schema, &analyses, &[], &StubModelRenderer::default(), None)
        .unwrap();
    let a_contracts = result.contracts.get("A").unwrap();
    assert!(a_contracts.contains_key("create"));
    assert!(!a_contracts.contains_key("update"));
    assert!(!result.validators.get("A").unwrap().contains_key("update"));
}

#[test]
fn test_service_generation_in_insertion_order() {
    let (schema, analyses) = fixture();
    let annotations = [
        ServiceAnnotation::new("ai-agent", ["sendMessage", "getHistory"]),
        ServiceAnnotation::new("mailer", ["sendDigest"]),
    ];
    let services = StubServiceRenderer::default();
    let result = Generator::new(options())
        .generate(
            &schema,
            &analyses,
            &annotations,
            &StubModelRenderer::default(),
            Some(&services),
        )
        .unwrap();
    assert_eq!(result.service_integrations, 2);
    let controller_keys: Vec<_> = result.controllers.keys().map(String::as_str).collect();
    assert_eq!(controller_keys, ["ai-agent.controller", "mailer.controller"]);
    assert!(result.routes.contains_key("ai-agent.routes"));
    assert!(result.scaffolds.contains_key("mailer.scaffold"));
}

#[test]
fn test_service_failure_is_isolated() {
    let (schema, analyses) = fixture();
    let annotations = [
        ServiceAnnotation::new("ai-agent", ["sendMessage"]),
        ServiceAnnotation::new("mailer", ["sendDigest"]),
    ];
    let services = StubServiceRenderer {
        fail_on: Some("ai-agent"),
    };
    let result = Generator::new(options())
        .generate(
            &schema,
            &analyses,
            &annotations,
            &StubModelRenderer::default(),
            Some(&services),
        )
        .unwrap();
    assert_eq!(result.service_integrations, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].unit, "ai-agent");
    assert!(!result.controllers.contains_key("ai-agent.controller"));
    assert!(result.controllers.contains_key("mailer.controller"));
}

#[test]
fn test_structural_idempotence() {
    let (schema, analyses) = fixture();
    let annotations = [ServiceAnnotation::new("ai-agent", ["sendMessage"])];
    let services = StubServiceRenderer::default();
    let generator = Generator::new(options());
    let run = || {
        generator
            .generate(
                &schema,
                &analyses,
                &annotations,
                &StubModelRenderer::default(),
                Some(&services),
            )
            .unwrap()
    };
    let first = run();
    let second = run();
    assert_eq!(first.models_processed, second.models_processed);
    assert_eq!(first.service_integrations, second.service_integrations);
    assert_eq!(
        first.contracts.keys().collect::<Vec<_>>(),
        second.contracts.keys().collect::<Vec<_>>()
    );
    assert_eq!(
        first.validators.keys().collect::<Vec<_>>(),
        second.validators.keys().collect::<Vec<_>>()
    );
    assert_eq!(
        first.controllers.keys().collect::<Vec<_>>(),
        second.controllers.keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_absorb_is_additive() {
    let (schema, analyses) = fixture();
    let mut aggregate = GeneratedArtifacts::default();
    aggregate.contracts.insert(
        "Unrelated".to_string(),
        [("create".to_string(), "keep me".to_string())]
            .into_iter()
            .collect(),
    );
    aggregate
        .controllers
        .insert("legacy.controller".to_string(), "keep me too".to_string());

    let result = Generator::new(options())
        .generate(&schema, &analyses, &[], &StubModelRenderer::default(), None)
        .unwrap();
    aggregate.absorb(result);

    // Unrelated keys are untouched
    assert_eq!(
        aggregate.contracts.get("Unrelated").unwrap().get("create"),
        Some(&"keep me".to_string())
    );
    assert_eq!(
        aggregate.controllers.get("legacy.controller"),
        Some(&"keep me too".to_string())
    );
    assert!(aggregate.contracts.contains_key("A"));
    assert_eq!(aggregate.models_processed, 2);
}

#[test]
fn test_absorb_union_merges_overlapping_models() {
    let mut aggregate = GeneratedArtifacts::default();
    let mut first = GenerationResult::default();
    first.contracts.insert(
        "A".to_string(),
        [
            ("create".to_string(), "old create".to_string()),
            ("read".to_string(), "old read".to_string()),
        ]
        .into_iter()
        .collect(),
    );
    first.models_processed = 1;
    aggregate.absorb(first);

    let mut second = GenerationResult::default();
    second.contracts.insert(
        "A".to_string(),
        [
            ("create".to_string(), "new create".to_string()),
            ("query".to_string(), "new query".to_string()),
        ]
        .into_iter()
        .collect(),
    );
    second.models_processed = 1;
    aggregate.absorb(second);

    let a = aggregate.contracts.get("A").unwrap();
    // Last writer wins for the shared filename; everything else unions
    assert_eq!(a.get("create"), Some(&"new create".to_string()));
    assert_eq!(a.get("read"), Some(&"old read".to_string()));
    assert_eq!(a.get("query"), Some(&"new query".to_string()));
    assert_eq!(aggregate.models_processed, 2);
    assert_eq!(aggregate.file_count(), 3);
}
