use crate::analysis::ModelAnalysis;
use crate::schema::Model;
use crate::services::ResolvedService;

/// Contract artifacts for one model, one entry per generated file
///
/// A closed record rather than a map with optional keys: a renderer that
/// cannot produce all four artifacts must fail instead of returning a
/// partial set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSet {
    pub create: String,
    pub update: String,
    pub read: String,
    pub query: String,
}

impl ContractSet {
    pub(crate) fn into_named_files(self) -> [(&'static str, String); 4] {
        [
            ("create", self.create),
            ("update", self.update),
            ("read", self.read),
            ("query", self.query),
        ]
    }
}

/// Validator artifacts for one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSet {
    pub create: String,
    pub update: String,
    pub query: String,
}

impl ValidatorSet {
    pub(crate) fn into_named_files(self) -> [(&'static str, String); 3] {
        [
            ("create", self.create),
            ("update", self.update),
            ("query", self.query),
        ]
    }
}

/// Per-model artifact renderer supplied by the caller
///
/// Implementations must be pure: given a model and its analysis they return
/// named source text or fail, and they must not mutate shared state. Failures
/// are caught per model by the orchestrator.
pub trait ModelRenderer {
    fn contracts(&self, model: &Model, analysis: &ModelAnalysis) -> anyhow::Result<ContractSet>;
    fn validators(&self, model: &Model, analysis: &ModelAnalysis) -> anyhow::Result<ValidatorSet>;
}

/// Per-annotation artifact renderer for service integrations
pub trait ServiceRenderer {
    fn controller(&self, service: &ResolvedService) -> anyhow::Result<String>;
    fn routes(&self, service: &ResolvedService) -> anyhow::Result<String>;
    fn scaffold(&self, service: &ResolvedService) -> anyhow::Result<String>;
}

/// Optional code-quality predicate: `(content, filename) -> accept`
///
/// Files that fail the predicate are dropped from the result without being
/// recorded as errors. The default predicate accepts any non-empty content.
pub type CodeValidator = dyn Fn(&str, &str) -> bool;
