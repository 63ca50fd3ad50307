use indexmap::IndexMap;

use super::registry::{GenerationFailure, GenerationResult};

/// A cross-run aggregate of generated files
///
/// Independent orchestrator runs (one per target project in a bulk
/// operation, for example) each produce their own [`GenerationResult`];
/// absorbing them here is the only point that needs serializing.
#[derive(Debug, Default)]
pub struct GeneratedArtifacts {
    pub contracts: IndexMap<String, IndexMap<String, String>>,
    pub validators: IndexMap<String, IndexMap<String, String>>,
    pub controllers: IndexMap<String, String>,
    pub routes: IndexMap<String, String>,
    pub scaffolds: IndexMap<String, String>,
    pub models_processed: usize,
    pub service_integrations: usize,
    pub errors: Vec<GenerationFailure>,
}

impl GeneratedArtifacts {
    /// Additively fold one run's result into the aggregate
    ///
    /// Never removes or overwrites keys unrelated to `result`. Overlapping
    /// model keys union-merge their file maps: new filenames are added and a
    /// filename already present for the same model is overwritten by the
    /// newer content (last-writer-wins within this call). Counts accumulate
    /// and error lists append in order.
    pub fn absorb(&mut self, result: GenerationResult) {
        merge_keyed(&mut self.contracts, result.contracts);
        merge_keyed(&mut self.validators, result.validators);
        self.controllers.extend(result.controllers);
        self.routes.extend(result.routes);
        self.scaffolds.extend(result.scaffolds);
        self.models_processed += result.models_processed;
        self.service_integrations += result.service_integrations;
        self.errors.extend(result.errors);
    }

    /// Total number of generated files across all categories
    pub fn file_count(&self) -> usize {
        self.contracts.values().map(IndexMap::len).sum::<usize>()
            + self.validators.values().map(IndexMap::len).sum::<usize>()
            + self.controllers.len()
            + self.routes.len()
            + self.scaffolds.len()
    }
}

fn merge_keyed(
    target: &mut IndexMap<String, IndexMap<String, String>>,
    incoming: IndexMap<String, IndexMap<String, String>>,
) {
    for (key, files) in incoming {
        target.entry(key).or_default().extend(files);
    }
}
