use super::capabilities::{is_created_at_name, is_updated_at_name};
use super::AnalysisConfig;
use crate::schema::{Field, Model};

/// Structural join-model heuristic
///
/// A model is flagged as a junction table when it has at least
/// `junction_min_relations` relation fields and at most
/// `junction_max_extra_scalars` scalar fields beyond the id and timestamp
/// columns. Pure, deterministic, and independent of field order.
///
/// This is a heuristic, not a semantic guarantee: a legitimate entity with
/// two relations and few columns will be flagged. The thresholds are
/// configuration for exactly that reason.
pub fn is_junction_table(model: &Model, config: &AnalysisConfig) -> bool {
    let relations = model.relation_fields().count();
    if relations < config.junction_min_relations {
        return false;
    }
    let extra_scalars = model.scalar_fields().filter(|f| !is_structural(f)).count();
    extra_scalars <= config.junction_max_extra_scalars
}

/// Columns every model carries regardless of its domain meaning
fn is_structural(field: &Field) -> bool {
    field.is_id
        || field.is_updated_at
        || is_created_at_name(&field.name)
        || is_updated_at_name(&field.name)
}
