use serde::Serialize;
use tracing::warn;

use super::AnalysisConfig;
use crate::schema::{Field, Model, Schema};

/// Relationship cardinality, named from the source model's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    /// Non-list on both sides
    OneToOne,
    /// List on this side, non-list on the other
    ManyToOne,
    /// Non-list on this side, list on the other
    OneToMany,
    /// List on both sides (a junction model usually exists elsewhere)
    ManyToMany,
    /// Neither a matching foreign key nor a symmetric back-reference exists
    Unknown,
}

/// A classified link from one model to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    /// Relation field on the source model this entry describes
    pub field: String,
    pub source: String,
    pub target: String,
    pub cardinality: Cardinality,
    /// True when the source model declares the foreign key for this link
    pub owning_side: bool,
    /// Recommend loading this relation by default on reads, so a required
    /// to-one link never comes back incomplete
    pub auto_include: bool,
}

/// Classify every relation field on a model against the rest of the schema
///
/// Unresolvable relations are classified [`Cardinality::Unknown`] and logged
/// as a warning; they never fail the run.
pub fn classify_relationships(
    model: &Model,
    schema: &Schema,
    config: &AnalysisConfig,
) -> Vec<Relationship> {
    model
        .relation_fields()
        .map(|field| classify_relation(model, field, schema, config))
        .collect()
}

fn classify_relation(
    model: &Model,
    field: &Field,
    schema: &Schema,
    config: &AnalysisConfig,
) -> Relationship {
    let target_name = field
        .relation_target
        .clone()
        .unwrap_or_else(|| field.ty.clone());
    let target = schema.model(&target_name);
    let back_ref = target.and_then(|t| find_back_reference(model, field, t));
    let owns_fk = resolves_foreign_key(model, field);

    let cardinality = if target.is_none() || (back_ref.is_none() && !owns_fk) {
        warn!(
            model = %model.name,
            field = %field.name,
            target = %target_name,
            "unresolved relation classified as unknown"
        );
        Cardinality::Unknown
    } else {
        let other_is_list = back_ref.map(|b| b.list).unwrap_or(false);
        match (field.list, other_is_list) {
            (true, true) => Cardinality::ManyToMany,
            (true, false) => Cardinality::ManyToOne,
            (false, true) => Cardinality::OneToMany,
            (false, false) => Cardinality::OneToOne,
        }
    };

    let to_one = !field.list && cardinality != Cardinality::Unknown;
    Relationship {
        field: field.name.clone(),
        source: model.name.clone(),
        target: target_name,
        cardinality,
        owning_side: owns_fk,
        auto_include: config.auto_include_required_to_one && field.required && to_one,
    }
}

/// Find the relation field on `target` that points back at `model`
///
/// For self-referential relations the field itself is not its own
/// back-reference; any *other* relation field on the model pointing at the
/// model qualifies (the `parent` / `children` pattern).
fn find_back_reference<'a>(model: &Model, field: &Field, target: &'a Model) -> Option<&'a Field> {
    target.relation_fields().find(|g| {
        g.relation_target.as_deref() == Some(model.name.as_str())
            && !(target.name == model.name && g.name == field.name)
    })
}

/// True when the field's declared foreign-key names all resolve to scalar
/// fields on the source model
fn resolves_foreign_key(model: &Model, field: &Field) -> bool {
    !field.foreign_key_fields.is_empty()
        && field.foreign_key_fields.iter().all(|fk| {
            model
                .field_by_name(fk)
                .map(|f| f.is_scalar())
                .unwrap_or(false)
        })
}
