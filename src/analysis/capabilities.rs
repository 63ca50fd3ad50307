use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::{Model, ScalarCategory};

/// A field name recognized as a known domain pattern
///
/// Downstream generators use these markers to decide whether to emit extra
/// operations beyond plain CRUD (lookup-by-slug, publish/unpublish,
/// increment-view-count, approve/reject, soft-delete/restore, thread
/// traversal for self-referential parent links).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialField {
    /// `slug` - stable lookup key alongside the id
    Slug,
    /// `published` - publish/unpublish toggle
    Published,
    /// `views` / `viewCount` - increment-on-read counter
    ViewCounter,
    /// `approved` - moderation approve/reject toggle
    Approved,
    /// `deletedAt` - soft-delete / restore support
    SoftDelete,
    /// `parentId` - self-referential thread/reply traversal
    ParentLink,
}

/// Feature flags for a model's generated API surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// At least one scalar field of string/number/date/boolean type
    pub can_filter: bool,
    /// At least one non-sensitive string-typed field
    pub can_search: bool,
    /// Non-empty scalar field set
    pub can_sort: bool,
    /// Pagination needs a stable sortable column; same predicate as sorting
    pub can_paginate: bool,
    /// Both a createdAt-style and an updatedAt-style field present
    pub has_timestamps: bool,
    /// A deletedAt-style field is present
    pub has_soft_delete: bool,
}

/// Name fragments that disqualify a string field from text search.
///
/// Security-critical exclusion: credential-bearing columns must never be
/// exposed through generated search endpoints, regardless of declared type.
const SEARCH_EXCLUDED_NAME_PARTS: [&str; 4] = ["password", "hash", "secret", "token"];

/// Case-fold a field name and strip underscores so `deleted_at`,
/// `deletedAt`, and `DeletedAt` all compare equal.
fn normalized(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

pub(crate) fn is_created_at_name(name: &str) -> bool {
    normalized(name) == "createdat"
}

pub(crate) fn is_updated_at_name(name: &str) -> bool {
    normalized(name) == "updatedat"
}

pub(crate) fn is_deleted_at_name(name: &str) -> bool {
    normalized(name) == "deletedat"
}

fn name_is_sensitive(name: &str) -> bool {
    let lower = name.to_lowercase();
    SEARCH_EXCLUDED_NAME_PARTS
        .iter()
        .any(|part| lower.contains(part))
}

/// Match a field name against the fixed recognized-name table
pub fn special_field_marker(name: &str) -> Option<SpecialField> {
    match normalized(name).as_str() {
        "slug" => Some(SpecialField::Slug),
        "published" => Some(SpecialField::Published),
        "views" | "viewcount" => Some(SpecialField::ViewCounter),
        "approved" => Some(SpecialField::Approved),
        "deletedat" => Some(SpecialField::SoftDelete),
        "parentid" => Some(SpecialField::ParentLink),
        _ => None,
    }
}

/// Collect recognized special-field markers for a model, in field order
pub fn special_fields(model: &Model) -> IndexMap<String, SpecialField> {
    model
        .fields
        .iter()
        .filter_map(|f| special_field_marker(&f.name).map(|m| (f.name.clone(), m)))
        .collect()
}

/// Derive capability flags from a model's field set
///
/// Pure and deterministic: no hidden state, identical input yields identical
/// output.
pub fn capabilities(model: &Model) -> Capabilities {
    let can_filter = model.scalar_fields().any(|f| f.category().is_some());
    let can_search = model.scalar_fields().any(|f| {
        matches!(f.category(), Some(ScalarCategory::Text)) && !name_is_sensitive(&f.name)
    });
    let can_sort = model.scalar_fields().next().is_some();

    let has_created = model.scalar_fields().any(|f| is_created_at_name(&f.name));
    let has_updated = model
        .scalar_fields()
        .any(|f| f.is_updated_at || is_updated_at_name(&f.name));
    let has_soft_delete = model.scalar_fields().any(|f| is_deleted_at_name(&f.name));

    Capabilities {
        can_filter,
        can_search,
        can_sort,
        can_paginate: can_sort,
        has_timestamps: has_created && has_updated,
        has_soft_delete,
    }
}
