use serde::{Deserialize, Serialize};

/// Declared kind of a field in the source schema
///
/// A field is exactly one of these; the builder never produces a field that
/// is both scalar and relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Plain column-backed value (string, number, date, boolean, json, ...)
    Scalar,
    /// Link to another model, optionally backed by foreign-key scalars
    Relation,
    /// Value constrained to a declared enum type
    Enum,
}

/// Broad classification of a declared scalar type name
///
/// Used by capability inference: filterable columns are the string / number /
/// date / boolean categories, searchable columns are the string category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarCategory {
    Text,
    Number,
    Date,
    Boolean,
}

/// Classify a declared scalar type name
///
/// Returns `None` for types that don't participate in filtering or search
/// (e.g. `Json`, `Bytes`, or an enum type name).
pub fn scalar_category(declared: &str) -> Option<ScalarCategory> {
    match declared {
        "String" | "Text" => Some(ScalarCategory::Text),
        "Int" | "BigInt" | "Float" | "Decimal" => Some(ScalarCategory::Number),
        "DateTime" | "Date" => Some(ScalarCategory::Date),
        "Boolean" | "Bool" => Some(ScalarCategory::Boolean),
        _ => None,
    }
}

/// A single field definition
///
/// Shared between the raw input shape and the built model graph; the builder
/// validates but does not rewrite fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name as declared in the source schema
    pub name: String,
    /// Declared type name (e.g. `String`, `Int`, `DateTime`, or a model /
    /// enum name for relation / enum fields)
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether this is a scalar, relation, or enum field
    pub kind: FieldKind,
    /// Field must be present on create
    #[serde(default)]
    pub required: bool,
    /// Field holds a list of values (to-many relation or scalar array)
    #[serde(default)]
    pub list: bool,
    /// Field carries a uniqueness constraint
    #[serde(default)]
    pub unique: bool,
    /// Field is the model's identifier
    #[serde(default)]
    pub is_id: bool,
    /// Field is never writable through generated mutations
    #[serde(default)]
    pub read_only: bool,
    /// Field is maintained as an update timestamp by the persistence layer
    #[serde(default)]
    pub is_updated_at: bool,
    /// Field has a schema-level default value
    #[serde(default)]
    pub has_default: bool,
    /// Target model name, for relation fields
    #[serde(default)]
    pub relation_target: Option<String>,
    /// Names of the scalar fields on this model that hold the foreign key,
    /// for relation fields that own the link
    #[serde(default)]
    pub foreign_key_fields: Vec<String>,
}

impl Field {
    /// Create a scalar field with no flags set
    pub fn scalar(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            ty: ty.into(),
            kind: FieldKind::Scalar,
            required: false,
            list: false,
            unique: false,
            is_id: false,
            read_only: false,
            is_updated_at: false,
            has_default: false,
            relation_target: None,
            foreign_key_fields: Vec::new(),
        }
    }

    /// Create a relation field pointing at `target`
    pub fn relation(name: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        Field {
            relation_target: Some(target.clone()),
            kind: FieldKind::Relation,
            ..Field::scalar(name, target)
        }
    }

    /// Create an enum field constrained to the declared enum `enum_name`
    pub fn enumeration(name: impl Into<String>, enum_name: impl Into<String>) -> Self {
        Field {
            kind: FieldKind::Enum,
            ..Field::scalar(name, enum_name)
        }
    }

    /// Flag this field as the model identifier
    pub fn id(mut self) -> Self {
        self.is_id = true;
        self.required = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Flag this field as a persistence-maintained update timestamp
    pub fn updated_at(mut self) -> Self {
        self.is_updated_at = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// Declare the scalar fields on this model that hold the foreign key
    pub fn foreign_keys<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.foreign_key_fields = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self.kind, FieldKind::Relation)
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.kind, FieldKind::Relation)
    }

    /// Scalar category of the declared type, for scalar fields
    pub fn category(&self) -> Option<ScalarCategory> {
        if self.is_scalar() {
            scalar_category(&self.ty)
        } else {
            None
        }
    }
}

/// A model definition as produced by the external schema adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawModel {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// An enum declaration from the source schema
///
/// Carried through unchanged so renderers can emit enum-aware artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    #[serde(default)]
    pub variants: Vec<String>,
}

/// The full raw schema handed to [`super::build_schema`]
///
/// Model order is preserved end to end; it determines generation order and
/// therefore error-list ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSchema {
    #[serde(default)]
    pub models: Vec<RawModel>,
    #[serde(default)]
    pub enums: Vec<EnumDef>,
}

/// A validated model in the built graph
///
/// Invariant: `id_field` indexes the first field flagged `is_id`; models
/// without one never make it into a [`Schema`].
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub fields: Vec<Field>,
    id_field: usize,
}

impl Model {
    pub(crate) fn new(name: String, fields: Vec<Field>, id_field: usize) -> Self {
        Model {
            name,
            fields,
            id_field,
        }
    }

    /// The field flagged as this model's identifier
    pub fn id_field(&self) -> &Field {
        &self.fields[self.id_field]
    }

    /// Fields with kind other than relation, in declaration order
    pub fn scalar_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_scalar())
    }

    /// Relation fields, in declaration order
    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The built model graph
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Validated models in input order
    pub models: Vec<Model>,
    /// Enum declarations, passed through from the raw schema
    pub enums: Vec<EnumDef>,
}

impl Schema {
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }
}
