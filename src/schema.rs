//! Serializer definitions and field descriptors.
//!
//! A [`SerializerDef`] is a named, ordered mapping from field name to
//! [`FieldDescriptor`], optionally backed by a [`Meta`] configuration when the
//! definition mirrors a structured model schema. Definitions are immutable
//! inputs to the reducer: filtering never mutates one in place, it always
//! produces a new, independently owned definition.

use serde::{Deserialize, Serialize};

/// Sentinel Meta value meaning "every schema field".
///
/// Filtering operations reject this value because the selectable universe
/// cannot be enumerated from it.
pub const ALL_FIELDS: &str = "__all__";

/// Construction arguments for a field, replayed when a composite field is
/// rebuilt with a reduced nested definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Key to read from the input value when it differs from the field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the field must be present on input.
    #[serde(default)]
    pub required: bool,
}

/// A field that embeds another serializer definition directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedField {
    /// The nested serializer definition.
    pub schema: SerializerDef,
    /// Whether the field renders a list of nested objects.
    pub many: bool,
    /// Original construction arguments.
    #[serde(default)]
    pub config: FieldConfig,
}

/// Construction arguments of a relation wrapper, independent of the
/// serializer it embeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationConfig {
    /// Whether the relation points at a collection.
    #[serde(default)]
    pub many: bool,
    /// Whether the relation is read-only.
    #[serde(default)]
    pub read_only: bool,
}

/// A field that wraps a nested serializer through a relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationField {
    /// The serializer definition embedded in the relation.
    pub schema: SerializerDef,
    /// The relation's own construction arguments, copied when the embedded
    /// definition is swapped for a reduced one.
    #[serde(default)]
    pub relation: RelationConfig,
    /// Field-level construction arguments.
    #[serde(default)]
    pub config: FieldConfig,
}

/// Descriptor for a single serializer field.
///
/// Composite variants (`Nested`, `Relation`) own a nested definition and are
/// the only ones the reducer recurses into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldDescriptor {
    /// A scalar / primitive field.
    Terminal(FieldConfig),
    /// A nested serializer instance.
    Nested(NestedField),
    /// A relation wrapping a nested serializer.
    Relation(RelationField),
}

impl FieldDescriptor {
    /// A terminal field with default construction arguments.
    pub fn terminal() -> Self {
        Self::Terminal(FieldConfig::default())
    }

    /// A single nested serializer field.
    pub fn nested(schema: SerializerDef) -> Self {
        Self::Nested(NestedField {
            schema,
            many: false,
            config: FieldConfig::default(),
        })
    }

    /// A nested serializer field rendering a list.
    pub fn nested_many(schema: SerializerDef) -> Self {
        Self::Nested(NestedField {
            schema,
            many: true,
            config: FieldConfig::default(),
        })
    }

    /// A relation field wrapping a serializer definition.
    pub fn relation(schema: SerializerDef) -> Self {
        Self::Relation(RelationField {
            schema,
            relation: RelationConfig::default(),
            config: FieldConfig::default(),
        })
    }

    /// The nested definition, for composite descriptors.
    pub fn nested_schema(&self) -> Option<&SerializerDef> {
        match self {
            Self::Terminal(_) => None,
            Self::Nested(nested) => Some(&nested.schema),
            Self::Relation(relation) => Some(&relation.schema),
        }
    }

    /// True for `Nested` and `Relation` descriptors.
    pub fn is_composite(&self) -> bool {
        self.nested_schema().is_some()
    }
}

/// Meta field list of a schema-backed definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaFields {
    /// The `"__all__"` sentinel. Unsupported by filtering.
    All,
    /// An explicit enumeration of selectable field names.
    Names(Vec<String>),
}

/// Meta configuration of a schema-backed serializer definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Name of the backing model / schema.
    pub model: String,
    /// The configured field list.
    pub fields: MetaFields,
}

impl Meta {
    /// Meta with an explicit field enumeration.
    pub fn new<I, S>(model: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            model: model.into(),
            fields: MetaFields::Names(fields.into_iter().map(Into::into).collect()),
        }
    }

    /// Meta with the `"__all__"` sentinel.
    pub fn all(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            fields: MetaFields::All,
        }
    }
}

/// A named, ordered serializer definition.
///
/// Field order is declaration order and is preserved by `exclude_fields`.
/// Definitions are cheap to clone and safe to share across threads; the
/// reducer never mutates one it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializerDef {
    name: String,
    fields: Vec<(String, FieldDescriptor)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
}

impl SerializerDef {
    /// Create an empty definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            meta: None,
        }
    }

    /// Append a declared field.
    pub fn with_field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.push((name.into(), descriptor));
        self
    }

    /// Attach a Meta configuration.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// The definition's name, used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[(String, FieldDescriptor)] {
        &self.fields
    }

    /// The Meta configuration, if this definition is schema-backed.
    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, descriptor)| descriptor)
    }

    /// Declared field names in declaration order.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub(crate) fn from_parts(
        name: String,
        fields: Vec<(String, FieldDescriptor)>,
        meta: Option<Meta>,
    ) -> Self {
        Self { name, fields, meta }
    }
}
