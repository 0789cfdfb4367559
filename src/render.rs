//! Output rendering for serializer definitions.
//!
//! A [`BoundSerializer`] couples a definition with an optional request
//! context and renders `serde_json::Value` input into the effective field
//! set. Query-parameter filtering applies to the first level only; nested
//! definitions render without the request context.

use serde_json::{Map, Value};

use crate::request::RequestContext;
use crate::schema::{FieldConfig, FieldDescriptor, SerializerDef};

/// A serializer definition bound to an optional request context.
#[derive(Clone, Copy)]
pub struct BoundSerializer<'a> {
    def: &'a SerializerDef,
    request: Option<&'a dyn RequestContext>,
}

impl SerializerDef {
    /// Bind without a request context: the full declared field set renders.
    pub fn bind(&self) -> BoundSerializer<'_> {
        BoundSerializer {
            def: self,
            request: None,
        }
    }

    /// Bind with a request context so GET query parameters can narrow the
    /// emitted field set.
    pub fn bind_with_request<'a>(&'a self, request: &'a dyn RequestContext) -> BoundSerializer<'a> {
        BoundSerializer {
            def: self,
            request: Some(request),
        }
    }
}

impl<'a> BoundSerializer<'a> {
    /// The effective fields for this binding, in declaration order.
    ///
    /// Names that exist only in the Meta field list have no descriptor to
    /// render and are not part of the result.
    pub fn fields(&self) -> Vec<(&'a str, &'a FieldDescriptor)> {
        let effective = self.def.effective_field_names(self.request);
        self.def
            .fields()
            .iter()
            .filter(|(name, _)| effective.iter().any(|kept| kept == name))
            .map(|(name, descriptor)| (name.as_str(), descriptor))
            .collect()
    }

    /// Render one input value into an object containing exactly the
    /// effective fields. Missing input keys render as `null`; this path
    /// degrades, it never errors.
    pub fn serialize(&self, value: &Value) -> Value {
        let mut out = Map::new();
        for (name, descriptor) in self.fields() {
            out.insert(name.to_string(), render_field(name, descriptor, value));
        }
        Value::Object(out)
    }

    /// Render a slice of input values into an array.
    pub fn serialize_many(&self, values: &[Value]) -> Value {
        Value::Array(values.iter().map(|value| self.serialize(value)).collect())
    }
}

fn source_key<'a>(name: &'a str, config: &'a FieldConfig) -> &'a str {
    config.source.as_deref().unwrap_or(name)
}

fn render_field(name: &str, descriptor: &FieldDescriptor, value: &Value) -> Value {
    match descriptor {
        FieldDescriptor::Terminal(config) => value
            .get(source_key(name, config))
            .cloned()
            .unwrap_or(Value::Null),
        FieldDescriptor::Nested(nested) => match value.get(source_key(name, &nested.config)) {
            Some(inner) => render_schema(&nested.schema, inner, nested.many),
            None => Value::Null,
        },
        FieldDescriptor::Relation(relation) => {
            match value.get(source_key(name, &relation.config)) {
                Some(inner) => render_schema(&relation.schema, inner, relation.relation.many),
                None => Value::Null,
            }
        }
    }
}

fn render_schema(schema: &SerializerDef, value: &Value, many: bool) -> Value {
    if many {
        match value.as_array() {
            Some(items) => schema.bind().serialize_many(items),
            None => Value::Null,
        }
    } else {
        schema.bind().serialize(value)
    }
}
