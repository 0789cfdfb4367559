//! Field reducer: `include_fields` / `exclude_fields`.
//!
//! Both operations are pure copy-on-write reductions. They validate the
//! requested names against the definition's declared + Meta fields and return
//! a freshly allocated [`SerializerDef`]; the base definition and every
//! previously produced reduction stay untouched, so definitions built once
//! per process can be shared across concurrent request handlers.
//!
//! `include_fields` understands the nested `name{sub_a;sub_b}` selector
//! grammar and recurses exactly one level into composite fields.
//! `exclude_fields` takes flat names only.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::FieldSelectionError;
use crate::schema::{
    FieldDescriptor, Meta, MetaFields, NestedField, RelationField, SerializerDef, ALL_FIELDS,
};
use crate::selector::parse_selectors;

impl SerializerDef {
    /// Produce a new definition whose field set is exactly `selectors`.
    ///
    /// Selectors may carry one level of nested sub-selection
    /// (`"author{id;name}"`); for composite fields the nested definition is
    /// reduced with the sub-names and the field is rebuilt with its original
    /// construction arguments. Selectors nested more than one level deep are
    /// silently dropped.
    ///
    /// # Errors
    /// - [`FieldSelectionError::UnsupportedSentinel`] when the Meta field
    ///   list is the `"__all__"` sentinel.
    /// - [`FieldSelectionError::UnknownFields`] when any requested top-level
    ///   name is neither declared nor listed in Meta; the error names every
    ///   offending field.
    pub fn include_fields<I, S>(&self, selectors: I) -> Result<SerializerDef, FieldSelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = parse_selectors(selectors);
        let meta_names = self.meta_field_names()?;
        self.check_unknown(parsed.top_level.iter().map(String::as_str), meta_names.as_deref())?;

        debug!(
            serializer = %self.name(),
            requested = ?parsed.top_level,
            nested = parsed.nested.len(),
            "reducing field set by inclusion"
        );

        // Meta field list is replaced wholesale by the requested names.
        let meta = self.meta().map(|meta| Meta {
            model: meta.model.clone(),
            fields: MetaFields::Names(parsed.top_level.iter().cloned().collect()),
        });

        let mut fields: Vec<(String, FieldDescriptor)> = self
            .fields()
            .iter()
            .filter(|(name, _)| parsed.top_level.contains(name))
            .cloned()
            .collect();

        for (key, sub_names) in &parsed.nested {
            if let Some((_, descriptor)) = fields.iter_mut().find(|(name, _)| name == key) {
                *descriptor = rebuild_composite(descriptor.clone(), sub_names)?;
            }
        }

        Ok(SerializerDef::from_parts(self.name().to_string(), fields, meta))
    }

    /// Produce a new definition with `names` removed, preserving the order of
    /// the remaining fields. Flat names only; the nested `{...}` grammar is
    /// not supported here.
    ///
    /// # Errors
    /// Same two failure modes as [`SerializerDef::include_fields`].
    pub fn exclude_fields<I, S>(&self, names: I) -> Result<SerializerDef, FieldSelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excluded: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let meta_names = self.meta_field_names()?;
        self.check_unknown(excluded.iter().map(String::as_str), meta_names.as_deref())?;

        debug!(
            serializer = %self.name(),
            excluded = ?excluded,
            "reducing field set by exclusion"
        );

        let excluded_set: BTreeSet<&str> = excluded.iter().map(String::as_str).collect();

        let meta = self.meta().map(|meta| Meta {
            model: meta.model.clone(),
            fields: MetaFields::Names(
                meta_names
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .filter(|name| !excluded_set.contains(name.as_str()))
                    .cloned()
                    .collect(),
            ),
        });

        let fields: Vec<(String, FieldDescriptor)> = self
            .fields()
            .iter()
            .filter(|(name, _)| !excluded_set.contains(name.as_str()))
            .cloned()
            .collect();

        Ok(SerializerDef::from_parts(self.name().to_string(), fields, meta))
    }

    /// Read the Meta field enumeration, rejecting the `"__all__"` sentinel.
    fn meta_field_names(&self) -> Result<Option<Vec<String>>, FieldSelectionError> {
        match self.meta().map(|meta| &meta.fields) {
            None => Ok(None),
            Some(MetaFields::All) => Err(FieldSelectionError::UnsupportedSentinel {
                sentinel: ALL_FIELDS.to_string(),
            }),
            Some(MetaFields::Names(names)) => Ok(Some(names.clone())),
        }
    }

    /// Validate requested names against declared + Meta fields.
    fn check_unknown<'a>(
        &self,
        requested: impl Iterator<Item = &'a str>,
        meta_names: Option<&[String]>,
    ) -> Result<(), FieldSelectionError> {
        let mut existing: BTreeSet<&str> = self.declared_names().collect();
        if let Some(meta_names) = meta_names {
            existing.extend(meta_names.iter().map(String::as_str));
        }

        let unknown: Vec<String> = requested
            .filter(|name| !existing.contains(name))
            .map(ToString::to_string)
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(FieldSelectionError::UnknownFields {
                names: unknown,
                serializer: self.name().to_string(),
            })
        }
    }
}

/// Rebuild a composite descriptor around a nested definition reduced to
/// `sub_names`. Terminal descriptors are returned unchanged; sub-selection on
/// a scalar field has nothing to recurse into.
fn rebuild_composite(
    descriptor: FieldDescriptor,
    sub_names: &[String],
) -> Result<FieldDescriptor, FieldSelectionError> {
    match descriptor {
        FieldDescriptor::Nested(nested) => Ok(FieldDescriptor::Nested(NestedField {
            schema: nested.schema.include_fields(sub_names)?,
            ..nested
        })),
        FieldDescriptor::Relation(relation) => Ok(FieldDescriptor::Relation(RelationField {
            schema: relation.schema.include_fields(sub_names)?,
            ..relation
        })),
        terminal @ FieldDescriptor::Terminal(_) => Ok(terminal),
    }
}
