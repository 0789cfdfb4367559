//! field-selection - Dynamic include/exclude field selection for API
//! response serializers.
//!
//! A serializer definition is a named, ordered set of field descriptors.
//! This crate narrows or widens the set of fields such a definition emits,
//! driven either by declarative calls (`include_fields`, `exclude_fields`)
//! or by per-request query parameters on GET requests, with one level of
//! nested sub-field selection via the `{...}` selector grammar.
//!
//! # Architecture
//!
//! ```text
//! "a,b{x;y},c" ──► selector::parse_selectors ──► ParsedSelectors
//!                                                    │
//! SerializerDef ──► include_fields / exclude_fields ◄┘
//!                       │ (copy-on-write reduction,
//!                       │  one-level composite recursion)
//!                       ▼
//!                 SerializerDef' ──► bind[_with_request] ──► BoundSerializer
//!                                                                │
//!                       query params (GET only, flat names) ─────┤
//!                                                                ▼
//!                                                      serialized Value
//! ```
//!
//! Reductions are pure: the base definition and every previously produced
//! reduction stay untouched, so definitions built once per process can be
//! shared across concurrent request handlers.
//!
//! # Example
//!
//! ```
//! use field_selection::{FieldDescriptor, SerializerDef};
//! use serde_json::json;
//!
//! let author = SerializerDef::new("AuthorSerializer")
//!     .with_field("id", FieldDescriptor::terminal())
//!     .with_field("name", FieldDescriptor::terminal());
//!
//! let article = SerializerDef::new("ArticleSerializer")
//!     .with_field("title", FieldDescriptor::terminal())
//!     .with_field("author", FieldDescriptor::nested(author));
//!
//! let reduced = article.include_fields(["title", "author{name}"]).unwrap();
//! let out = reduced.bind().serialize(&json!({
//!     "title": "On Fields",
//!     "author": {"id": 7, "name": "Ada"}
//! }));
//! assert_eq!(out, json!({"title": "On Fields", "author": {"name": "Ada"}}));
//! ```

mod error;
mod filter;
mod render;
mod request;
mod schema;
mod selector;

// Re-exports
pub use error::FieldSelectionError;
pub use render::BoundSerializer;
pub use request::{QueryRequest, RequestContext};
pub use schema::{
    FieldConfig, FieldDescriptor, Meta, MetaFields, NestedField, RelationConfig, RelationField,
    SerializerDef, ALL_FIELDS,
};
pub use selector::{parse_selector_list, parse_selectors, ParsedSelectors};
