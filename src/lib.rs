//! JSON-LD Thing Flattening Library
//!
//! This library turns nested, context-annotated JSON-LD documents (in
//! particular Hydra hypermedia responses) into a flat graph of typed
//! things connected by id-based relations.
//!
//! # Overview
//!
//! Parsing a document proceeds top-down from the root object:
//!
//! 1. Resolve the node's `@context` against the inherited parent context
//! 2. Read the node's `@id`, `@type` and Hydra `operation` entries
//! 3. Flatten every other property into an attribute, recursing into
//!    nested objects and arrays
//! 4. Collect every embedded node carrying an `@id` into a flat id-keyed
//!    map, with `None` placeholders for bare references to nodes that were
//!    not embedded
//!
//! Parsing is fail-soft: malformed input produces a partially empty
//! [`Thing`] rather than an error.
//!
//! # Usage
//!
//! ```ignore
//! use jsonld_things::parse_thing;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "@context": [{"knows": {"@type": "@id"}}],
//!     "@id": "https://example.org/alice",
//!     "knows": "https://example.org/bob"
//! });
//!
//! let (thing, things) = parse_thing(doc.as_object().unwrap(), None);
//! assert_eq!(things.unresolved_ids(), vec!["https://example.org/bob"]);
//! ```

pub mod context;
pub mod document;
pub mod error;
pub mod flatten;
pub mod model;
pub mod parser;
pub mod things;
pub mod vocab;

// Re-export main types for convenience
pub use crate::context::{resolve, Context};
pub use crate::document::{
    load_document, parse_document, to_json_string, OutputOptions, ParsedDocument,
};
pub use crate::error::FlattenError;
pub use crate::model::{AttributeValue, Attributes, Operation, Operations, Relation, Thing};
pub use crate::parser::{normalize_type, parse_operations, parse_thing, parse_value};
pub use crate::things::FlattenedThings;
