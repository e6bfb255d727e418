//! Document loading and output rendering
//!
//! Decodes JSON-LD text, runs the parser over the root object, and renders
//! the result back to JSON.

use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::FlattenError;
use crate::model::{Operations, Thing};
use crate::parser::parse_thing;
use crate::things::FlattenedThings;

/// A parsed document: its root thing and every thing embedded in it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDocument {
    pub thing: Thing,
    pub things: FlattenedThings,
}

/// Options for rendering output
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl ParsedDocument {
    /// Render as `{"thing": ..., "things": {...}}`
    pub fn to_json(&self) -> Value {
        json!({
            "thing": self.thing,
            "things": self.things,
        })
    }

    /// Ids referenced in the document that were never embedded
    pub fn unresolved_ids(&self) -> Vec<&str> {
        self.things.unresolved_ids()
    }

    pub fn operations(&self) -> &Operations {
        &self.thing.operations
    }
}

/// Parse JSON-LD text into a document
///
/// `source` names the input in error messages.
pub fn parse_document(content: &str, source: &str) -> Result<ParsedDocument, FlattenError> {
    let value: Value = serde_json::from_str(content)?;

    let root = value.as_object().ok_or_else(|| {
        FlattenError::InvalidStructure(format!("{}: root must be a JSON object", source))
    })?;

    let (thing, things) = parse_thing(root, None);
    debug!(
        source,
        id = %thing.id,
        things = things.len(),
        unresolved = things.unresolved_ids().len(),
        "document flattened"
    );

    Ok(ParsedDocument { thing, things })
}

/// Read and parse a JSON-LD document from a file
pub fn load_document(path: &Path) -> Result<ParsedDocument, FlattenError> {
    if !path.is_file() {
        return Err(FlattenError::InvalidPath(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| FlattenError::LoadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse_document(&content, &path.display().to_string())
}

/// Serialize a value to a JSON string
pub fn to_json_string<T: Serialize>(
    value: &T,
    options: &OutputOptions,
) -> Result<String, FlattenError> {
    if options.pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "@context": [{"@vocab": "https://schema.org/"}, {"author": {"@type": "@id"}}],
        "@id": "https://ex/blog-postings",
        "@type": "Collection",
        "author": "https://ex/people/7",
        "member": [{"@id": "https://ex/blog-postings/1", "headline": "Hello"}],
        "operation": [{"@id": "create", "method": "POST", "target": "https://ex/blog-postings"}]
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = parse_document(COLLECTION, "collection.json").unwrap();

        assert_eq!(doc.thing.id, "https://ex/blog-postings");
        assert_eq!(doc.operations()["create"].method, "POST");
        assert_eq!(doc.unresolved_ids(), vec!["https://ex/people/7"]);
        assert!(doc.things.thing("https://ex/blog-postings/1").is_some());
    }

    #[test]
    fn test_parse_document_rejects_non_object_root() {
        let err = parse_document("[1, 2]", "list.json").unwrap_err();
        assert!(matches!(err, FlattenError::InvalidStructure(_)));
    }

    #[test]
    fn test_parse_document_rejects_bad_json() {
        let err = parse_document("{not json", "broken.json").unwrap_err();
        assert!(matches!(err, FlattenError::Json(_)));
    }

    #[test]
    fn test_load_document_missing_file() {
        let err = load_document(Path::new("/nonexistent/doc.jsonld")).unwrap_err();
        assert!(matches!(err, FlattenError::InvalidPath(_)));
    }

    #[test]
    fn test_to_json() {
        let doc = parse_document(COLLECTION, "collection.json").unwrap();
        let json = doc.to_json();

        assert_eq!(json["thing"]["id"], "https://ex/blog-postings");
        assert_eq!(json["things"]["https://ex/people/7"], Value::Null);
        assert_eq!(
            json["thing"]["attributes"]["author"],
            json!({"kind": "relation", "value": {"id": "https://ex/people/7", "thing": null}})
        );
    }

    #[test]
    fn test_to_json_string_pretty() {
        let doc = parse_document(r#"{"name": "x"}"#, "inline").unwrap();

        let compact = to_json_string(&doc.to_json(), &OutputOptions::default()).unwrap();
        let pretty = to_json_string(&doc.to_json(), &OutputOptions { pretty: true }).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
    }
}
