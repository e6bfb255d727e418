//! Context resolution for JSON-LD nodes
//!
//! A node's context is used for two things only: the default vocabulary
//! and detecting which properties are identifier-typed (`"@type": "@id"`).

use serde::Serialize;
use serde_json::{json, Value};

use crate::vocab::{ID, TYPE, VOCAB};

/// Ordered context frames; the first matching frame takes precedence
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Context {
    frames: Vec<Value>,
}

impl Context {
    pub fn new(frames: Vec<Value>) -> Self {
        Self { frames }
    }

    /// Build a context from a node's `@context` value
    ///
    /// An array gives one frame per element, a single object is a
    /// one-frame context. Remote (string) contexts are not dereferenced
    /// and, like any other shape, yield an empty context.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(frames)) => Self::new(frames.clone()),
            Some(frame @ Value::Object(_)) => Self::new(vec![frame.clone()]),
            _ => Self::default(),
        }
    }

    pub fn frames(&self) -> &[Value] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True if any frame declares `@vocab`
    pub fn has_vocabulary(&self) -> bool {
        self.vocabulary_frame().is_some()
    }

    /// The `@vocab` of the first frame declaring one
    ///
    /// A declared vocabulary that is not a string yields `None`.
    pub fn vocabulary(&self) -> Option<&str> {
        self.vocabulary_frame()
            .and_then(|frame| frame.get(VOCAB))
            .and_then(Value::as_str)
    }

    /// Check if a property is declared with `"@type": "@id"`
    pub fn is_identifier_typed(&self, property: &str) -> bool {
        self.frames.iter().any(|frame| {
            frame
                .get(property)
                .and_then(|definition| definition.get(TYPE))
                .and_then(Value::as_str)
                == Some(ID)
        })
    }

    fn vocabulary_frame(&self) -> Option<&Value> {
        self.frames
            .iter()
            .find(|frame| frame.as_object().is_some_and(|obj| obj.contains_key(VOCAB)))
    }
}

/// Combine a node's own context with the one inherited from its parent
///
/// Only the parent's vocabulary is inherited, appended as the last frame,
/// and only when the node declares no vocabulary of its own.
pub fn resolve(context: Option<&Context>, parent: Option<&Context>) -> Context {
    match (context, parent) {
        (Some(context), Some(parent)) => {
            if !context.has_vocabulary() && parent.has_vocabulary() {
                let mut frames = context.frames.clone();
                frames.push(json!({ VOCAB: parent.vocabulary().unwrap_or_default() }));
                Context::new(frames)
            } else {
                context.clone()
            }
        }
        (Some(context), None) => context.clone(),
        (None, Some(parent)) => parent.clone(),
        (None, None) => Context::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(value: Value) -> Context {
        Context::from_value(Some(&value))
    }

    #[test]
    fn test_inherits_parent_vocabulary() {
        let parent = ctx(json!([{"@vocab": "V"}]));
        let child = ctx(json!([]));

        let resolved = resolve(Some(&child), Some(&parent));
        assert_eq!(resolved, ctx(json!([{"@vocab": "V"}])));
    }

    #[test]
    fn test_child_vocabulary_wins() {
        let parent = ctx(json!([{"@vocab": "V"}]));
        let child = ctx(json!([{"@vocab": "C"}]));

        let resolved = resolve(Some(&child), Some(&parent));
        assert_eq!(resolved, ctx(json!([{"@vocab": "C"}])));
    }

    #[test]
    fn test_parent_vocabulary_appended_last() {
        let parent = ctx(json!([{"@vocab": "V"}, {"knows": {"@type": "@id"}}]));
        let child = ctx(json!([{"member": {"@type": "@id"}}]));

        let resolved = resolve(Some(&child), Some(&parent));
        assert_eq!(
            resolved,
            ctx(json!([{"member": {"@type": "@id"}}, {"@vocab": "V"}]))
        );
        // Term definitions are not inherited
        assert!(!resolved.is_identifier_typed("knows"));
        assert!(resolved.is_identifier_typed("member"));
    }

    #[test]
    fn test_resolve_absent_sides() {
        let parent = ctx(json!([{"@vocab": "V"}]));
        assert_eq!(resolve(None, Some(&parent)), parent);
        assert_eq!(resolve(Some(&parent), None), parent);
        assert!(resolve(None, None).is_empty());
    }

    #[test]
    fn test_parent_without_vocabulary() {
        let parent = ctx(json!([{"knows": {"@type": "@id"}}]));
        let child = ctx(json!([]));
        assert!(resolve(Some(&child), Some(&parent)).is_empty());
    }

    #[test]
    fn test_vocabulary() {
        let context = ctx(json!([{"name": "schema:name"}, {"@vocab": "https://schema.org/"}]));
        assert!(context.has_vocabulary());
        assert_eq!(context.vocabulary(), Some("https://schema.org/"));

        assert!(!ctx(json!([])).has_vocabulary());
        assert_eq!(ctx(json!([])).vocabulary(), None);
    }

    #[test]
    fn test_non_string_vocabulary_degrades() {
        let context = ctx(json!([{"@vocab": 42}]));
        assert!(context.has_vocabulary());
        assert_eq!(context.vocabulary(), None);

        let resolved = resolve(Some(&ctx(json!([]))), Some(&context));
        assert_eq!(resolved, ctx(json!([{"@vocab": ""}])));
    }

    #[test]
    fn test_is_identifier_typed() {
        let context = ctx(json!([{"knows": {"@type": "@id"}, "age": {"@type": "xsd:integer"}}]));
        assert!(context.is_identifier_typed("knows"));
        assert!(!context.is_identifier_typed("age"));
        assert!(!context.is_identifier_typed("name"));
    }

    #[test]
    fn test_from_value_shapes() {
        let single = ctx(json!({"@vocab": "V"}));
        assert_eq!(single.frames().len(), 1);

        assert!(ctx(json!("http://www.w3.org/ns/hydra/context.jsonld")).is_empty());
        assert!(Context::from_value(None).is_empty());
    }
}
