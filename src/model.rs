//! Flattened entity model
//!
//! The output shapes of a parse: things, the relations between them,
//! their Hydra operations, and the attribute values they carry.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Property name to attribute value
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Operation id to operation
pub type Operations = BTreeMap<String, Operation>;

/// A flattened JSON-LD node
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Thing {
    /// The node's @id (empty when the node has none)
    pub id: String,
    /// The node's @type values, in document order
    pub types: Vec<String>,
    /// Non-metadata properties
    pub attributes: Attributes,
    /// Hydra operations keyed by operation id
    pub operations: Operations,
}

impl Thing {
    /// Look up an attribute by property name
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Check if the thing declares a specific @type
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    /// Look up an operation by its id
    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.operations.get(id)
    }

    /// A thing without an @id (typically a root document missing one)
    pub fn is_anonymous(&self) -> bool {
        self.id.is_empty()
    }
}

/// An id-based reference to another thing
///
/// `thing` is present when the referenced node was embedded in the same
/// document, and absent for bare identifier-typed literals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relation {
    pub id: String,
    pub thing: Option<Box<Thing>>,
}

impl Relation {
    /// A bare reference that must be resolved elsewhere
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thing: None,
        }
    }

    /// A reference carrying its embedded thing; the id is taken from it
    pub fn embedded(thing: Thing) -> Self {
        Self {
            id: thing.id.clone(),
            thing: Some(Box::new(thing)),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.thing.is_some()
    }
}

/// A Hydra operation attached to a thing
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Operation {
    pub id: String,
    pub target: String,
    pub method: String,
    pub expects: String,
    pub types: Vec<String>,
}

/// The value stored under an attribute name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    /// A literal carried verbatim from the document
    Scalar(Value),
    /// A nested object without @id, flattened but kept nested
    Nested(Attributes),
    /// A reference to a single thing
    Relation(Relation),
    /// An array of embedded things
    Relations(Vec<Relation>),
    /// An array of nested objects without @id
    NestedList(Vec<Attributes>),
}

impl AttributeValue {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            AttributeValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Value::as_str)
    }

    pub fn as_nested(&self) -> Option<&Attributes> {
        match self {
            AttributeValue::Nested(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            AttributeValue::Relation(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_relations(&self) -> Option<&[Relation]> {
        match self {
            AttributeValue::Relations(rs) => Some(rs),
            _ => None,
        }
    }

    pub fn as_nested_list(&self) -> Option<&[Attributes]> {
        match self {
            AttributeValue::NestedList(list) => Some(list),
            _ => None,
        }
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        AttributeValue::Scalar(value)
    }
}
