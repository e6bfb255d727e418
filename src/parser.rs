//! Thing construction from JSON-LD nodes
//!
//! Entry point of the crate: [`parse_thing`] turns one JSON object into a
//! [`Thing`] plus the flat map of every thing embedded beneath it. Parsing
//! never fails; missing or mistyped fields fall back to empty defaults.

use serde_json::{Map, Value};
use tracing::trace;

use crate::context::{resolve, Context};
use crate::flatten::{object_array, parse_attributes};
use crate::model::{Operation, Operations, Thing};
use crate::things::FlattenedThings;
use crate::vocab::{CONTEXT, EXPECTS, ID, METHOD, OPERATION, TARGET, TYPE};

/// Parse a JSON object into a thing and its flattened embedded things
///
/// `parent` is the resolved context of the enclosing node, if any; only
/// its vocabulary is inherited.
pub fn parse_thing(
    json: &Map<String, Value>,
    parent: Option<&Context>,
) -> (Thing, FlattenedThings) {
    let id = string_field(json, ID);
    let types = normalize_type(json.get(TYPE));
    let own = Context::from_value(json.get(CONTEXT));
    let context = resolve(Some(&own), parent);

    let operations = parse_operations(json);
    let (attributes, things) = parse_attributes(json, &context);

    trace!(
        id = %id,
        attributes = attributes.len(),
        operations = operations.len(),
        embedded = things.len(),
        "parsed thing"
    );

    let thing = Thing {
        id,
        types,
        attributes,
        operations,
    };

    (thing, things)
}

/// Parse any JSON value; anything but an object yields an empty thing
pub fn parse_value(json: &Value, parent: Option<&Context>) -> (Thing, FlattenedThings) {
    match json {
        Value::Object(obj) => parse_thing(obj, parent),
        _ => (Thing::default(), FlattenedThings::new()),
    }
}

/// Normalize an `@type` value to a list of type names
///
/// A string becomes a one-element list, an array of strings is kept, and
/// any other shape (including an array with a non-string) is empty.
pub fn normalize_type(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(t)) => vec![t.clone()],
        Some(Value::Array(arr)) => arr
            .iter()
            .map(|v| v.as_str().map(String::from))
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default(),
        _ => vec![],
    }
}

/// Parse the Hydra `operation` array of a node
///
/// Operations sharing an id collapse to the last one.
pub fn parse_operations(json: &Map<String, Value>) -> Operations {
    let entries = json
        .get(OPERATION)
        .and_then(Value::as_array)
        .and_then(|arr| object_array(arr))
        .unwrap_or_default();

    entries
        .into_iter()
        .map(parse_operation)
        .map(|operation| (operation.id.clone(), operation))
        .collect()
}

fn parse_operation(json: &Map<String, Value>) -> Operation {
    Operation {
        id: string_field(json, ID),
        target: string_field(json, TARGET),
        method: string_field(json, METHOD),
        expects: string_field(json, EXPECTS),
        types: string_list(json.get(TYPE)),
    }
}

/// Operation types are only read from an array of strings
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(_)) => normalize_type(value),
        _ => vec![],
    }
}

fn string_field(json: &Map<String, Value>, key: &str) -> String {
    json.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
