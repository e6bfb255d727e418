//! Attribute flattening
//!
//! Walks the properties of one JSON object and turns each value into an
//! attribute, collecting every embedded thing into a flat id-keyed map
//! along the way.

use serde_json::{Map, Value};
use tracing::debug;

use crate::context::Context;
use crate::model::{AttributeValue, Attributes, Relation};
use crate::parser::parse_thing;
use crate::things::FlattenedThings;
use crate::vocab::{is_metadata_key, ID};

/// Attributes and things accumulated across the keys of one object
#[derive(Debug, Default)]
pub struct Folded {
    pub attributes: Attributes,
    pub things: FlattenedThings,
}

impl Folded {
    pub fn into_parts(self) -> (Attributes, FlattenedThings) {
        (self.attributes, self.things)
    }
}

/// Iterate an object's properties, skipping `@id`, `@context` and `@type`
pub fn exclude_metadata_keys(json: &Map<String, Value>) -> impl Iterator<Item = (&str, &Value)> {
    json.iter()
        .filter(|(key, _)| !is_metadata_key(key))
        .map(|(key, value)| (key.as_str(), value))
}

/// Flatten the non-metadata properties of an object
///
/// Returns the object's attributes and every thing embedded beneath it.
pub fn parse_attributes(
    json: &Map<String, Value>,
    context: &Context,
) -> (Attributes, FlattenedThings) {
    let mut folded = Folded::default();

    for (key, value) in exclude_metadata_keys(json) {
        classify_and_fold(context, &mut folded, key, value);
    }

    folded.into_parts()
}

/// Classify one property value and fold it into the accumulator
///
/// Checked in order: object, array of objects (an empty array counts as
/// one), identifier-typed property, plain literal.
pub fn classify_and_fold(context: &Context, folded: &mut Folded, key: &str, value: &Value) {
    if let Value::Object(obj) = value {
        fold_object(context, folded, key, obj);
    } else if let Some(items) = value.as_array().and_then(|arr| object_array(arr)) {
        fold_object_array(context, folded, key, &items);
    } else if context.is_identifier_typed(key) {
        let id = value.as_str().unwrap_or_default();
        debug!(key, id, "identifier-typed literal recorded as placeholder");
        folded.things.insert_placeholder(id);
        folded
            .attributes
            .insert(key.to_string(), AttributeValue::Relation(Relation::reference(id)));
    } else {
        folded
            .attributes
            .insert(key.to_string(), AttributeValue::Scalar(value.clone()));
    }
}

/// View an array as a list of objects
///
/// `None` if any element is not an object; an empty array is an empty list.
pub(crate) fn object_array(items: &[Value]) -> Option<Vec<&Map<String, Value>>> {
    items.iter().map(Value::as_object).collect()
}

/// An array holds embedded things if its first element carries `@id`
///
/// Only the first element is inspected; the result applies to the whole
/// array.
pub fn is_embedded_thing_array(items: &[&Map<String, Value>]) -> bool {
    items.first().is_some_and(|first| first.contains_key(ID))
}

fn fold_object(context: &Context, folded: &mut Folded, key: &str, obj: &Map<String, Value>) {
    if obj.contains_key(ID) {
        let (thing, embedded) = parse_thing(obj, Some(context));

        folded.things.merge_keep_existing(embedded);
        folded.things.insert_thing(thing.clone());
        folded.attributes.insert(
            key.to_string(),
            AttributeValue::Relation(Relation::embedded(thing)),
        );
    } else {
        let (attributes, things) = parse_attributes(obj, context);

        folded
            .attributes
            .insert(key.to_string(), AttributeValue::Nested(attributes));
        folded.things.merge_keep_existing(things);
    }
}

fn fold_object_array(
    context: &Context,
    folded: &mut Folded,
    key: &str,
    items: &[&Map<String, Value>],
) {
    if is_embedded_thing_array(items) {
        debug!(key, len = items.len(), "array of embedded things");

        // Elements are parsed without the enclosing context.
        let parsed: Vec<_> = items.iter().map(|item| parse_thing(item, None)).collect();

        let mut relations = Vec::with_capacity(parsed.len());
        let mut resolved = Vec::with_capacity(parsed.len());
        for (thing, embedded) in parsed {
            folded.things.merge_replace(embedded);
            relations.push(Relation::embedded(thing.clone()));
            resolved.push(thing);
        }
        for thing in resolved {
            folded.things.insert_thing(thing);
        }

        folded
            .attributes
            .insert(key.to_string(), AttributeValue::Relations(relations));
    } else {
        debug!(key, len = items.len(), "array of nested attribute groups");

        let mut list = Vec::with_capacity(items.len());
        for item in items {
            let (attributes, things) = parse_attributes(item, context);
            list.push(attributes);
            folded.things.merge_replace(things);
        }

        folded
            .attributes
            .insert(key.to_string(), AttributeValue::NestedList(list));
    }
}
