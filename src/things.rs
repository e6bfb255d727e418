//! The flattened-things map
//!
//! Id-keyed store of every thing discovered while flattening a document.
//! Bare identifier references whose target was not embedded are kept as
//! `None` placeholders so a caller can resolve them once every document
//! has been parsed.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::model::{Relation, Thing};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FlattenedThings {
    entries: BTreeMap<String, Option<Thing>>,
}

impl FlattenedThings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a thing under its id, replacing any previous entry
    pub fn insert_thing(&mut self, thing: Thing) {
        self.entries.insert(thing.id.clone(), Some(thing));
    }

    /// Record an unresolved reference, replacing any previous entry
    ///
    /// This also replaces an already resolved thing with `None`.
    pub fn insert_placeholder(&mut self, id: impl Into<String>) {
        let id = id.into();
        if let Some(Some(_)) = self.entries.get(&id) {
            debug!(id = %id, "placeholder replaces resolved thing");
        }
        self.entries.insert(id, None);
    }

    /// Merge another map in; entries already present win on collision
    pub fn merge_keep_existing(&mut self, other: FlattenedThings) {
        for (id, entry) in other.entries {
            self.entries.entry(id).or_insert(entry);
        }
    }

    /// Merge another map in; incoming entries win on collision
    pub fn merge_replace(&mut self, other: FlattenedThings) {
        for (id, entry) in other.entries {
            if self.entries.insert(id.clone(), entry).is_some() {
                debug!(id = %id, "flattened entry replaced");
            }
        }
    }

    /// The entry for an id: `Some(None)` is a placeholder
    pub fn get(&self, id: &str) -> Option<Option<&Thing>> {
        self.entries.get(id).map(Option::as_ref)
    }

    /// The resolved thing for an id, if any
    pub fn thing(&self, id: &str) -> Option<&Thing> {
        self.entries.get(id).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Thing>)> {
        self.entries
            .iter()
            .map(|(id, entry)| (id.as_str(), entry.as_ref()))
    }

    /// Ids still mapped to a placeholder
    pub fn unresolved_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_none())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Resolve a relation: its embedded thing, otherwise a lookup by id
    pub fn resolve<'a>(&'a self, relation: &'a Relation) -> Option<&'a Thing> {
        relation
            .thing
            .as_deref()
            .or_else(|| self.thing(&relation.id))
    }
}

impl IntoIterator for FlattenedThings {
    type Item = (String, Option<Thing>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Option<Thing>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thing(id: &str, types: &[&str]) -> Thing {
        Thing {
            id: id.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_keep_existing() {
        let mut a = FlattenedThings::new();
        a.insert_thing(thing("x", &["Old"]));

        let mut b = FlattenedThings::new();
        b.insert_thing(thing("x", &["New"]));
        b.insert_thing(thing("y", &[]));

        a.merge_keep_existing(b);

        assert_eq!(a.len(), 2);
        assert!(a.thing("x").unwrap().has_type("Old"));
        assert!(a.contains("y"));
    }

    #[test]
    fn test_merge_replace() {
        let mut a = FlattenedThings::new();
        a.insert_thing(thing("x", &["Old"]));

        let mut b = FlattenedThings::new();
        b.insert_thing(thing("x", &["New"]));

        a.merge_replace(b);

        assert!(a.thing("x").unwrap().has_type("New"));
    }

    #[test]
    fn test_placeholder_overwrites_thing() {
        let mut things = FlattenedThings::new();
        things.insert_thing(thing("x", &[]));
        things.insert_placeholder("x");

        assert_eq!(things.get("x"), Some(None));
        assert_eq!(things.unresolved_ids(), vec!["x"]);
    }

    #[test]
    fn test_resolve_relation() {
        let mut things = FlattenedThings::new();
        things.insert_thing(thing("https://ex/alice", &["Person"]));
        things.insert_placeholder("https://ex/bob");

        let alice = Relation::reference("https://ex/alice");
        let bob = Relation::reference("https://ex/bob");
        let carol = Relation::embedded(thing("https://ex/carol", &[]));

        assert!(things.resolve(&alice).unwrap().has_type("Person"));
        assert!(things.resolve(&bob).is_none());
        assert_eq!(things.resolve(&carol).unwrap().id, "https://ex/carol");
    }

    #[test]
    fn test_serializes_placeholders_as_null() {
        let mut things = FlattenedThings::new();
        things.insert_placeholder("a");
        let json = serde_json::to_value(&things).unwrap();
        assert_eq!(json, serde_json::json!({"a": null}));
    }
}
