//! Vocabulary definitions for JSON-LD flattening
//!
//! Keywords and Hydra property names the parser reads from a node.

/// Node identifier keyword
pub const ID: &str = "@id";

/// Node type keyword
pub const TYPE: &str = "@type";

/// Local context keyword
pub const CONTEXT: &str = "@context";

/// Default vocabulary keyword inside a context frame
pub const VOCAB: &str = "@vocab";

/// Keys that never become attributes
pub const METADATA_KEYS: [&str; 3] = [ID, CONTEXT, TYPE];

/// Hydra property holding the operations of a resource
pub const OPERATION: &str = "operation";

/// Hydra operation HTTP method
pub const METHOD: &str = "method";

/// Hydra operation target IRI
pub const TARGET: &str = "target";

/// Hydra operation expected input class
pub const EXPECTS: &str = "expects";

/// Check if a key is one of the reserved metadata keys
pub fn is_metadata_key(key: &str) -> bool {
    METADATA_KEYS.contains(&key)
}
