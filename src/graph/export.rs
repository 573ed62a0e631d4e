//! JSON materialization of value subtrees
//!
//! The single point of contact with an external document representation:
//! a value subtree is walked recursively over its (relation, value) pairs
//! and rendered in a JSON-LD-flavored shape. RDF syntax serialization
//! proper stays outside the core.

use serde_json::{json, Map, Value};

use crate::graph::{Node, Object};
use crate::vocab::rdf;

impl Object {
    /// Materializes this value subtree into a JSON value.
    ///
    /// Plain literals become bare strings, typed literals `@value`/`@type`
    /// objects, lang strings `@value`/`@language` objects, node references
    /// `@id` objects and nodes full objects keyed by relation.
    pub fn to_json(&self) -> Value {
        match self {
            Object::Node(node) => node.to_json(),
            Object::Reference(reference) => json!({ "@id": reference.identifier() }),
            Object::Literal(literal) if literal.datatype() == rdf::PLAIN_LITERAL => {
                Value::String(literal.value().to_string())
            }
            Object::Literal(literal) => json!({
                "@value": literal.value(),
                "@type": literal.datatype(),
            }),
            Object::LangString(lang_string) => json!({
                "@value": lang_string.value(),
                "@language": lang_string.lang(),
            }),
        }
    }
}

impl Node {
    /// Materializes this node and everything it transitively owns into a
    /// JSON object. Every relation maps to an array of rendered values;
    /// referenced nodes appear as `@id` stubs, not inlined.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(identifier) = self.identifier() {
            map.insert("@id".to_string(), Value::String(identifier.to_string()));
        }
        for (relation, values) in self.entries() {
            let rendered: Vec<Value> = values.iter().map(Object::to_json).collect();
            map.insert(relation.to_string(), Value::Array(rendered));
        }
        Value::Object(map)
    }
}
