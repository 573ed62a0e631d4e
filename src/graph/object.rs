//! The closed set of linked-data values

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::matching;
use crate::graph::{LangString, Literal, Node, NodeReference};
use crate::vocab::rdf;

/// Any value that can stand at the object position of a relation.
///
/// Identity is structural throughout: two objects built from equal
/// constructor arguments compare equal and hash equally no matter which
/// factory produced them.
///
/// Three capability classifications cut across the variants:
///
/// - *node kind* ([`is_node_kind`](Self::is_node_kind)): nodes, named nodes
///   and node references, the things that occupy the node position;
/// - *identifiable* ([`identifier`](Self::identifier)): named nodes and node
///   references, which carry a stable identifier;
/// - *accessible* ([`as_accessible`](Self::as_accessible)): nodes and named
///   nodes, which have queryable relations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Object {
    /// A node, anonymous or named, storing its own relations
    Node(Node),
    /// A pointer to a node described elsewhere
    Reference(NodeReference),
    /// A typed or plain literal
    Literal(Literal),
    /// A language-tagged string
    LangString(LangString),
}

impl Object {
    /// Whether this value occupies the node position structurally (a node,
    /// named node or node reference, as opposed to a literal).
    pub fn is_node_kind(&self) -> bool {
        matches!(self, Object::Node(_) | Object::Reference(_))
    }

    /// The stable identifier, for named nodes and node references.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Object::Node(node) => node.identifier(),
            Object::Reference(reference) => Some(reference.identifier()),
            Object::Literal(_) | Object::LangString(_) => None,
        }
    }

    /// The node behind this value, if it has queryable relations.
    pub fn as_accessible(&self) -> Option<&Node> {
        match self {
            Object::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The lexical value, for literals and language-tagged strings.
    pub fn leaf_value(&self) -> Option<&str> {
        match self {
            Object::Literal(literal) => Some(literal.value()),
            Object::LangString(lang_string) => Some(lang_string.value()),
            _ => None,
        }
    }

    /// The plain-string reduction of this value: the lexical value of a
    /// literal or the identifier of a node reference.
    pub fn leaf(&self) -> Option<&str> {
        match self {
            Object::Reference(reference) => Some(reference.identifier()),
            _ => self.leaf_value(),
        }
    }

    /// The type of this value: the datatype identifier for literals and
    /// language-tagged strings, or the single `rdf:type` value of a node.
    ///
    /// # Panics
    ///
    /// Panics if called on a node with zero or several types, or on a node
    /// reference, which carries no type of its own. Use
    /// [`has_type`](Self::has_type) for a non-failing membership test.
    pub fn type_identifier(&self) -> &str {
        match self {
            Object::Literal(literal) => literal.datatype(),
            Object::LangString(_) => rdf::LANG_STRING,
            Object::Node(node) => node.type_identifier(),
            Object::Reference(_) => panic!("empty result: a node reference carries no type"),
        }
    }

    /// Whether this value has the given type: datatype equality for
    /// literals, type-relation membership for nodes. Never fails, and does
    /// not require the type to be unique.
    pub fn has_type(&self, type_id: &str) -> bool {
        match self {
            Object::Literal(literal) => literal.datatype() == type_id,
            Object::LangString(_) => type_id == rdf::LANG_STRING,
            Object::Node(node) => node.has_type(type_id),
            Object::Reference(_) => false,
        }
    }

    /// Structural subsumption check: whether this value satisfies
    /// everything the pattern states. See the `matching` module.
    pub fn matches(&self, pattern: &Object) -> bool {
        matching::matches(self, pattern)
    }
}

impl From<Node> for Object {
    fn from(node: Node) -> Self {
        Object::Node(node)
    }
}

impl From<NodeReference> for Object {
    fn from(reference: NodeReference) -> Self {
        Object::Reference(reference)
    }
}

impl From<Literal> for Object {
    fn from(literal: Literal) -> Self {
        Object::Literal(literal)
    }
}

impl From<LangString> for Object {
    fn from(lang_string: LangString) -> Self {
        Object::LangString(lang_string)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Node(node) => fmt::Display::fmt(node, f),
            Object::Reference(reference) => fmt::Display::fmt(reference, f),
            Object::Literal(literal) => fmt::Display::fmt(literal, f),
            Object::LangString(lang_string) => fmt::Display::fmt(lang_string, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(iri: &str) -> Object {
        Object::Reference(NodeReference::new(iri).unwrap())
    }

    #[test]
    fn test_capability_classifications() {
        let node = Object::Node(Node::new());
        let named = Object::Node(Node::named("http://example.com/a").unwrap());
        let leaf = Object::Literal(Literal::plain("x"));
        let tagged = Object::LangString(LangString::new("x", "en").unwrap());
        let pointer = reference("http://example.com/b");

        assert!(node.is_node_kind());
        assert!(named.is_node_kind());
        assert!(pointer.is_node_kind());
        assert!(!leaf.is_node_kind());
        assert!(!tagged.is_node_kind());

        assert_eq!(node.identifier(), None);
        assert_eq!(named.identifier(), Some("http://example.com/a"));
        assert_eq!(pointer.identifier(), Some("http://example.com/b"));
        assert_eq!(leaf.identifier(), None);

        assert!(node.as_accessible().is_some());
        assert!(named.as_accessible().is_some());
        assert!(pointer.as_accessible().is_none());
        assert!(leaf.as_accessible().is_none());
    }

    #[test]
    fn test_leaf_reduction() {
        assert_eq!(Object::Literal(Literal::plain("text")).leaf(), Some("text"));
        assert_eq!(
            reference("http://example.com/x").leaf(),
            Some("http://example.com/x")
        );
        assert_eq!(Object::Node(Node::new()).leaf(), None);
    }

    #[test]
    fn test_type_identifier_of_literals() {
        let leaf = Object::Literal(Literal::plain("x"));
        assert_eq!(leaf.type_identifier(), rdf::PLAIN_LITERAL);
        let tagged = Object::LangString(LangString::new("x", "en").unwrap());
        assert_eq!(tagged.type_identifier(), rdf::LANG_STRING);
    }

    #[test]
    #[should_panic(expected = "empty result")]
    fn test_type_identifier_of_untyped_node_panics() {
        let node = Object::Node(Node::new());
        node.type_identifier();
    }
}
