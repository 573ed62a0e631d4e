//! The storage factory trait

use tracing::trace;

use crate::error::NodusResult;
use crate::graph::{LangString, Literal, Node, NodeReference, Object};
use crate::vocab;

/// A factory for linked-data values.
///
/// The constructors validate their arguments the same way the model types
/// do; the trait exists so that code can be written against a storage
/// handle without caring which backend produced its values. All methods
/// have default implementations delegating to the model constructors, so a
/// backend only overrides what it needs to intercept.
pub trait Storage {
    /// Creates an empty anonymous node.
    fn create_node(&self) -> Node {
        Node::new()
    }

    /// Creates an anonymous node with the given nominal type.
    fn create_node_with_type(&self, type_id: &str) -> NodusResult<Node> {
        Node::with_type(type_id)
    }

    /// Creates an empty named node. The identifier must be a non-empty
    /// absolute, scheme-prefixed reference.
    fn create_named_node(&self, identifier: &str) -> NodusResult<Node> {
        Node::named(identifier)
    }

    /// Creates a named node with the given nominal type.
    fn create_named_node_with_type(&self, identifier: &str, type_id: &str) -> NodusResult<Node> {
        Node::named_with_type(identifier, type_id)
    }

    /// Creates a reference to the node identified by the given IRI.
    fn create_node_reference(&self, identifier: &str) -> NodusResult<NodeReference> {
        NodeReference::new(identifier)
    }

    /// Creates a literal with the given datatype, defaulting to the plain
    /// literal when the datatype is `None` or empty.
    fn create_literal(&self, value: &str, datatype: Option<&str>) -> NodusResult<Literal> {
        Literal::new(value, datatype)
    }

    /// Creates a language-tagged string.
    fn create_lang_string(&self, value: &str, lang: &str) -> NodusResult<LangString> {
        LangString::new(value, lang)
    }

    /// Convenience dispatcher for leaf values: a non-empty language tag
    /// yields a lang string, an absolute reference value a node reference,
    /// anything else a plain literal.
    fn create_leaf(&self, value: &str, lang: &str) -> Object {
        trace!(value, lang, "dispatching leaf");
        leaf_object(value, lang)
    }
}

/// The [`Storage::create_leaf`] dispatch, shared with `Node::put_str`.
/// Infallible: every input falls into one of the three leaf kinds.
pub(crate) fn leaf_object(value: &str, lang: &str) -> Object {
    if !lang.is_empty() {
        LangString::new(value, lang)
            .map(Object::LangString)
            .unwrap_or_else(|_| Object::Literal(Literal::plain(value)))
    } else if vocab::is_absolute_iri(value) {
        NodeReference::new(value)
            .map(Object::Reference)
            .unwrap_or_else(|_| Object::Literal(Literal::plain(value)))
    } else {
        Object::Literal(Literal::plain(value))
    }
}
