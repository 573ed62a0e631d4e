//! Query results and their typed projection accessors

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{NodusError, NodusResult};
use crate::graph::{LangString, Literal, Node, NodeReference, Object};

/// The outcome of a query: a set of distinct values.
///
/// Results are immutable snapshots, detached from the node they were
/// queried from. Besides plain iteration, a result offers one accessor
/// family per value classification (any value, node kind, identifiable
/// value, accessible object, node, named node, node reference, literal,
/// language-tagged string). Each family follows the same strict-arity
/// contract:
///
/// - the checked accessor (e.g. [`node`](Self::node)) succeeds only when
///   the result holds *exactly one* value overall and that value belongs
///   to the classification; zero hits fail with `NoLinkedData`, anything
///   else with `AmbiguousLinkedData`;
/// - the `*_expectable` form panics under the same conditions, for callers
///   asserting a structural precondition;
/// - the `*_or_else` and `*_or_else_get` forms fall back instead of
///   failing;
/// - the plural form returns *all* values of the classification, however
///   many there are;
/// - `is_any_*` and `is_unique_*` answer the arity questions directly.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    objects: BTreeSet<Object>,
}

impl QueryResult {
    /// The empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_set(objects: BTreeSet<Object>) -> Self {
        Self { objects }
    }

    /// The number of values in this result.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the result holds no value at all.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether the given value is part of this result.
    pub fn contains(&self, object: &Object) -> bool {
        self.objects.contains(object)
    }

    /// Iterates over all values, in their structural order.
    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }

    /// The lexical values of all literals and language-tagged strings in
    /// this result. Nodes and node references contribute nothing.
    pub fn strings(&self) -> BTreeSet<String> {
        self.objects
            .iter()
            .filter_map(Object::leaf_value)
            .map(str::to_string)
            .collect()
    }

    /// [`strings`](Self::strings), joined with a separator in structural
    /// order.
    pub fn strings_joined(&self, separator: &str) -> String {
        self.strings().into_iter().collect::<Vec<_>>().join(separator)
    }

    /// The plain-string reduction of every leaf in this result: lexical
    /// values of literals plus identifiers of node references.
    pub fn leaves(&self) -> BTreeSet<String> {
        self.objects
            .iter()
            .filter_map(Object::leaf)
            .map(str::to_string)
            .collect()
    }

    /// [`leaves`](Self::leaves), joined with a separator in structural
    /// order.
    pub fn leaves_joined(&self, separator: &str) -> String {
        self.leaves().into_iter().collect::<Vec<_>>().join(separator)
    }
}

impl FromIterator<Object> for QueryResult {
    fn from_iter<I: IntoIterator<Item = Object>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for QueryResult {
    type Item = Object;
    type IntoIter = std::collections::btree_set::IntoIter<Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a Object;
    type IntoIter = std::collections::btree_set::Iter<'a, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

/// Generates one accessor family over a value classification.
macro_rules! accessor_family {
    (
        $(#[$doc:meta])*
        $name:ident, $plural:ident, $expectable:ident,
        $or_else:ident, $or_else_get:ident, $is_any:ident, $is_unique:ident,
        $ty:ty, $project:expr, $what:literal
    ) => {
        impl QueryResult {
            $(#[$doc])*
            pub fn $name(&self) -> NodusResult<$ty> {
                let mut hits = self.objects.iter().filter_map($project);
                match (hits.next(), hits.next(), self.objects.len()) {
                    (None, _, _) => Err(NodusError::NoLinkedData(concat!(
                        "the result contains no ",
                        $what
                    )
                    .into())),
                    (Some(one), None, 1) => Ok(one),
                    _ => Err(NodusError::AmbiguousLinkedData(concat!(
                        "the result is not a unique ",
                        $what
                    )
                    .into())),
                }
            }

            /// Panicking form of the checked accessor; see the type-level
            /// contract.
            pub fn $expectable(&self) -> $ty {
                match self.$name() {
                    Ok(value) => value,
                    Err(NodusError::NoLinkedData(_)) => {
                        panic!(concat!("empty result: the result contains no ", $what))
                    }
                    Err(_) => panic!(concat!("ambiguous result: not a unique ", $what)),
                }
            }

            /// Falls back to the given value unless the result is the
            /// unique value of the classification.
            pub fn $or_else(&self, fallback: $ty) -> $ty {
                self.$name().unwrap_or(fallback)
            }

            /// Falls back lazily unless the result is the unique value of
            /// the classification.
            pub fn $or_else_get(&self, fallback: impl FnOnce() -> $ty) -> $ty {
                self.$name().unwrap_or_else(|_| fallback())
            }

            /// All values of the classification, however many.
            pub fn $plural(&self) -> BTreeSet<$ty> {
                self.objects.iter().filter_map($project).collect()
            }

            /// Whether at least one value of the classification is present.
            pub fn $is_any(&self) -> bool {
                self.objects.iter().filter_map($project).next().is_some()
            }

            /// Whether the result consists of exactly one value and that
            /// value belongs to the classification.
            pub fn $is_unique(&self) -> bool {
                self.objects.len() == 1 && self.$is_any()
            }
        }
    };
}

accessor_family!(
    /// The single value of this result, whatever its kind.
    value, values, value_expectable, value_or_else, value_or_else_get,
    is_any_value, is_unique_value,
    Object,
    |object: &Object| Some(object.clone()),
    "value"
);

accessor_family!(
    /// The single value of this result that occupies the node position
    /// structurally, a node, named node or node reference.
    node_kind, node_kinds, node_kind_expectable, node_kind_or_else,
    node_kind_or_else_get, is_any_node_kind, is_unique_node_kind,
    Object,
    |object: &Object| {
        if object.is_node_kind() {
            Some(object.clone())
        } else {
            None
        }
    },
    "node-kind value"
);

accessor_family!(
    /// The single accessible object of this result, a node or named node
    /// with queryable relations.
    accessible_object, accessible_objects, accessible_object_expectable,
    accessible_object_or_else, accessible_object_or_else_get,
    is_any_accessible_object, is_unique_accessible_object,
    Node,
    |object: &Object| object.as_accessible().cloned(),
    "accessible object"
);

accessor_family!(
    /// The single node of this result, anonymous or named. A named node
    /// satisfies both this classification and the narrower
    /// [`named_node`](Self::named_node) one.
    node, nodes, node_expectable, node_or_else, node_or_else_get,
    is_any_node, is_unique_node,
    Node,
    |object: &Object| object.as_accessible().cloned(),
    "node"
);

accessor_family!(
    /// The single named node of this result.
    named_node, named_nodes, named_node_expectable, named_node_or_else,
    named_node_or_else_get, is_any_named_node, is_unique_named_node,
    Node,
    |object: &Object| match object {
        Object::Node(node) if node.is_named() => Some(node.clone()),
        _ => None,
    },
    "named node"
);

accessor_family!(
    /// The single node reference of this result.
    node_reference, node_references, node_reference_expectable,
    node_reference_or_else, node_reference_or_else_get,
    is_any_node_reference, is_unique_node_reference,
    NodeReference,
    |object: &Object| match object {
        Object::Reference(reference) => Some(reference.clone()),
        _ => None,
    },
    "node reference"
);

accessor_family!(
    /// The single identifiable value of this result, a named node or a
    /// node reference.
    identifiable, identifiables, identifiable_expectable, identifiable_or_else,
    identifiable_or_else_get, is_any_identifiable, is_unique_identifiable,
    Object,
    |object: &Object| {
        if object.identifier().is_some() {
            Some(object.clone())
        } else {
            None
        }
    },
    "identifiable value"
);

accessor_family!(
    /// The single typed or plain literal of this result. Language-tagged
    /// strings are a classification of their own.
    literal, literals, literal_expectable, literal_or_else, literal_or_else_get,
    is_any_literal, is_unique_literal,
    Literal,
    |object: &Object| match object {
        Object::Literal(literal) => Some(literal.clone()),
        _ => None,
    },
    "literal"
);

accessor_family!(
    /// The single language-tagged string of this result.
    lang_string, lang_strings, lang_string_expectable, lang_string_or_else,
    lang_string_or_else_get, is_any_lang_string, is_unique_lang_string,
    LangString,
    |object: &Object| match object {
        Object::LangString(lang_string) => Some(lang_string.clone()),
        _ => None,
    },
    "lang string"
);

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: &str) -> Object {
        Object::Literal(Literal::plain(value))
    }

    fn reference(iri: &str) -> Object {
        Object::Reference(NodeReference::new(iri).unwrap())
    }

    #[test]
    fn test_empty_result() {
        let result = QueryResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert!(matches!(result.value(), Err(NodusError::NoLinkedData(_))));
        assert!(!result.is_any_value());
        assert!(!result.is_unique_value());
        assert_eq!(result.value_or_else(literal("fallback")), literal("fallback"));
    }

    #[test]
    fn test_unique_value_accessors() {
        let result: QueryResult = [literal("only")].into_iter().collect();
        assert_eq!(result.value().unwrap(), literal("only"));
        assert_eq!(result.value_expectable(), literal("only"));
        assert!(result.is_unique_value());
        assert!(result.is_unique_literal());
        assert_eq!(result.literal_expectable(), Literal::plain("only"));
    }

    #[test]
    fn test_classification_hit_among_several_values_is_ambiguous() {
        let result: QueryResult = [literal("x"), reference("http://example.com/r")]
            .into_iter()
            .collect();
        // exactly one literal, but the result as a whole is not unique
        assert!(matches!(
            result.literal(),
            Err(NodusError::AmbiguousLinkedData(_))
        ));
        assert!(result.is_any_literal());
        assert!(!result.is_unique_literal());
        assert_eq!(result.literals().len(), 1);
        assert_eq!(
            result.literal_or_else(Literal::plain("fallback")),
            Literal::plain("fallback")
        );
    }

    #[test]
    fn test_wrong_classification_is_no_linked_data() {
        let result: QueryResult = [literal("x")].into_iter().collect();
        assert!(matches!(
            result.node_reference(),
            Err(NodusError::NoLinkedData(_))
        ));
        assert!(!result.is_any_node_reference());
    }

    #[test]
    fn test_several_hits_are_ambiguous() {
        let result: QueryResult = [literal("a"), literal("b")].into_iter().collect();
        assert!(matches!(
            result.literal(),
            Err(NodusError::AmbiguousLinkedData(_))
        ));
        assert_eq!(result.literals().len(), 2);
    }

    #[test]
    #[should_panic(expected = "empty result")]
    fn test_expectable_panics_on_empty() {
        QueryResult::empty().value_expectable();
    }

    #[test]
    #[should_panic(expected = "ambiguous result")]
    fn test_expectable_panics_on_several() {
        let result: QueryResult = [literal("a"), literal("b")].into_iter().collect();
        result.value_expectable();
    }

    #[test]
    fn test_or_else_get_is_lazy() {
        let result: QueryResult = [literal("present")].into_iter().collect();
        let value = result.value_or_else_get(|| unreachable!("must not be called"));
        assert_eq!(value, literal("present"));
    }

    #[test]
    fn test_node_classifications() {
        let named = Node::named("http://example.com/a").unwrap();
        let result: QueryResult = [Object::Node(named.clone())].into_iter().collect();
        assert_eq!(result.named_node().unwrap(), named);
        assert_eq!(result.accessible_object().unwrap(), named);
        assert_eq!(result.identifiable().unwrap(), Object::Node(named.clone()));
        assert_eq!(result.node_kind().unwrap(), Object::Node(named));

        let anonymous: QueryResult = [Object::Node(Node::new())].into_iter().collect();
        assert!(anonymous.is_unique_node());
        assert!(anonymous.is_unique_accessible_object());
        assert!(anonymous.is_unique_node_kind());
        assert!(!anonymous.is_any_named_node());
        assert!(!anonymous.is_any_identifiable());

        let pointer: QueryResult = [reference("http://example.com/r")].into_iter().collect();
        assert!(pointer.is_unique_node_kind());
        assert!(pointer.is_unique_identifiable());
        assert!(!pointer.is_any_accessible_object());
        assert!(!pointer.is_any_node());
    }

    #[test]
    fn test_named_node_satisfies_the_node_classification() {
        let named = Node::named("http://example.com/a").unwrap();
        let result: QueryResult = [Object::Node(named.clone())].into_iter().collect();
        // the classifications overlap: named nodes are nodes too
        assert_eq!(result.node().unwrap(), named);
        assert!(result.is_unique_node());
        assert_eq!(result.nodes(), [named.clone()].into());

        let mixed: QueryResult = [Object::Node(named), Object::Node(Node::new())]
            .into_iter()
            .collect();
        assert_eq!(mixed.nodes().len(), 2);
        assert_eq!(mixed.named_nodes().len(), 1);
        assert!(matches!(
            mixed.node(),
            Err(NodusError::AmbiguousLinkedData(_))
        ));
    }

    #[test]
    fn test_strings_and_leaves() {
        let result: QueryResult = [
            literal("b"),
            literal("a"),
            Object::LangString(LangString::new("c", "en").unwrap()),
            reference("http://example.com/r"),
            Object::Node(Node::new()),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            result.strings(),
            ["a".to_string(), "b".to_string(), "c".to_string()].into()
        );
        assert_eq!(result.strings_joined(" ; "), "a ; b ; c");
        assert!(result.leaves().contains("http://example.com/r"));
        assert_eq!(result.leaves().len(), 4);
    }

    #[test]
    fn test_result_deduplicates() {
        let result: QueryResult = [literal("same"), literal("same")].into_iter().collect();
        assert_eq!(result.len(), 1);
        assert!(result.is_unique_value());
    }
}
