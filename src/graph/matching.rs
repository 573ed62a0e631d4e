//! Structural subsumption between values and patterns
//!
//! A pattern is an ordinary value that under-specifies: whatever it states
//! must hold of the candidate, whatever it omits is unconstrained. An empty
//! node pattern therefore matches every node. Matching is one-directional;
//! the candidate may always carry more than the pattern asks for.

use crate::graph::{LangString, Literal, Node, Object};
use crate::vocab::{rdf, ANY_RELATION, XML_LANG};

/// Whether `candidate` satisfies everything `pattern` states.
pub(crate) fn matches(candidate: &Object, pattern: &Object) -> bool {
    match (candidate, pattern) {
        (Object::Node(candidate), Object::Node(pattern)) => node_matches(candidate, pattern),
        (Object::Literal(candidate), Object::Node(pattern)) => {
            literal_matches_node(candidate, pattern)
        }
        (Object::LangString(candidate), Object::Node(pattern)) => {
            lang_string_matches_node(candidate, pattern)
        }
        (Object::Literal(candidate), Object::Literal(pattern)) => {
            candidate.datatype() == pattern.datatype()
                && (pattern.value().is_empty() || candidate.value() == pattern.value())
        }
        (Object::LangString(candidate), Object::LangString(pattern)) => {
            candidate.lang() == pattern.lang()
                && (pattern.value().is_empty() || candidate.value() == pattern.value())
        }
        (Object::Reference(candidate), Object::Reference(pattern)) => candidate == pattern,
        _ => false,
    }
}

/// Node-against-node subsumption: the pattern's identifier, if any, must
/// equal the candidate's, and for every relation of the pattern each stated
/// condition must be satisfied by at least one candidate value under that
/// relation. [`ANY_RELATION`] lets a condition roam over all relations.
pub(crate) fn node_matches(candidate: &Node, pattern: &Node) -> bool {
    if pattern.identifier().is_some() && candidate.identifier() != pattern.identifier() {
        return false;
    }
    pattern.entries().all(|(relation, conditions)| {
        let values: Vec<&Object> = if relation == ANY_RELATION {
            candidate.values().collect()
        } else {
            candidate
                .entries()
                .filter(|(r, _)| *r == relation)
                .flat_map(|(_, values)| values)
                .collect()
        };
        conditions.iter().all(|condition| {
            values
                .iter()
                .any(|&value| value == condition || matches(value, condition))
        })
    })
}

/// A literal can be matched by a node pattern that only speaks about its
/// datatype (`rdf:type`) and its lexical value (`rdf:value`). Any other
/// relation in the pattern disqualifies the literal.
fn literal_matches_node(candidate: &Literal, pattern: &Node) -> bool {
    leaf_matches_node(pattern, candidate.datatype(), candidate.value(), None)
}

/// Same as for literals, with the fixed `rdf:langString` datatype and the
/// language tag answerable through the `xml:lang` pseudo-relation.
fn lang_string_matches_node(candidate: &LangString, pattern: &Node) -> bool {
    leaf_matches_node(
        pattern,
        rdf::LANG_STRING,
        candidate.value(),
        Some(candidate.lang()),
    )
}

fn leaf_matches_node(pattern: &Node, datatype: &str, value: &str, lang: Option<&str>) -> bool {
    if pattern.identifier().is_some() {
        return false;
    }
    pattern.entries().all(|(relation, conditions)| {
        let answer: Option<&str> = match relation {
            rdf::TYPE => Some(datatype),
            rdf::VALUE => Some(value),
            XML_LANG => lang,
            _ => None,
        };
        match answer {
            Some(answer) => conditions
                .iter()
                .all(|condition| condition.leaf() == Some(answer)),
            None => false,
        }
    })
}
