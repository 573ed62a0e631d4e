//! The mutable associative container at the heart of the store

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{NodusError, NodusResult};
use crate::graph::{matching, Literal, NodeReference, Object};
use crate::query::{GraphPath, QueryResult};
use crate::vocab::{self, rdf, sequence_key, ANY_RELATION, FIRST_INDEX};

/// A linked-data node: a multi-valued map from relation identifier to a set
/// of values, with list-like operations layered on the reserved numbered
/// relations `rdf:_1`, `rdf:_2`, ….
///
/// Most nodes are anonymous; a node carrying an identifier is the named
/// variant and additionally satisfies the identifiable classification. The
/// collection-like operations are intended to behave the way their
/// namesakes on standard containers do.
///
/// Mutation is not synchronized; callers sharing a node across threads must
/// serialize writes externally. All comparison is structural.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Node {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    identifier: Option<String>,
    edges: BTreeMap<String, BTreeSet<Object>>,
}

fn singleton(object: Object) -> BTreeSet<Object> {
    let mut set = BTreeSet::new();
    set.insert(object);
    set
}

impl Node {
    /// Creates an empty anonymous node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an anonymous node with the given nominal type.
    pub fn with_type(type_id: &str) -> NodusResult<Self> {
        let mut node = Self::new();
        node.edges.insert(
            rdf::TYPE.to_string(),
            singleton(Object::Reference(NodeReference::new(type_id)?)),
        );
        Ok(node)
    }

    /// Creates an empty named node. The identifier must be a non-empty
    /// absolute, scheme-prefixed reference.
    pub fn named(identifier: impl Into<String>) -> NodusResult<Self> {
        let identifier = identifier.into();
        if !vocab::is_absolute_iri(&identifier) {
            return Err(NodusError::InvalidArgument(format!(
                "not an absolute reference: {:?}",
                identifier
            )));
        }
        Ok(Self {
            identifier: Some(identifier),
            edges: BTreeMap::new(),
        })
    }

    /// Creates a named node with the given nominal type.
    pub fn named_with_type(identifier: impl Into<String>, type_id: &str) -> NodusResult<Self> {
        let mut node = Self::named(identifier)?;
        node.edges.insert(
            rdf::TYPE.to_string(),
            singleton(Object::Reference(NodeReference::new(type_id)?)),
        );
        Ok(node)
    }

    /// The stable identifier, if this is a named node.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Whether this node carries a stable identifier.
    pub fn is_named(&self) -> bool {
        self.identifier.is_some()
    }

    // === Associative operations ===

    /// Adds a value under a relation. Putting under the reserved
    /// `rdf:about` relation is rejected; identity is fixed at construction.
    pub fn put(&mut self, relation: &str, object: impl Into<Object>) -> NodusResult<&mut Self> {
        if relation == rdf::ABOUT {
            return Err(NodusError::InvalidArgument(
                "forbidden to put rdf:about entries, use Node::named instead".into(),
            ));
        }
        self.edges
            .entry(relation.to_string())
            .or_default()
            .insert(object.into());
        Ok(self)
    }

    /// Adds a leaf value under a relation: an absolute reference string
    /// becomes a node reference, anything else a plain literal.
    pub fn put_str(&mut self, relation: &str, value: &str) -> NodusResult<&mut Self> {
        self.put(relation, crate::storage::leaf_object(value, ""))
    }

    /// Adds all of the values under the given relation.
    pub fn put_all(
        &mut self,
        relation: &str,
        objects: impl IntoIterator<Item = Object>,
    ) -> NodusResult<&mut Self> {
        if relation == rdf::ABOUT {
            return Err(NodusError::InvalidArgument(
                "forbidden to put rdf:about entries, use Node::named instead".into(),
            ));
        }
        let mut objects = objects.into_iter().peekable();
        if objects.peek().is_some() {
            self.edges
                .entry(relation.to_string())
                .or_default()
                .extend(objects);
        }
        Ok(self)
    }

    /// All values under a relation.
    pub fn get(&self, relation: &str) -> QueryResult {
        QueryResult::from_set(self.edges.get(relation).cloned().unwrap_or_default())
    }

    /// Generalized filter: all values under the given relations (an empty
    /// slice or [`ANY_RELATION`] acting as wildcard) that satisfy every
    /// condition pattern (an empty slice accepting any value).
    pub fn get_where(&self, relations: &[&str], conditions: &[Object]) -> QueryResult {
        let any = [ANY_RELATION];
        let relations: &[&str] = if relations.is_empty() { &any } else { relations };
        let mut found = BTreeSet::new();
        for &relation in relations {
            let candidates: Vec<&Object> = if relation == ANY_RELATION {
                self.values().collect()
            } else {
                self.edges.get(relation).into_iter().flatten().collect()
            };
            for candidate in candidates {
                if conditions.iter().all(|condition| candidate.matches(condition)) {
                    found.insert(candidate.clone());
                }
            }
        }
        QueryResult::from_set(found)
    }

    /// Locates, among this node's direct values, the one identifiable value
    /// whose identifier equals `identifier`. Zero candidates fail with
    /// `NoLinkedData`, several with `AmbiguousLinkedData`.
    pub fn get_by_identifier(&self, identifier: &str) -> NodusResult<&Object> {
        let mut found = self
            .values()
            .filter(|object| object.identifier() == Some(identifier));
        match (found.next(), found.next()) {
            (Some(one), None) => Ok(one),
            (None, _) => Err(NodusError::NoLinkedData(format!(
                "no value identified by {}",
                identifier
            ))),
            (Some(_), Some(_)) => Err(NodusError::AmbiguousLinkedData(format!(
                "several values identified by {}",
                identifier
            ))),
        }
    }

    /// The unique directly referenced node of the given type. Zero
    /// candidates fail with `NoLinkedData`, several with
    /// `AmbiguousLinkedData`.
    pub fn get_by_type(&self, type_id: &str) -> NodusResult<&Node> {
        self.unique_accessible(|node| node.has_type(type_id), type_id)
    }

    /// The unique directly referenced node of the given type that also has
    /// the given value under the discriminator relation. This looks up a
    /// child by its identifying attribute.
    pub fn get_by_type_where(
        &self,
        type_id: &str,
        id_relation: &str,
        id_value: &str,
    ) -> NodusResult<&Node> {
        self.unique_accessible(
            |node| node.has_type(type_id) && node.get(id_relation).strings().contains(id_value),
            type_id,
        )
    }

    fn unique_accessible(
        &self,
        accept: impl Fn(&Node) -> bool,
        type_id: &str,
    ) -> NodusResult<&Node> {
        let mut found = self
            .values()
            .filter_map(Object::as_accessible)
            .filter(|&node| accept(node));
        match (found.next(), found.next()) {
            (Some(one), None) => Ok(one),
            (None, _) => Err(NodusError::NoLinkedData(format!(
                "no node of type {}",
                type_id
            ))),
            (Some(_), Some(_)) => Err(NodusError::AmbiguousLinkedData(format!(
                "several nodes of type {}",
                type_id
            ))),
        }
    }

    /// Whether the object is directly referenced by this node.
    pub fn contains(&self, object: &Object) -> bool {
        self.edges.values().any(|values| values.contains(object))
    }

    /// Whether this node has an outgoing relation with the given label.
    pub fn contains_key(&self, relation: &str) -> bool {
        self.edges.contains_key(relation)
    }

    /// All outgoing relation identifiers.
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// The (relation, value set) pairs of this node, ordered by relation.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BTreeSet<Object>)> {
        self.edges
            .iter()
            .map(|(relation, values)| (relation.as_str(), values))
    }

    /// All directly referenced values, across all relations.
    pub fn values(&self) -> impl Iterator<Item = &Object> {
        self.edges.values().flatten()
    }

    /// The number of (relation, value) pairs, i.e. the sum of the value-set
    /// cardinalities, not the number of distinct relations.
    pub fn size(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    /// Whether the node holds no relations at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Removes a value from all relations it appears under. A relation left
    /// without values disappears. Returns whether anything changed.
    pub fn remove(&mut self, object: &Object) -> bool {
        let mut removed = false;
        self.edges.retain(|_, values| {
            if values.remove(object) {
                removed = true;
            }
            !values.is_empty()
        });
        removed
    }

    /// Removes an entire relation, returning its previous values, or `None`
    /// if the relation held nothing. Idempotent.
    pub fn remove_all(&mut self, relation: &str) -> Option<BTreeSet<Object>> {
        self.edges.remove(relation)
    }

    /// Swaps the value set of a relation, returning the previous values.
    /// An empty replacement set removes the relation.
    pub fn replace(
        &mut self,
        relation: &str,
        objects: BTreeSet<Object>,
    ) -> Option<BTreeSet<Object>> {
        if objects.is_empty() {
            self.edges.remove(relation)
        } else {
            self.edges.insert(relation.to_string(), objects)
        }
    }

    /// Whether this node has the given type. Does not require the type to
    /// be unique.
    pub fn has_type(&self, type_id: &str) -> bool {
        self.edges
            .get(rdf::TYPE)
            .into_iter()
            .flatten()
            .any(|object| object.identifier() == Some(type_id))
    }

    /// The identifier of this node's single type.
    ///
    /// # Panics
    ///
    /// Panics if the node has zero or several types. Use
    /// [`has_type`](Self::has_type) to test membership instead.
    pub fn type_identifier(&self) -> &str {
        let mut types = self
            .edges
            .get(rdf::TYPE)
            .into_iter()
            .flatten()
            .filter_map(Object::identifier);
        match (types.next(), types.next()) {
            (Some(one), None) => one,
            (None, _) => panic!("empty result: node has no type"),
            (Some(_), Some(_)) => panic!("ambiguous result: node has several types"),
        }
    }

    // === Sequence overlay ===

    fn sequence_indices(&self) -> Vec<i64> {
        self.edges
            .keys()
            .filter_map(|key| vocab::sequence_index_of(key).ok().flatten())
            .collect()
    }

    /// The smallest sequence index in use, or `None` if no value is
    /// referenced by index.
    pub fn first(&self) -> Option<i64> {
        self.sequence_indices().into_iter().min()
    }

    /// The largest sequence index in use, or `None` if no value is
    /// referenced by index.
    pub fn last(&self) -> Option<i64> {
        self.sequence_indices().into_iter().max()
    }

    /// Appends a value at one above the current maximum index, or at
    /// [`FIRST_INDEX`] on a node without sequence relations. Never
    /// renumbers existing indices. Fails with `OutOfRange` when the
    /// maximum index is already `i64::MAX`.
    pub fn add(&mut self, element: impl Into<Object>) -> NodusResult<&mut Self> {
        let last = self.last().unwrap_or(FIRST_INDEX - 1);
        let index = last
            .checked_add(1)
            .ok_or(NodusError::OutOfRange(last))?;
        self.edges
            .insert(sequence_key(index), singleton(element.into()));
        Ok(self)
    }

    /// Appends all elements, in iteration order.
    pub fn add_all(
        &mut self,
        elements: impl IntoIterator<Item = Object>,
    ) -> NodusResult<&mut Self> {
        for element in elements {
            self.add(element)?;
        }
        Ok(self)
    }

    /// Renumbers every used sequence index up by one and inserts the
    /// element alone at [`FIRST_INDEX`]. Contrast with [`add`](Self::add),
    /// which never renumbers. Fails with `OutOfRange` when an element
    /// already sits at `i64::MAX` and cannot move up.
    pub fn add_first(&mut self, element: impl Into<Object>) -> NodusResult<()> {
        let mut used = self.sequence_indices();
        used.sort_unstable_by(|a, b| b.cmp(a));
        if let Some(&top) = used.first() {
            if top.checked_add(1).is_none() {
                return Err(NodusError::OutOfRange(top));
            }
        }
        trace!(renumbered = used.len(), "add_first shifts sequence up");
        for index in used {
            if let Some(values) = self.edges.remove(&sequence_key(index)) {
                self.edges.insert(sequence_key(index + 1), values);
            }
        }
        self.edges
            .insert(sequence_key(FIRST_INDEX), singleton(element.into()));
        Ok(())
    }

    /// Inserts an element at the given index, moving the elements from that
    /// index up to the next unused one upwards by one. A hole in the index
    /// list stops the shifting; a run occupied through `i64::MAX` fails
    /// with `OutOfRange`.
    pub fn insert(&mut self, index: i64, element: impl Into<Object>) -> NodusResult<()> {
        let key = vocab::to_sequence_id(index)?;
        let mut free = index;
        while self.edges.contains_key(&sequence_key(free)) {
            free = free
                .checked_add(1)
                .ok_or(NodusError::OutOfRange(free))?;
        }
        while free > index {
            if let Some(values) = self.edges.remove(&sequence_key(free - 1)) {
                self.edges.insert(sequence_key(free), values);
            }
            free -= 1;
        }
        self.edges.insert(key, singleton(element.into()));
        Ok(())
    }

    /// The value set at an arbitrary index. Sparse gaps are legal; an
    /// unused index yields an empty result.
    pub fn get_at(&self, index: i64) -> NodusResult<QueryResult> {
        Ok(self.get(&vocab::to_sequence_id(index)?))
    }

    /// Overwrites the value set at an arbitrary index with a single
    /// element, including indices with no predecessor.
    pub fn set_at(&mut self, index: i64, element: impl Into<Object>) -> NodusResult<()> {
        let key = vocab::to_sequence_id(index)?;
        self.edges.insert(key, singleton(element.into()));
        Ok(())
    }

    /// The values at the first used index, or an empty result.
    pub fn get_first(&self) -> QueryResult {
        match self.first() {
            Some(index) => self.get(&sequence_key(index)),
            None => QueryResult::empty(),
        }
    }

    /// The values at the last used index, or an empty result.
    pub fn get_last(&self) -> QueryResult {
        match self.last() {
            Some(index) => self.get(&sequence_key(index)),
            None => QueryResult::empty(),
        }
    }

    /// Deletes the entire value set at the first used index and shifts the
    /// contiguous run of following indices down by one to close the gap.
    pub fn remove_first(&mut self) {
        if let Some(mut position) = self.first() {
            self.edges.remove(&sequence_key(position));
            while let Some(values) = self.edges.remove(&sequence_key(position + 1)) {
                self.edges.insert(sequence_key(position), values);
                position += 1;
            }
            trace!(up_to = position, "remove_first closed sequence gap");
        }
    }

    /// Deletes the entire value set at the last used index.
    pub fn remove_last(&mut self) {
        if let Some(index) = self.last() {
            self.edges.remove(&sequence_key(index));
        }
    }

    /// Removes the single matching value from the lowest index holding it,
    /// leaving that index's other values and all other indices untouched.
    /// No shifting takes place. Returns whether a value was found.
    pub fn remove_first_occurrence(&mut self, object: &Object) -> bool {
        let mut indices = self.sequence_indices();
        indices.sort_unstable();
        self.remove_occurrence(indices, object)
    }

    /// Removes the single matching value from the highest index holding it.
    /// No shifting takes place. Returns whether a value was found.
    pub fn remove_last_occurrence(&mut self, object: &Object) -> bool {
        let mut indices = self.sequence_indices();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        self.remove_occurrence(indices, object)
    }

    fn remove_occurrence(&mut self, indices: Vec<i64>, object: &Object) -> bool {
        for index in indices {
            let key = sequence_key(index);
            if let Some(values) = self.edges.get_mut(&key) {
                if values.remove(object) {
                    if values.is_empty() {
                        self.edges.remove(&key);
                    }
                    return true;
                }
            }
        }
        false
    }

    /// The per-index value sets, as a list starting at [`FIRST_INDEX`].
    /// Unused leading indices and holes yield empty results.
    pub fn enumerated(&self) -> Vec<QueryResult> {
        let (first, last) = match (self.first(), self.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Vec::new(),
        };
        let mut results = Vec::new();
        for _ in FIRST_INDEX..first {
            results.push(QueryResult::empty());
        }
        for index in first..=last {
            results.push(self.get(&sequence_key(index)));
        }
        results
    }

    /// Demotes the sequence overlay in place: the value sets of all
    /// numbered relations are merged under `rdf:value`, so that
    /// [`first`](Self::first) and [`last`](Self::last) report `None` while
    /// the grouped values survive.
    pub fn make_unordered(&mut self) {
        let keys: Vec<String> = self
            .edges
            .keys()
            .filter(|key| vocab::sequence_index_of(key).ok().flatten().is_some())
            .cloned()
            .collect();
        if keys.is_empty() {
            return;
        }
        let mut demoted = BTreeSet::new();
        for key in keys {
            if let Some(values) = self.edges.remove(&key) {
                demoted.extend(values);
            }
        }
        self.edges
            .entry(rdf::VALUE.to_string())
            .or_default()
            .extend(demoted);
    }

    /// Copying form of [`make_unordered`](Self::make_unordered); the
    /// original node is left untouched.
    pub fn as_unordered(&self) -> Node {
        let mut copy = self.clone();
        copy.make_unordered();
        copy
    }

    /// Sets a literal as the only sequence-referenced child of this node.
    /// All node children are removed, but attribute literals and node
    /// references are kept. This is the *set text content* convenience
    /// when building XML-like structures.
    pub fn set_value(&mut self, value: &str) -> &mut Self {
        self.edges.retain(|relation, values| {
            if vocab::sequence_index_of(relation).ok().flatten().is_some() {
                return false;
            }
            values.retain(|object| !matches!(object, Object::Node(_)));
            !values.is_empty()
        });
        self.edges.insert(
            sequence_key(FIRST_INDEX),
            singleton(Object::Literal(Literal::plain(value))),
        );
        self
    }

    // === Matching and traversal ===

    /// Whether this node satisfies everything the pattern states. The
    /// pattern may under-specify; relations absent from it are
    /// unconstrained.
    pub fn matches(&self, pattern: &Object) -> bool {
        match pattern {
            Object::Node(pattern) => matching::node_matches(self, pattern),
            _ => false,
        }
    }

    /// Resolves the given graph path against this node.
    pub fn find(&self, path: &GraphPath) -> QueryResult {
        path.apply(self)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_recursive(f, 0)
    }
}

impl Node {
    fn fmt_recursive(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        if let Some(identifier) = &self.identifier {
            writeln!(f, "{}[{}]", pad, identifier)?;
        }
        let mut elements: BTreeMap<i64, &BTreeSet<Object>> = BTreeMap::new();
        for (relation, values) in &self.edges {
            if let Some(index) = vocab::sequence_index_of(relation).ok().flatten() {
                elements.insert(index, values);
                continue;
            }
            for value in values {
                match value {
                    Object::Node(node) => {
                        writeln!(f, "{}{} {{", pad, relation)?;
                        node.fmt_recursive(f, indent + 2)?;
                        writeln!(f, "{}}}", pad)?;
                    }
                    other => writeln!(f, "{}{} = {}", pad, relation, other)?,
                }
            }
        }
        for (index, values) in elements {
            for value in values {
                match value {
                    Object::Node(node) => {
                        writeln!(f, "{}{} {{", pad, sequence_key(index))?;
                        node.fmt_recursive(f, indent + 2)?;
                        writeln!(f, "{}}}", pad)?;
                    }
                    other => writeln!(f, "{}{} = {}", pad, sequence_key(index), other)?,
                }
            }
        }
        Ok(())
    }
}
