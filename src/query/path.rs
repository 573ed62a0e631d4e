//! Relation paths through the graph

use tracing::trace;

use crate::graph::{Node, Object};
use crate::query::QueryResult;
use crate::vocab::ANY_RELATION;

/// One hop of a graph path: a relation to follow, optionally narrowed by a
/// condition pattern the reached values must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStep {
    relation: String,
    condition: Option<Object>,
}

impl GraphStep {
    /// A hop along the given relation, unconditionally.
    pub fn along(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            condition: None,
        }
    }

    /// A hop along any relation.
    pub fn any() -> Self {
        Self::along(ANY_RELATION)
    }

    /// Narrows this hop to values matching the given pattern.
    pub fn matching(mut self, condition: impl Into<Object>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// The relation this step follows.
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// The condition pattern, if any.
    pub fn condition(&self) -> Option<&Object> {
        self.condition.as_ref()
    }

    fn resolve(&self, node: &Node) -> QueryResult {
        let conditions: Vec<Object> = self.condition.iter().cloned().collect();
        node.get_where(&[self.relation.as_str()], &conditions)
    }
}

/// An ordered sequence of traversal steps.
///
/// Applying a path folds over the steps: each step resolves its relation on
/// every accessible object produced by the previous step and flattens the
/// outcomes into the input of the next one. Values without relations
/// (literals, lang strings, node references) end the traversal for their
/// branch; they can only appear in the final result.
///
/// ```
/// use nodus::{GraphPath, Node};
///
/// # fn main() -> nodus::NodusResult<()> {
/// let mut author = Node::new();
/// author.put_str("http://example.com/name", "Max Mustermann")?;
/// let mut book = Node::new();
/// book.put("http://example.com/author", author)?;
///
/// let path = GraphPath::new()
///     .via("http://example.com/author")
///     .via("http://example.com/name");
/// assert_eq!(path.apply(&book).strings_joined(""), "Max Mustermann");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphPath {
    steps: Vec<GraphStep>,
}

impl GraphPath {
    /// The empty path, which resolves to its starting node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an unconditional hop along the given relation.
    pub fn via(mut self, relation: impl Into<String>) -> Self {
        self.steps.push(GraphStep::along(relation));
        self
    }

    /// Appends a hop along the given relation, narrowed to values matching
    /// the condition pattern.
    pub fn via_matching(mut self, relation: impl Into<String>, condition: impl Into<Object>) -> Self {
        self.steps.push(GraphStep::along(relation).matching(condition));
        self
    }

    /// Appends an already-built step.
    pub fn step(mut self, step: GraphStep) -> Self {
        self.steps.push(step);
        self
    }

    /// The steps of this path, in traversal order.
    pub fn steps(&self) -> &[GraphStep] {
        &self.steps
    }

    /// Whether the path has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Resolves the path starting from a single node.
    pub fn apply(&self, start: &Node) -> QueryResult {
        let start: QueryResult = [Object::Node(start.clone())].into_iter().collect();
        self.apply_to(&start)
    }

    /// Resolves the path starting from every accessible object of an
    /// already-obtained result.
    pub fn apply_to(&self, start: &QueryResult) -> QueryResult {
        let mut current = start.clone();
        for step in &self.steps {
            trace!(relation = step.relation(), fan_in = current.len(), "path step");
            current = current
                .iter()
                .filter_map(Object::as_accessible)
                .flat_map(|node| step.resolve(node))
                .collect();
        }
        current
    }
}
