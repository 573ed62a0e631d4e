//! Nodus: an embeddable in-memory linked-data store
//!
//! Nodus models data as a graph of nodes connected by named relations, in
//! the manner of RDF: values are nodes (anonymous or named), references to
//! nodes described elsewhere, typed literals or language-tagged strings.
//! On top of the unordered relation multi-map, the reserved numbered
//! relations `rdf:_1`, `rdf:_2`, … encode list order, giving every node
//! both map-like and list-like operations.
//!
//! # Core Concepts
//!
//! - **Nodes**: mutable containers of relation → value-set entries
//! - **Results**: immutable query outcomes with strict-arity typed accessors
//! - **Patterns**: ordinary values used to match candidates by subsumption
//! - **Paths**: chained relation hops folded across the graph
//!
//! # Example
//!
//! ```
//! use nodus::{MemoryStorage, Storage};
//!
//! # fn main() -> nodus::NodusResult<()> {
//! let storage = MemoryStorage::new();
//! let mut book = storage.create_node_with_type("http://example.com/Book")?;
//! book.put_str("http://example.com/title", "De rerum natura")?;
//! assert_eq!(
//!     book.get("http://example.com/title").strings_joined(""),
//!     "De rerum natura",
//! );
//! # Ok(())
//! # }
//! ```

mod error;
mod graph;
pub mod query;
pub mod storage;
pub mod vocab;

pub use error::{NodusError, NodusResult};
pub use graph::{LangString, Literal, Node, NodeReference, Object};
pub use query::{GraphPath, GraphStep, QueryResult};
pub use storage::{MemoryStorage, Storage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
