//! Queries over the value model
//!
//! Provides the strict-arity result projection returned by every query
//! operation and relation paths for multi-hop traversal.

mod path;
mod result;

pub use path::{GraphPath, GraphStep};
pub use result::QueryResult;
