//! The linked-data value model

mod export;
mod literal;
pub(crate) mod matching;
mod node;
mod object;
mod reference;


pub use literal::{LangString, Literal};
pub use node::Node;
pub use object::Object;
pub use reference::NodeReference;
