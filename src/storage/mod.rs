//! Storage factories for linked-data values
//!
//! Every value variant can be constructed through the [`Storage`] trait,
//! which validates identifiers and datatypes at the boundary. The default
//! implementation is the transient [`MemoryStorage`]; persistent backends
//! are an external concern behind the same trait. Identity is structural
//! throughout, so values built by different storage instances compare and
//! hash identically.

mod memory;
mod traits;

pub use memory::MemoryStorage;
pub use traits::Storage;

pub(crate) use traits::leaf_object;
