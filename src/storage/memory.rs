//! The transient in-memory storage

use crate::storage::Storage;

/// The default storage: values live on the heap and vanish with their
/// owners. Carries no state of its own; two instances are interchangeable,
/// and values they produce compare structurally equal.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryStorage;

impl MemoryStorage {
    /// Creates a storage handle.
    pub fn new() -> Self {
        Self
    }
}

impl Storage for MemoryStorage {}
