//! References to nodes described elsewhere

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NodusError, NodusResult};
use crate::vocab;

/// A pointer to a node by its stable identifier.
///
/// A node reference carries no relations of its own; the node it denotes is
/// described elsewhere and resolved by lookup, never by ownership. This is
/// what makes reference cycles harmless.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeReference {
    identifier: String,
}

impl NodeReference {
    /// Creates a reference to the node identified by the given IRI.
    ///
    /// The identifier must be a non-empty absolute, scheme-prefixed
    /// reference; anything else fails with `InvalidArgument`.
    pub fn new(identifier: impl Into<String>) -> NodusResult<Self> {
        let identifier = identifier.into();
        if !vocab::is_absolute_iri(&identifier) {
            return Err(NodusError::InvalidArgument(format!(
                "not an absolute reference: {:?}",
                identifier
            )));
        }
        Ok(Self { identifier })
    }

    /// The identifier of the node referenced
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for NodeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(NodeReference::new("http://www.loc.gov/METS/").is_ok());
        assert!(NodeReference::new("urn:example:petri-net").is_ok());
    }

    #[test]
    fn test_invalid_identifiers_are_rejected() {
        for bad in ["", "not an iri", "relative/path", "http://with space"] {
            assert!(
                matches!(NodeReference::new(bad), Err(NodusError::InvalidArgument(_))),
                "expected rejection of {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_structural_equality() {
        let one = NodeReference::new("http://example.com/x").unwrap();
        let other = NodeReference::new("http://example.com/x").unwrap();
        assert_eq!(one, other);
    }
}
