//! Well-known relation and datatype identifiers, plus the codec for the
//! numbered-relation family used to encode sequence order.

use crate::error::{NodusError, NodusResult};

/// RDF vocabulary namespace
pub mod rdf {
    /// The RDF namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type, the relation from a node to its nominal type
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:value, the relation from a node to its literal content
    pub const VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";

    /// rdf:about, reserved for node identity and rejected as a relation
    pub const ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";

    /// rdf:PlainLiteral, the default literal datatype
    pub const PLAIN_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral";

    /// rdf:langString, the datatype of language-tagged strings
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// rdf:XMLLiteral
    pub const XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";

    /// rdf:HTML
    pub const HTML: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#HTML";

    /// Common prefix of the numbered relations rdf:_1, rdf:_2, …
    pub const SEQ_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#_";
}

/// XML Schema datatypes vocabulary namespace
pub mod xsd {
    /// The XSD namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string, normalized to rdf:PlainLiteral at construction
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:decimal
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:float
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:double
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:date
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:dateTime
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:time
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";

    /// xsd:duration
    pub const DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";

    /// xsd:gYear
    pub const G_YEAR: &str = "http://www.w3.org/2001/XMLSchema#gYear";

    /// xsd:gYearMonth
    pub const G_YEAR_MONTH: &str = "http://www.w3.org/2001/XMLSchema#gYearMonth";

    /// xsd:anyURI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

    /// xsd:base64Binary
    pub const BASE64_BINARY: &str = "http://www.w3.org/2001/XMLSchema#base64Binary";

    /// xsd:hexBinary
    pub const HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";
}

/// The xml:lang attribute, used in patterns to constrain a language tag
pub const XML_LANG: &str = "http://www.w3.org/XML/1998/namespace#lang";

/// Wildcard relation accepted by the filter queries and the graph path,
/// meaning "any relation".
pub const ANY_RELATION: &str = "urn:x-nodus:anyRelation";

/// The index of the first element referenced by sequence relation
pub const FIRST_INDEX: i64 = 1;

/// Produces the numbered-relation identifier for a sequence index.
///
/// Fails with `InvalidArgument` if `n` is below [`FIRST_INDEX`].
pub fn to_sequence_id(n: i64) -> NodusResult<String> {
    if n < FIRST_INDEX {
        return Err(NodusError::InvalidArgument(format!(
            "sequence index must be at least {}, got {}",
            FIRST_INDEX, n
        )));
    }
    Ok(sequence_key(n))
}

/// Formats a numbered-relation key. Callers guarantee `n >= FIRST_INDEX`.
pub(crate) fn sequence_key(n: i64) -> String {
    format!("{}{}", rdf::SEQ_PREFIX, n)
}

/// Parses the numeric suffix of a numbered-relation identifier.
///
/// Returns `Ok(None)` when the string does not have the numbered-relation
/// shape at all. When the shape matches, a numeral of zero or less fails
/// with `OutOfRange` and a numeral beyond the signed 64-bit range fails
/// with `NumericOverflow`; the valid range is exactly `[1, i64::MAX]`.
pub fn sequence_index_of(s: &str) -> NodusResult<Option<i64>> {
    let suffix = match s.strip_prefix(rdf::SEQ_PREFIX) {
        Some(suffix) => suffix,
        None => return Ok(None),
    };
    let digits = suffix.strip_prefix('-').unwrap_or(suffix);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    match suffix.parse::<i64>() {
        Ok(n) if n >= FIRST_INDEX => Ok(Some(n)),
        Ok(n) => Err(NodusError::OutOfRange(n)),
        Err(_) => Err(NodusError::NumericOverflow(suffix.to_string())),
    }
}

/// Tests whether a string is a syntactically valid absolute reference, that
/// is a scheme-prefixed IRI such as `http://…` or `urn:…`.
pub fn is_absolute_iri(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    let mut seen_colon = false;
    for b in bytes {
        if seen_colon {
            if b.is_ascii_whitespace() {
                return false;
            }
        } else if b == b':' {
            seen_colon = true;
        } else if !(b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.') {
            return false;
        }
    }
    // require a non-empty part after the scheme
    seen_colon && !s.ends_with(':')
}

/// Tests whether an identifier is an acceptable literal datatype: the
/// plain-literal, XML and HTML markers, or anything from the XSD namespace.
/// The lang-string marker is deliberately excluded; language-tagged strings
/// have their own constructor.
pub(crate) fn is_literal_datatype(s: &str) -> bool {
    s == rdf::PLAIN_LITERAL
        || s == rdf::XML_LITERAL
        || s == rdf::HTML
        || s.starts_with(xsd::NAMESPACE)
}
