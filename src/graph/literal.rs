//! Literal values: plain or typed strings and language-tagged strings

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NodusError, NodusResult};
use crate::vocab::{self, rdf, xsd};

/// A typed literal value, a pair of lexical value and datatype identifier.
///
/// The datatype defaults to `rdf:PlainLiteral` when unspecified; a literal
/// declared as `xsd:string` is normalized to a plain literal so that the two
/// spellings compare equal. Language-tagged strings are a separate type,
/// [`LangString`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    value: String,
    datatype: String,
}

impl Literal {
    /// Creates a literal with the given datatype, or a plain literal when
    /// the datatype is `None` or empty.
    ///
    /// Requesting `rdf:langString` fails with `InvalidArgument`; use
    /// [`LangString::new`] for language-tagged strings. A datatype outside
    /// the known literal-datatype set (the plain-literal, XML and HTML
    /// markers plus the XSD namespace) also fails with `InvalidArgument`.
    pub fn new(value: impl Into<String>, datatype: Option<&str>) -> NodusResult<Self> {
        let datatype = match datatype {
            None | Some("") => rdf::PLAIN_LITERAL,
            Some(xsd::STRING) => rdf::PLAIN_LITERAL,
            Some(rdf::LANG_STRING) => {
                return Err(NodusError::InvalidArgument(
                    "cannot create a literal of type rdf:langString, use a lang string".into(),
                ))
            }
            Some(dt) if vocab::is_literal_datatype(dt) => dt,
            Some(dt) => {
                return Err(NodusError::InvalidArgument(format!(
                    "not a literal datatype: {}",
                    dt
                )))
            }
        };
        Ok(Self {
            value: value.into(),
            datatype: datatype.to_string(),
        })
    }

    /// Creates a plain literal. Never fails.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: rdf::PLAIN_LITERAL.to_string(),
        }
    }

    /// The lexical value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The datatype identifier
    pub fn datatype(&self) -> &str {
        &self.datatype
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.datatype == rdf::PLAIN_LITERAL {
            write!(f, "\"{}\"", self.value)
        } else {
            write!(f, "\"{}\"^^{}", self.value, abbreviate(&self.datatype))
        }
    }
}

/// A language-tagged string: a literal fixed to the `rdf:langString`
/// datatype with a required non-empty language tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LangString {
    value: String,
    lang: String,
}

impl LangString {
    /// Creates a language-tagged string. An empty language tag fails with
    /// `MissingValue`.
    pub fn new(value: impl Into<String>, lang: impl Into<String>) -> NodusResult<Self> {
        let lang = lang.into();
        if lang.is_empty() {
            return Err(NodusError::MissingValue(
                "a lang string requires a language tag".into(),
            ));
        }
        Ok(Self {
            value: value.into(),
            lang,
        })
    }

    /// The lexical value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The language tag
    pub fn lang(&self) -> &str {
        &self.lang
    }
}

impl fmt::Display for LangString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"@{}", self.value, self.lang)
    }
}

/// Shortens a datatype IRI to its conventional prefixed form where known.
fn abbreviate(iri: &str) -> String {
    if let Some(local) = iri.strip_prefix(rdf::NAMESPACE) {
        format!("rdf:{}", local)
    } else if let Some(local) = iri.strip_prefix(xsd::NAMESPACE) {
        format!("xsd:{}", local)
    } else {
        iri.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_without_datatype_is_plain() {
        let literal = Literal::new("Lorem ipsum dolor sit amet", None).unwrap();
        assert_eq!(literal.datatype(), rdf::PLAIN_LITERAL);
        assert_eq!(literal.value(), "Lorem ipsum dolor sit amet");
    }

    #[test]
    fn test_xsd_string_normalizes_to_plain() {
        let plain = Literal::new("Lorem ipsum dolor sit amet", Some(rdf::PLAIN_LITERAL)).unwrap();
        let typed = Literal::new("Lorem ipsum dolor sit amet", Some(xsd::STRING)).unwrap();
        assert_eq!(plain, typed);
    }

    #[test]
    fn test_literal_equality_is_structural() {
        let one = Literal::new("42", Some(xsd::INTEGER)).unwrap();
        let other = Literal::new("42", Some(xsd::INTEGER)).unwrap();
        assert_eq!(one, other);

        let different_type = Literal::new("42", Some(xsd::DECIMAL)).unwrap();
        assert_ne!(one, different_type);

        let different_value = Literal::new("43", Some(xsd::INTEGER)).unwrap();
        assert_ne!(one, different_value);
    }

    #[test]
    fn test_lang_string_datatype_is_rejected() {
        assert!(matches!(
            Literal::new("In vino veritas est.", Some(rdf::LANG_STRING)),
            Err(NodusError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_node_type_datatype_is_rejected() {
        assert!(matches!(
            Literal::new("whatever", Some("http://www.loc.gov/mods/v3#name")),
            Err(NodusError::InvalidArgument(_))
        ));
        // a bare language code is not a datatype IRI either
        assert!(matches!(
            Literal::new("In vino veritas est.", Some("la")),
            Err(NodusError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_lang_string_requires_language() {
        assert!(matches!(
            LangString::new("Hoc est corpus meum.", ""),
            Err(NodusError::MissingValue(_))
        ));
        let ok = LangString::new("Hoc est corpus meum.", "la").unwrap();
        assert_eq!(ok.lang(), "la");
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(
            Literal::plain("Lorem ipsum dolor sit amet").to_string(),
            "\"Lorem ipsum dolor sit amet\""
        );
        assert_eq!(
            Literal::new("<p>x</p>", Some(rdf::HTML)).unwrap().to_string(),
            "\"<p>x</p>\"^^rdf:HTML"
        );
        assert_eq!(
            Literal::new("42", Some(xsd::INTEGER)).unwrap().to_string(),
            "\"42\"^^xsd:integer"
        );
        assert_eq!(
            LangString::new("Hoc est corpus meum.", "la").unwrap().to_string(),
            "\"Hoc est corpus meum.\"@la"
        );
    }
}
