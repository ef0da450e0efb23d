mod triple;


use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// re-exports
pub use triple::Triple;

///
/// Term
///
/// One RDF term as stored in group assignments and bound in solutions.
/// Ordering is total so terms can key grouping partitions.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Term {
    Iri(String),

    /// Blank node label, stored without the `_:` prefix.
    BlankNode(String),

    Literal(Literal),
}

impl Term {
    #[must_use]
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(iri.into())
    }

    /// Build a blank node, dropping one leading `_:` if the caller passed
    /// the concrete syntax form.
    #[must_use]
    pub fn blank(label: impl Into<String>) -> Self {
        let label = label.into();
        match label.strip_prefix("_:") {
            Some(stripped) => Self::BlankNode(stripped.to_string()),
            None => Self::BlankNode(label),
        }
    }

    #[must_use]
    pub fn literal(lexical: impl Into<String>) -> Self {
        Self::Literal(Literal::simple(lexical))
    }

    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    /// Return the blank node label when this term is a blank node.
    #[must_use]
    pub fn blank_label(&self) -> Option<&str> {
        match self {
            Self::BlankNode(label) => Some(label),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::BlankNode(label) => write!(f, "_:{label}"),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

///
/// Literal
///
/// A literal term. At most one of `datatype` and `language` is set; a
/// language-tagged literal implies `rdf:langString`.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Literal {
    lexical: String,
    datatype: Option<String>,
    language: Option<String>,
}

impl Literal {
    #[must_use]
    pub fn simple(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    #[must_use]
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Language tags compare case-insensitively, so they are stored lowercased.
    #[must_use]
    pub fn lang(lexical: impl Into<String>, language: impl AsRef<str>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.as_ref().to_ascii_lowercase()),
        }
    }

    #[must_use]
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    #[must_use]
    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            lexical: String,
            #[serde(default)]
            datatype: Option<String>,
            #[serde(default)]
            language: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        match (raw.datatype, raw.language) {
            (Some(datatype), Some(language)) => Err(serde::de::Error::custom(format!(
                "literal has both datatype <{datatype}> and language tag @{language}"
            ))),
            (Some(datatype), None) => Ok(Self::typed(raw.lexical, datatype)),
            (None, Some(language)) => Ok(Self::lang(raw.lexical, language)),
            (None, None) => Ok(Self::simple(raw.lexical)),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for ch in self.lexical.chars() {
            match ch {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                _ => write!(f, "{ch}")?,
            }
        }
        f.write_str("\"")?;

        if let Some(language) = &self.language {
            write!(f, "@{language}")
        } else if let Some(datatype) = &self.datatype {
            write!(f, "^^<{datatype}>")
        } else {
            Ok(())
        }
    }
}
