// this module is transparently re-exported by its parent `term`

use super::Iri;
use mownstr::MownStr;
use std::fmt;

/// A literal: a data value with a lexical form and a [`LiteralKind`].
///
/// Two literals are equal iff their lexical forms and kinds match exactly.
/// Language tags are compared case-sensitively, as given.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    lexical: Box<str>,
    kind: LiteralKind,
}

/// The kind of a [`Literal`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LiteralKind {
    /// A plain literal, with an optional language tag.
    Plain(Option<Box<str>>),
    /// A typed literal, with a datatype IRI.
    Typed(Iri),
}

impl Literal {
    /// Builds a plain literal without language tag.
    pub fn plain<T: Into<Box<str>>>(lexical: T) -> Self {
        Literal {
            lexical: lexical.into(),
            kind: LiteralKind::Plain(None),
        }
    }

    /// Builds a plain literal with a language tag.
    ///
    /// The tag is stored as given; no case normalization is performed.
    pub fn language_tagged<T, L>(lexical: T, tag: L) -> Self
    where
        T: Into<Box<str>>,
        L: Into<Box<str>>,
    {
        Literal {
            lexical: lexical.into(),
            kind: LiteralKind::Plain(Some(tag.into())),
        }
    }

    /// Builds a typed literal.
    pub fn typed<T: Into<Box<str>>>(lexical: T, datatype: Iri) -> Self {
        Literal {
            lexical: lexical.into(),
            kind: LiteralKind::Typed(datatype),
        }
    }

    /// The lexical form of this literal.
    pub fn lexical_form(&self) -> MownStr {
        MownStr::from_str(&self.lexical)
    }

    /// The kind of this literal.
    pub fn kind(&self) -> &LiteralKind {
        &self.kind
    }

    /// The language tag, if this is a language-tagged plain literal.
    pub fn language_tag(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::Plain(Some(tag)) => Some(tag),
            _ => None,
        }
    }

    /// The datatype IRI, if this is a typed literal.
    pub fn datatype(&self) -> Option<&Iri> {
        match &self.kind {
            LiteralKind::Typed(dt) => Some(dt),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.lexical.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                _ => fmt::Write::write_char(f, c)?,
            }
        }
        f.write_str("\"")?;
        match &self.kind {
            LiteralKind::Plain(None) => Ok(()),
            LiteralKind::Plain(Some(tag)) => write!(f, "@{tag}"),
            LiteralKind::Typed(dt) => write!(f, "^^{dt}"),
        }
    }
}
