//! Terms are the atomic values RDF statements are made of.
//!
//! Three families of terms exist:
//! [IRIs](Iri), [blank nodes](BlankNode) and [literals](Literal).
//! The [`Resource`] enum gathers the two families allowed in subject
//! position; the [`Term`] enum gathers all three.

use std::fmt;

mod _bnode;
pub use _bnode::*;
mod _iri;
pub use _iri::*;
mod _literal;
pub use _literal::*;

/// The discriminator of the three term families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TermKind {
    /// An IRI
    Iri,
    /// A blank node
    BlankNode,
    /// A literal
    Literal,
}

/// A term that may occur in subject position: an [`Iri`] or a [`BlankNode`].
///
/// Literals are excluded by construction;
/// see [`Triple`](crate::triple::Triple).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    /// An IRI
    Iri(Iri),
    /// A blank node
    Blank(BlankNode),
}

impl Resource {
    /// The family this resource belongs to.
    pub fn kind(&self) -> TermKind {
        match self {
            Resource::Iri(_) => TermKind::Iri,
            Resource::Blank(_) => TermKind::BlankNode,
        }
    }

    /// This resource as an IRI, if it is one.
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Resource::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// This resource as a blank node, if it is one.
    pub fn as_blank(&self) -> Option<BlankNode> {
        match self {
            Resource::Blank(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this resource is a blank node.
    pub fn is_blank(&self) -> bool {
        matches!(self, Resource::Blank(_))
    }
}

impl From<Iri> for Resource {
    fn from(iri: Iri) -> Self {
        Resource::Iri(iri)
    }
}

impl From<BlankNode> for Resource {
    fn from(b: BlankNode) -> Self {
        Resource::Blank(b)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Resource::Iri(iri) => iri.fmt(f),
            Resource::Blank(b) => b.fmt(f),
        }
    }
}

/// Any RDF term: an [`Iri`], a [`BlankNode`] or a [`Literal`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// An IRI
    Iri(Iri),
    /// A blank node
    Blank(BlankNode),
    /// A literal
    Literal(Literal),
}

impl Term {
    /// The family this term belongs to.
    pub fn kind(&self) -> TermKind {
        match self {
            Term::Iri(_) => TermKind::Iri,
            Term::Blank(_) => TermKind::BlankNode,
            Term::Literal(_) => TermKind::Literal,
        }
    }

    /// This term as an IRI, if it is one.
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// This term as a blank node, if it is one.
    pub fn as_blank(&self) -> Option<BlankNode> {
        match self {
            Term::Blank(b) => Some(*b),
            _ => None,
        }
    }

    /// This term as a literal, if it is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Whether this term is a blank node.
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    /// This term as a [`Resource`], if it is not a literal.
    pub fn as_resource(&self) -> Option<Resource> {
        match self {
            Term::Iri(iri) => Some(Resource::Iri(iri.clone())),
            Term::Blank(b) => Some(Resource::Blank(*b)),
            Term::Literal(_) => None,
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<BlankNode> for Term {
    fn from(b: BlankNode) -> Self {
        Term::Blank(b)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl From<Resource> for Term {
    fn from(r: Resource) -> Self {
        match r {
            Resource::Iri(iri) => Term::Iri(iri),
            Resource::Blank(b) => Term::Blank(b),
        }
    }
}

/// Error raised when converting a literal [`Term`] into a [`Resource`].
#[derive(Clone, Debug, thiserror::Error)]
#[error("a literal cannot occur in this position: {0}")]
pub struct NotAResource(pub Literal);

impl TryFrom<Term> for Resource {
    type Error = NotAResource;

    fn try_from(t: Term) -> Result<Self, Self::Error> {
        match t {
            Term::Iri(iri) => Ok(Resource::Iri(iri)),
            Term::Blank(b) => Ok(Resource::Blank(b)),
            Term::Literal(lit) => Err(NotAResource(lit)),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Iri(iri) => iri.fmt(f),
            Term::Blank(b) => b.fmt(f),
            Term::Literal(lit) => lit.fmt(f),
        }
    }
}
