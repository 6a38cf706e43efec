//! A prelude re-exporting the most commonly used types and traits.

pub use crate::graph::{Graph, MutableGraph, TripleSource};
pub use crate::term::{BlankNode, BnodeScope, Iri, Literal, Resource, Term, TermKind};
pub use crate::triple::Triple;
