//! Traits for graphs: deduplicated sets of [triples](crate::triple).

use crate::term::{BlankNode, Iri, Resource, Term};
use crate::triple::Triple;

/// Type alias for the boxed triple iterators produced by a graph.
///
/// Iterators yield owned triples: implementations hand out copies so that
/// callers never borrow the underlying store across lock boundaries.
pub type TripleSource<'a> = Box<dyn Iterator<Item = Triple> + 'a>;

/// Generic trait for readable RDF graphs.
///
/// A graph is an unordered set of triples: implementations must not yield
/// duplicates.
///
/// # Enumeration order
///
/// Each implementation must enumerate its triples in *some* stable total
/// order: [`Graph::next_match_after`] relies on it to resume an enumeration
/// from an explicit position, so that cursors need not hold a borrow (or a
/// lock) between steps. The order is implementation-defined and may differ
/// between implementations; the default is ascending [`Ord`] order.
pub trait Graph {
    /// An iterator visiting all triples of this graph.
    fn triples(&self) -> TripleSource<'_>;

    /// An iterator visiting the triples matching the given pattern,
    /// where `None` is a wildcard.
    fn filter<'s>(
        &'s self,
        s: Option<&'s Resource>,
        p: Option<&'s Iri>,
        o: Option<&'s Term>,
    ) -> TripleSource<'s> {
        Box::new(self.triples().filter(move |t| t.matched_by(s, p, o)))
    }

    /// Whether this graph contains the given triple.
    fn contains(&self, t: &Triple) -> bool {
        self.filter(Some(t.s()), Some(t.p()), Some(t.o()))
            .next()
            .is_some()
    }

    /// The number of triples in this graph.
    fn len(&self) -> usize {
        self.triples().count()
    }

    /// Whether this graph contains no triple.
    fn is_empty(&self) -> bool {
        self.triples().next().is_none()
    }

    /// The first triple matching the pattern that comes strictly after
    /// `previous` in this graph's enumeration order,
    /// or the first match overall when `previous` is `None`.
    ///
    /// If `previous` has been removed since it was yielded, the enumeration
    /// resumes at its former position; triples inserted or removed behind
    /// that position are not revisited.
    fn next_match_after(
        &self,
        previous: Option<&Triple>,
        s: Option<&Resource>,
        p: Option<&Iri>,
        o: Option<&Term>,
    ) -> Option<Triple> {
        self.triples()
            .filter(|t| t.matched_by(s, p, o))
            .filter(|t| previous.map_or(true, |prev| t > prev))
            .min()
    }
}

/// Generic trait for mutable RDF graphs.
pub trait MutableGraph: Graph {
    /// Inserts a triple; returns `false` if it was already present.
    fn insert(&mut self, t: Triple) -> bool;

    /// Removes a triple; returns `false` if it was not present.
    fn remove(&mut self, t: &Triple) -> bool;

    /// Allocates a blank node in this graph's scope.
    ///
    /// The node is guaranteed distinct from every node previously allocated
    /// by any graph.
    fn fresh_blank_node(&self) -> BlankNode;

    /// Inserts every triple of `triples`; returns the number actually added.
    fn insert_all<I>(&mut self, triples: I) -> usize
    where
        I: IntoIterator<Item = Triple>,
        Self: Sized,
    {
        triples.into_iter().filter(|t| self.insert(t.clone())).count()
    }

    /// Removes every triple of `triples`; returns the number actually removed.
    fn remove_all<'a, I>(&mut self, triples: I) -> usize
    where
        I: IntoIterator<Item = &'a Triple>,
        Self: Sized,
    {
        triples.into_iter().filter(|t| self.remove(t)).count()
    }
}
