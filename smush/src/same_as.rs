use tessera_access::LockableGraph;
use tessera_api::graph::Graph;
use tessera_api::ns::owl;
use tessera_api::term::{Iri, Literal, Resource, Term};

use crate::{FirstIri, Partition, PreferredIriStrategy, Smusher};

/// Error raised when a `sameAs` assertion is malformed.
///
/// Raised before any graph mutation: a smush run either validates all of
/// its input or leaves the target graph untouched.
#[derive(Clone, Debug, thiserror::Error)]
pub enum InvalidEquivalenceInput {
    /// A statement used a predicate other than `owl:sameAs`.
    #[error("equivalence statements must use the owl:sameAs predicate, found {0}")]
    UnexpectedPredicate(Iri),
    /// A statement related a literal; only subject-capable terms can be
    /// equated.
    #[error("equivalence statements cannot relate a literal: {0}")]
    LiteralObject(Literal),
}

/// Equates duplicate nodes of a graph, driven by `owl:sameAs` statements.
///
/// The statements' transitive closure is computed with a [`Partition`]:
/// each `sameAs(a, b)` unions the sets of `a` and `b`, and the resulting
/// disjoint sets are handed to the base [`Smusher`].
pub struct SameAsSmusher<S: PreferredIriStrategy = FirstIri> {
    base: Smusher<S>,
}

impl SameAsSmusher<FirstIri> {
    /// A sameAs smusher with the default representative strategy.
    pub fn new() -> Self {
        SameAsSmusher {
            base: Smusher::new(),
        }
    }
}

impl Default for SameAsSmusher<FirstIri> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PreferredIriStrategy> SameAsSmusher<S> {
    /// A sameAs smusher with a custom representative strategy.
    pub fn with_strategy(strategy: S) -> Self {
        SameAsSmusher {
            base: Smusher::with_strategy(strategy),
        }
    }

    /// Ensures all properties of `sameAs`-equated resources end up on the
    /// set's representative.
    ///
    /// When `add_canonical_same_as` is true, `owl:sameAs` statements with
    /// the representative as object are added for every superseded IRI.
    pub fn smush(
        &self,
        graph: &LockableGraph,
        same_as_statements: &dyn Graph,
        add_canonical_same_as: bool,
    ) -> Result<(), InvalidEquivalenceInput> {
        log::info!(
            "smushing over {} sameAs statements",
            same_as_statements.len()
        );
        let mut partition = Partition::new();
        for t in same_as_statements.triples() {
            if t.p() != &*owl::sameAs {
                return Err(InvalidEquivalenceInput::UnexpectedPredicate(t.p().clone()));
            }
            let object = match t.o() {
                Term::Iri(iri) => Resource::Iri(iri.clone()),
                Term::Blank(b) => Resource::Blank(*b),
                Term::Literal(lit) => {
                    return Err(InvalidEquivalenceInput::LiteralObject(lit.clone()))
                }
            };
            let a = partition.intern(t.s());
            let b = partition.intern(&object);
            partition.union(a, b);
        }
        let sets = partition.sets();
        log::debug!("collapsing {} equivalence sets", sets.len());
        self.base.smush(graph, &sets, add_canonical_same_as);
        Ok(())
    }
}
