//! This crate is part of [Tessera],
//! a concurrently-accessed [RDF] named-graph core in Rust.
//!
//! It canonicalizes ("smushes") a graph: given a partition of resources
//! into equivalence sets, every set collapses onto a single representative,
//! so that all properties of equated resources end up on one node.
//! [`SameAsSmusher`] derives the partition from a graph of `owl:sameAs`
//! statements.
//!
//! [Tessera]: https://docs.rs/tessera/latest/tessera/
//! [RDF]: https://www.w3.org/TR/rdf11-concepts/
#![deny(missing_docs)]

use std::collections::{BTreeSet, HashMap};

use tessera_access::LockableGraph;
use tessera_api::ns::owl;
use tessera_api::term::{Iri, Resource, Term};
use tessera_api::triple::Triple;

mod partition;
pub use partition::*;
mod same_as;
pub use same_as::*;

/// Chooses the representative among several IRI candidates.
///
/// Only consulted when an equivalence set contains two or more IRIs.
pub trait PreferredIriStrategy {
    /// Chooses the representative.
    ///
    /// `candidates` is sorted ascending and holds at least two IRIs.
    fn preferred(&self, candidates: &[Iri]) -> Iri;
}

/// The default strategy: the first candidate in iteration order.
///
/// Deliberately arbitrary; strategies preferring shorter IRIs or
/// frequency-weighted ones can be plugged in instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstIri;

impl PreferredIriStrategy for FirstIri {
    fn preferred(&self, candidates: &[Iri]) -> Iri {
        candidates[0].clone()
    }
}

/// Rewrites a graph so that every equivalence set collapses onto one
/// canonical representative.
pub struct Smusher<S: PreferredIriStrategy = FirstIri> {
    strategy: S,
}

impl Smusher<FirstIri> {
    /// A smusher with the default representative strategy.
    pub fn new() -> Self {
        Smusher { strategy: FirstIri }
    }
}

impl Default for Smusher<FirstIri> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PreferredIriStrategy> Smusher<S> {
    /// A smusher with a custom representative strategy.
    pub fn with_strategy(strategy: S) -> Self {
        Smusher { strategy }
    }

    /// Smushes the resources of `graph` that belong to the same set in
    /// `equivalence_sets`, i.e. moves all their properties onto the set's
    /// representative.
    ///
    /// The representative of a set is its single IRI member if it has
    /// exactly one, a fresh blank node of the target graph if it has none,
    /// and otherwise the IRI chosen by the strategy. When `add_same_as` is
    /// true, an `owl:sameAs` statement pointing from each superseded IRI to
    /// the chosen one is added; otherwise the superseded IRIs just
    /// disappear from the graph.
    ///
    /// Predicates are never substituted, even when the predicate IRI is a
    /// member of an equivalence set. Resources absent from every set, and
    /// sets that are singletons, are left untouched.
    ///
    /// The whole scan-and-rewrite holds the graph's write lock, so
    /// concurrent observers never see a partially substituted graph. There
    /// is no rollback: a process dying mid-pass leaves the graph partially
    /// rewritten.
    pub fn smush(
        &self,
        graph: &LockableGraph,
        equivalence_sets: &[BTreeSet<Resource>],
        add_same_as: bool,
    ) {
        let mut replacement: HashMap<Resource, Resource> = HashMap::new();
        let mut provenance: Vec<Triple> = Vec::new();
        for set in equivalence_sets {
            let representative = self.representative_for(set, graph, &mut provenance);
            for member in set {
                if *member != representative {
                    replacement.insert(member.clone(), representative.clone());
                }
            }
        }
        if replacement.is_empty() {
            return;
        }

        let mut g = graph.write();
        let mut removed: Vec<Triple> = Vec::new();
        let mut staged: Vec<Triple> = Vec::new();
        for t in g.triples() {
            let s_rep = replacement.get(t.s());
            let o_rep = t.o().as_resource().and_then(|r| replacement.get(&r));
            if s_rep.is_none() && o_rep.is_none() {
                continue;
            }
            let s = s_rep.cloned().unwrap_or_else(|| t.s().clone());
            let o = match o_rep {
                Some(r) => Term::from(r.clone()),
                None => t.o().clone(),
            };
            staged.push(Triple::new(s, t.p().clone(), o));
            removed.push(t);
        }
        log::debug!(
            "smushing rewrites {} of {} triples",
            removed.len(),
            g.len()
        );
        for t in &removed {
            g.remove(t);
        }
        for t in staged {
            g.insert(t);
        }
        if add_same_as {
            for t in provenance {
                g.insert(t);
            }
        }
    }

    /// The representative of one equivalence set; `owl:sameAs` statements
    /// for superseded IRIs are staged into `provenance`.
    fn representative_for(
        &self,
        set: &BTreeSet<Resource>,
        graph: &LockableGraph,
        provenance: &mut Vec<Triple>,
    ) -> Resource {
        // sorted, since `Resource`s in a BTreeSet order IRIs ascending
        let iris: Vec<Iri> = set.iter().filter_map(|r| r.as_iri().cloned()).collect();
        match iris.as_slice() {
            // merging N blank nodes into one fresh node identity
            [] => Resource::Blank(graph.fresh_blank_node()),
            [only] => Resource::Iri(only.clone()),
            _ => {
                let preferred = self.strategy.preferred(&iris);
                for iri in &iris {
                    if *iri != preferred {
                        provenance.push(Triple::new(
                            iri.clone(),
                            owl::sameAs.clone(),
                            preferred.clone(),
                        ));
                    }
                }
                Resource::Iri(preferred)
            }
        }
    }
}
