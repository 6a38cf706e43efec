//! This crate is part of [Tessera],
//! a concurrently-accessed [RDF] named-graph core in Rust.
//!
//! It decides whether two graphs are [isomorphic], i.e. equal up to a
//! bijective relabeling of blank nodes, and produces the relabeling when
//! one exists. Unlike purely hash-based checkers, the decision is exact:
//! blank nodes left indistinguishable by signature refinement are resolved
//! by backtracking.
//!
//! [Tessera]: https://docs.rs/tessera/latest/tessera/
//! [RDF]: https://www.w3.org/TR/rdf11-concepts/
//! [isomorphic]: https://www.w3.org/TR/rdf11-concepts/#graph-isomorphism
#![deny(missing_docs)]

use std::collections::{BTreeMap, HashMap, HashSet};

use tessera_api::graph::Graph;
use tessera_api::term::BlankNode;
use tessera_api::triple::Triple;

mod backtrack;
mod hash;

#[cfg(test)]
mod test;

/// A bijective mapping from the blank nodes of one graph to those of
/// another.
pub type BnodeMapping = HashMap<BlankNode, BlankNode>;

/// The outcome of comparing two graphs for blank-node isomorphism.
///
/// `NotIsomorphic` is an expected negative result, not a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Isomorphism {
    /// The graphs are isomorphic; the mapping relabels the first graph's
    /// blank nodes into the second's. Ground graphs yield an empty mapping.
    Isomorphic(BnodeMapping),
    /// No bijective blank-node relabeling turns the first graph into the
    /// second.
    NotIsomorphic,
}

impl Isomorphism {
    /// Whether the graphs were found isomorphic.
    pub fn is_isomorphic(&self) -> bool {
        matches!(self, Isomorphism::Isomorphic(_))
    }

    /// The mapping, if the graphs were found isomorphic.
    pub fn into_mapping(self) -> Option<BnodeMapping> {
        match self {
            Isomorphism::Isomorphic(m) => Some(m),
            Isomorphism::NotIsomorphic => None,
        }
    }
}

/// Computes whether two graphs are isomorphic.
///
/// See [`match_graphs`] for the full contract.
pub fn are_isomorphic<G1, G2>(g1: &G1, g2: &G2) -> bool
where
    G1: Graph + ?Sized,
    G2: Graph + ?Sized,
{
    match_graphs(g1, g2).is_isomorphic()
}

/// Computes a blank-node mapping turning `g1` into `g2`,
/// or [`Isomorphism::NotIsomorphic`] when none exists.
///
/// A blank node is not a wildcard: it only ever maps to a blank node of the
/// other graph, never to an IRI or literal.
///
/// The inputs are copied at entry and never mutated; the function takes no
/// locks, so callers must only keep the graphs unmutated during that copy.
///
/// # Algorithm
///
/// 1. grounded triples (those without blank nodes) must cancel exactly
///    between the two copies;
/// 2. the remaining blank nodes get signatures from their incident
///    predicates and neighbours, refined iteratively until the partition
///    into signature classes stabilizes;
/// 3. classes must pair up between the graphs with equal sizes;
///    singleton classes resolve immediately;
/// 4. larger classes are resolved by backtracking over the candidate
///    bijections, pruning as soon as a fully-mapped triple of `g1` has no
///    counterpart in `g2`.
///
/// # Complexity
///
/// Step 4 is worst-case factorial in the size of the largest ambiguous
/// class. This is an accepted limitation: structurally indistinguishable
/// blank nodes are vanishingly rare in real data, where graphs are mostly
/// grounded and refinement separates almost everything.
pub fn match_graphs<G1, G2>(g1: &G1, g2: &G2) -> Isomorphism
where
    G1: Graph + ?Sized,
    G2: Graph + ?Sized,
{
    let mut tc1: HashSet<Triple> = g1.triples().collect();
    let mut tc2: HashSet<Triple> = g2.triples().collect();

    if !remove_grounded(&mut tc1, &mut tc2) {
        return Isomorphism::NotIsomorphic;
    }
    if tc1.len() != tc2.len() {
        return Isomorphism::NotIsomorphic;
    }

    let sigs1 = hash::stable_signatures(&tc1);
    let sigs2 = hash::stable_signatures(&tc2);
    if sigs1.len() != sigs2.len() {
        return Isomorphism::NotIsomorphic;
    }

    let classes1 = group_by_signature(&sigs1);
    let classes2 = group_by_signature(&sigs2);
    if classes1.len() != classes2.len() {
        return Isomorphism::NotIsomorphic;
    }

    let mut mapping = BnodeMapping::new();
    let mut ambiguous: Vec<(Vec<BlankNode>, Vec<BlankNode>)> = Vec::new();
    for (sig, nodes1) in &classes1 {
        let Some(nodes2) = classes2.get(sig) else {
            return Isomorphism::NotIsomorphic;
        };
        if nodes1.len() != nodes2.len() {
            return Isomorphism::NotIsomorphic;
        }
        if nodes1.len() == 1 {
            mapping.insert(nodes1[0], nodes2[0]);
        } else {
            ambiguous.push((nodes1.clone(), nodes2.clone()));
        }
    }

    if ambiguous.is_empty() {
        if backtrack::mapping_is_valid(&tc1, &tc2, &mapping) {
            Isomorphism::Isomorphic(mapping)
        } else {
            Isomorphism::NotIsomorphic
        }
    } else {
        let n: usize = ambiguous.iter().map(|(nodes1, _)| nodes1.len()).sum();
        log::debug!(
            "trial-and-error matching over {n} ambiguous blank nodes in {} classes",
            ambiguous.len()
        );
        match backtrack::search(&tc1, &tc2, mapping, &ambiguous) {
            Some(m) => Isomorphism::Isomorphic(m),
            None => Isomorphism::NotIsomorphic,
        }
    }
}

/// Removes the grounded triples present in both sets.
///
/// Returns `false` when some grounded triple of either side has no exact
/// counterpart on the other: the graphs cannot be isomorphic then, since
/// relabeling never touches grounded triples.
fn remove_grounded(tc1: &mut HashSet<Triple>, tc2: &mut HashSet<Triple>) -> bool {
    let grounded1: Vec<Triple> = tc1.iter().filter(|t| !t.has_blank()).cloned().collect();
    for t in grounded1 {
        if !tc2.remove(&t) {
            return false;
        }
        tc1.remove(&t);
    }
    // anything grounded left on the other side is unmatched
    tc2.iter().all(Triple::has_blank)
}

/// Groups blank nodes by signature; nodes within a class are sorted, and
/// classes are visited in signature order, for reproducibility.
fn group_by_signature(sigs: &HashMap<BlankNode, u64>) -> BTreeMap<u64, Vec<BlankNode>> {
    let mut classes: BTreeMap<u64, Vec<BlankNode>> = BTreeMap::new();
    for (node, sig) in sigs {
        classes.entry(*sig).or_default().push(*node);
    }
    for nodes in classes.values_mut() {
        nodes.sort_unstable();
    }
    classes
}
