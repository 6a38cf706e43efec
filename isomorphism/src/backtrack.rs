//! Trial-and-error resolution of signature classes with several members.
//!
//! Candidate bijections are explored with an assignment stack rather than
//! by materializing whole permutations: as soon as every blank node of some
//! triple is assigned, the substituted triple is looked up in the other
//! graph, pruning dead branches early.

use std::collections::{HashMap, HashSet};

use tessera_api::term::{BlankNode, Resource, Term};
use tessera_api::triple::Triple;

use crate::BnodeMapping;

/// Applies `mapping` to the blank nodes of `t`; unmapped nodes are kept.
pub(crate) fn substitute(t: &Triple, mapping: &BnodeMapping) -> Triple {
    let s = match t.s() {
        Resource::Blank(b) => match mapping.get(b) {
            Some(m) => Resource::Blank(*m),
            None => t.s().clone(),
        },
        other => other.clone(),
    };
    let o = match t.o() {
        Term::Blank(b) => match mapping.get(b) {
            Some(m) => Term::Blank(*m),
            None => t.o().clone(),
        },
        other => other.clone(),
    };
    Triple::new(s, t.p().clone(), o)
}

/// Whether every triple of `tc1`, substituted through `mapping`,
/// exists in `tc2`.
pub(crate) fn mapping_is_valid(
    tc1: &HashSet<Triple>,
    tc2: &HashSet<Triple>,
    mapping: &BnodeMapping,
) -> bool {
    tc1.iter().all(|t| tc2.contains(&substitute(t, mapping)))
}

fn bnodes_of(t: &Triple) -> impl Iterator<Item = BlankNode> + '_ {
    t.s().as_blank().into_iter().chain(t.o().as_blank())
}

/// Searches for an extension of `base` that maps each ambiguous class of
/// the first graph onto its same-signature class in the second.
///
/// `base` must already map every blank node outside the ambiguous classes.
/// Returns the first complete assignment under which every triple of `tc1`
/// has a counterpart in `tc2`.
pub(crate) fn search(
    tc1: &HashSet<Triple>,
    tc2: &HashSet<Triple>,
    base: BnodeMapping,
    classes: &[(Vec<BlankNode>, Vec<BlankNode>)],
) -> Option<BnodeMapping> {
    // triples fully decided by the base mapping must already check out
    for t in tc1 {
        if bnodes_of(t).all(|b| base.contains_key(&b)) && !tc2.contains(&substitute(t, &base)) {
            return None;
        }
    }

    let order: Vec<(BlankNode, usize)> = classes
        .iter()
        .enumerate()
        .flat_map(|(ci, (nodes1, _))| nodes1.iter().map(move |b| (*b, ci)))
        .collect();

    let mut incident: HashMap<BlankNode, Vec<&Triple>> = HashMap::new();
    for t in tc1 {
        let sb = t.s().as_blank();
        if let Some(b) = sb {
            incident.entry(b).or_default().push(t);
        }
        if let Some(b) = t.o().as_blank() {
            if Some(b) != sb {
                incident.entry(b).or_default().push(t);
            }
        }
    }

    let mut mapping = base;
    let mut used: Vec<HashSet<BlankNode>> = vec![HashSet::new(); classes.len()];
    if assign(0, &order, classes, &mut mapping, &mut used, &incident, tc2) {
        Some(mapping)
    } else {
        None
    }
}

#[allow(clippy::too_many_arguments)]
fn assign(
    k: usize,
    order: &[(BlankNode, usize)],
    classes: &[(Vec<BlankNode>, Vec<BlankNode>)],
    mapping: &mut BnodeMapping,
    used: &mut Vec<HashSet<BlankNode>>,
    incident: &HashMap<BlankNode, Vec<&Triple>>,
    tc2: &HashSet<Triple>,
) -> bool {
    let Some(&(node, ci)) = order.get(k) else {
        return true;
    };
    // candidates carry the same signature as `node`, by construction
    for candidate in &classes[ci].1 {
        if used[ci].contains(candidate) {
            continue;
        }
        mapping.insert(node, *candidate);
        used[ci].insert(*candidate);
        let consistent = incident.get(&node).map_or(true, |triples| {
            triples.iter().all(|t| {
                let fully_mapped = bnodes_of(t).all(|b| mapping.contains_key(&b));
                !fully_mapped || tc2.contains(&substitute(t, mapping))
            })
        });
        if consistent && assign(k + 1, order, classes, mapping, used, incident, tc2) {
            return true;
        }
        mapping.remove(&node);
        used[ci].remove(candidate);
    }
    false
}
