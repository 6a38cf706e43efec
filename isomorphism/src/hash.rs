//! Blank-node signatures: a fingerprint of each blank node's structural
//! neighbourhood, refined iteratively until the partition into signature
//! classes stabilizes.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use tessera_api::term::{BlankNode, Resource, Term};
use tessera_api::triple::Triple;

/// The hasher used for signatures.
///
/// `DefaultHasher::new()` uses fixed keys, so signatures are comparable
/// across the two graphs being matched.
type SigHasher = DefaultHasher;

/// Computes a stable signature for every blank node occurring in `triples`.
///
/// The initial signature of a node hashes the multiset of its incident
/// `(role, predicate, other-end)` edges, with blank other-ends contributing
/// a neutral value. Each refinement round rehashes a node's previous
/// signature together with its neighbours' previous signatures; rounds stop
/// when every node is alone in its class, or a round fails to split any
/// class further.
pub(crate) fn stable_signatures(triples: &HashSet<Triple>) -> HashMap<BlankNode, u64> {
    let mut incident: HashMap<BlankNode, Vec<&Triple>> = HashMap::new();
    for t in triples {
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

    let mut sigs: HashMap<BlankNode, u64> = incident.keys().map(|b| (*b, 0)).collect();
    if sigs.is_empty() {
        return sigs;
    }
    let mut classes = 1;
    loop {
        let next = refine(&incident, &sigs);
        let next_classes = distinct(&next);
        sigs = next;
        // refinement only ever splits classes; a round that splits nothing
        // has converged
        if next_classes == sigs.len() || next_classes == classes {
            return sigs;
        }
        classes = next_classes;
    }
}

fn refine(
    incident: &HashMap<BlankNode, Vec<&Triple>>,
    sigs: &HashMap<BlankNode, u64>,
) -> HashMap<BlankNode, u64> {
    let mut next = HashMap::with_capacity(sigs.len());
    for (b, triples) in incident {
        let mut edge_hashes: Vec<u64> = Vec::with_capacity(triples.len());
        for t in triples {
            if t.s().as_blank() == Some(*b) {
                let mut h = SigHasher::new();
                0u8.hash(&mut h);
                t.p().as_str().hash(&mut h);
                hash_object_end(t.o(), sigs, &mut h);
                edge_hashes.push(h.finish());
            }
            if t.o().as_blank() == Some(*b) {
                let mut h = SigHasher::new();
                1u8.hash(&mut h);
                hash_subject_end(t.s(), sigs, &mut h);
                t.p().as_str().hash(&mut h);
                edge_hashes.push(h.finish());
            }
        }
        edge_hashes.sort_unstable(); // to ensure reproducibility
        let mut h = SigHasher::new();
        sigs[b].hash(&mut h);
        edge_hashes.hash(&mut h);
        next.insert(*b, h.finish());
    }
    next
}

fn hash_object_end<H: Hasher>(term: &Term, sigs: &HashMap<BlankNode, u64>, h: &mut H) {
    match term {
        Term::Blank(b) => {
            1u8.hash(h);
            sigs.get(b).copied().unwrap_or(0).hash(h);
        }
        grounded => {
            0u8.hash(h);
            grounded.hash(h);
        }
    }
}

fn hash_subject_end<H: Hasher>(r: &Resource, sigs: &HashMap<BlankNode, u64>, h: &mut H) {
    match r {
        Resource::Blank(b) => {
            1u8.hash(h);
            sigs.get(b).copied().unwrap_or(0).hash(h);
        }
        grounded => {
            0u8.hash(h);
            grounded.hash(h);
        }
    }
}

fn distinct(sigs: &HashMap<BlankNode, u64>) -> usize {
    sigs.values().collect::<HashSet<_>>().len()
}
