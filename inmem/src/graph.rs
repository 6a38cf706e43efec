use std::collections::BTreeSet;
use std::iter::{empty, once};
use std::ops::Bound;

use tessera_api::graph::{Graph, MutableGraph, TripleSource};
use tessera_api::term::{BlankNode, BnodeScope, Iri, Resource, Term};
use tessera_api::triple::Triple;

use crate::index::TermIndex;

/// A heavily indexed in-memory graph.
///
/// Triples are held as `u32` index triples in three B-tree indexes
/// (SPO, POS, OSP), so that every [`filter`](Graph::filter) pattern can be
/// answered by a range scan. The graph owns a [`BnodeScope`]: blank nodes
/// allocated through [`fresh_blank_node`](MutableGraph::fresh_blank_node)
/// belong to this graph.
///
/// The enumeration order (see [`Graph::next_match_after`]) is the SPO index
/// order, which is stable under mutation because term indices are never
/// reassigned.
#[derive(Debug, Default)]
pub struct IndexedGraph {
    terms: TermIndex,
    spo: BTreeSet<[u32; 3]>,
    pos: BTreeSet<[u32; 3]>,
    osp: BTreeSet<[u32; 3]>,
    scope: BnodeScope,
}

impl IndexedGraph {
    /// Creates an empty graph with a fresh blank node scope.
    pub fn new() -> Self {
        Self::default()
    }

    fn resource_at(&self, i: u32) -> Resource {
        match self.terms.get_term(i) {
            Term::Iri(iri) => Resource::Iri(iri.clone()),
            Term::Blank(b) => Resource::Blank(*b),
            Term::Literal(_) => unreachable!("corrupt index: literal in subject position"),
        }
    }

    fn predicate_at(&self, i: u32) -> Iri {
        match self.terms.get_term(i) {
            Term::Iri(iri) => iri.clone(),
            _ => unreachable!("corrupt index: non-IRI in predicate position"),
        }
    }

    fn triple_at(&self, [si, pi, oi]: [u32; 3]) -> Triple {
        Triple::new(
            self.resource_at(si),
            self.predicate_at(pi),
            self.terms.get_term(oi).clone(),
        )
    }

    fn index_of_resource(&self, r: &Resource) -> Option<u32> {
        self.terms.get_index(&Term::from(r.clone()))
    }

    fn index_of_predicate(&self, p: &Iri) -> Option<u32> {
        self.terms.get_index(&Term::Iri(p.clone()))
    }

    fn key_of(&self, t: &Triple) -> Option<[u32; 3]> {
        Some([
            self.index_of_resource(t.s())?,
            self.index_of_predicate(t.p())?,
            self.terms.get_index(t.o())?,
        ])
    }
}

impl Clone for IndexedGraph {
    /// Clones the triples; the clone gets a fresh blank node scope
    /// (existing blank nodes keep their identity, as plain values).
    fn clone(&self) -> Self {
        IndexedGraph {
            terms: self.terms.clone(),
            spo: self.spo.clone(),
            pos: self.pos.clone(),
            osp: self.osp.clone(),
            scope: BnodeScope::new(),
        }
    }
}

impl Graph for IndexedGraph {
    fn triples(&self) -> TripleSource<'_> {
        Box::new(self.spo.iter().map(|ti| self.triple_at(*ti)))
    }

    fn filter<'s>(
        &'s self,
        s: Option<&'s Resource>,
        p: Option<&'s Iri>,
        o: Option<&'s Term>,
    ) -> TripleSource<'s> {
        let si = match s.map(|s| self.index_of_resource(s)) {
            None => None,
            Some(None) => return Box::new(empty()),
            Some(Some(i)) => Some(i),
        };
        let pi = match p.map(|p| self.index_of_predicate(p)) {
            None => None,
            Some(None) => return Box::new(empty()),
            Some(Some(i)) => Some(i),
        };
        let oi = match o.map(|o| self.terms.get_index(o)) {
            None => None,
            Some(None) => return Box::new(empty()),
            Some(Some(i)) => Some(i),
        };
        match (si, pi, oi) {
            (Some(si), Some(pi), Some(oi)) => {
                if self.spo.contains(&[si, pi, oi]) {
                    Box::new(once(self.triple_at([si, pi, oi])))
                } else {
                    Box::new(empty())
                }
            }
            (Some(si), Some(pi), None) => {
                let r = [si, pi, u32::MIN]..=[si, pi, u32::MAX];
                Box::new(self.spo.range(r).map(|ti| self.triple_at(*ti)))
            }
            (Some(si), None, None) => {
                let r = [si, u32::MIN, u32::MIN]..=[si, u32::MAX, u32::MAX];
                Box::new(self.spo.range(r).map(|ti| self.triple_at(*ti)))
            }
            (Some(si), None, Some(oi)) => {
                let r = [oi, si, u32::MIN]..=[oi, si, u32::MAX];
                Box::new(
                    self.osp
                        .range(r)
                        .map(|&[o, s, p]| self.triple_at([s, p, o])),
                )
            }
            (None, Some(pi), Some(oi)) => {
                let r = [pi, oi, u32::MIN]..=[pi, oi, u32::MAX];
                Box::new(
                    self.pos
                        .range(r)
                        .map(|&[p, o, s]| self.triple_at([s, p, o])),
                )
            }
            (None, Some(pi), None) => {
                let r = [pi, u32::MIN, u32::MIN]..=[pi, u32::MAX, u32::MAX];
                Box::new(
                    self.pos
                        .range(r)
                        .map(|&[p, o, s]| self.triple_at([s, p, o])),
                )
            }
            (None, None, Some(oi)) => {
                let r = [oi, u32::MIN, u32::MIN]..=[oi, u32::MAX, u32::MAX];
                Box::new(
                    self.osp
                        .range(r)
                        .map(|&[o, s, p]| self.triple_at([s, p, o])),
                )
            }
            (None, None, None) => self.triples(),
        }
    }

    fn contains(&self, t: &Triple) -> bool {
        match self.key_of(t) {
            Some(key) => self.spo.contains(&key),
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.spo.len()
    }

    fn is_empty(&self) -> bool {
        self.spo.is_empty()
    }

    fn next_match_after(
        &self,
        previous: Option<&Triple>,
        s: Option<&Resource>,
        p: Option<&Iri>,
        o: Option<&Term>,
    ) -> Option<Triple> {
        let si = match s.map(|s| self.index_of_resource(s)) {
            Some(None) => return None,
            other => other.flatten(),
        };
        let start = match previous.and_then(|t| self.key_of(t)) {
            Some(key) => Bound::Excluded(key),
            // a foreign `previous` cannot be positioned; start over
            None => Bound::Unbounded,
        };
        for &key in self.spo.range((start, Bound::Unbounded)) {
            if let Some(si) = si {
                if key[0] > si {
                    return None;
                }
                if key[0] < si {
                    continue;
                }
            }
            let t = self.triple_at(key);
            if t.matched_by(s, p, o) {
                return Some(t);
            }
        }
        None
    }
}

impl MutableGraph for IndexedGraph {
    fn insert(&mut self, t: Triple) -> bool {
        let (s, p, o) = t.into_spo();
        let is = self.terms.ensure_index(&Term::from(s));
        let ip = self.terms.ensure_index(&Term::Iri(p));
        let io = self.terms.ensure_index(&o);
        if self.spo.insert([is, ip, io]) {
            let i = self.pos.insert([ip, io, is]);
            debug_assert!(i);
            let i = self.osp.insert([io, is, ip]);
            debug_assert!(i);
            true
        } else {
            false
        }
    }

    fn remove(&mut self, t: &Triple) -> bool {
        let Some([is, ip, io]) = self.key_of(t) else {
            return false;
        };
        if self.spo.remove(&[is, ip, io]) {
            let i = self.pos.remove(&[ip, io, is]);
            debug_assert!(i);
            let i = self.osp.remove(&[io, is, ip]);
            debug_assert!(i);
            true
        } else {
            false
        }
    }

    fn fresh_blank_node(&self) -> BlankNode {
        self.scope.fresh()
    }
}

impl FromIterator<Triple> for IndexedGraph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut g = IndexedGraph::new();
        g.insert_all(iter);
        g
    }
}
