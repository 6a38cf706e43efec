//! A [`TermIndex`] is a bidirectional association of [terms](Term) with
//! short numeric indices.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tessera_api::term::Term;

/// A bidirectional association of [terms](Term) with `u32` indices.
///
/// Indices are assigned densely from 0 and are never reassigned:
/// a term stays in the index even when no triple uses it anymore.
/// This stability is what allows cursors to resume an enumeration
/// from a previously yielded triple.
#[derive(Clone, Debug, Default)]
pub struct TermIndex {
    t2i: HashMap<Term, u32>,
    i2t: Vec<Term>,
}

impl TermIndex {
    /// Creates an empty term index.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of terms in this index.
    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    /// Whether this index contains no term.
    pub fn is_empty(&self) -> bool {
        self.i2t.is_empty()
    }

    /// The index of term `t`, if it has one.
    pub fn get_index(&self, t: &Term) -> Option<u32> {
        self.t2i.get(t).copied()
    }

    /// The index of term `t`, assigning one if necessary.
    pub fn ensure_index(&mut self, t: &Term) -> u32 {
        match self.t2i.entry(t.clone()) {
            Entry::Vacant(e) => {
                let i = self
                    .i2t
                    .len()
                    .try_into()
                    .expect("more than u32::MAX terms in one graph");
                self.i2t.push(e.key().clone());
                e.insert(i);
                i
            }
            Entry::Occupied(e) => *e.get(),
        }
    }

    /// The term at index `i`.
    ///
    /// # Precondition
    ///
    /// `i` must have been returned previously by
    /// [`get_index`](TermIndex::get_index) or
    /// [`ensure_index`](TermIndex::ensure_index),
    /// otherwise this method panics.
    pub fn get_term(&self, i: u32) -> &Term {
        &self.i2t[i as usize]
    }
}
