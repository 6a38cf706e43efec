//! A disjoint-set partition over an arena of interned resources.

use std::collections::{BTreeSet, HashMap};

use tessera_api::term::Resource;

/// A union-find structure partitioning [`Resource`]s into equivalence sets.
///
/// Resources are interned into an arena of dense ids; [`union`](Partition::union)
/// merges by size and [`find`](Partition::find) compresses paths (halving),
/// giving the usual near-constant amortized behaviour.
#[derive(Clone, Debug, Default)]
pub struct Partition {
    ids: HashMap<Resource, usize>,
    items: Vec<Resource>,
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl Partition {
    /// Creates an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of interned resources.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no resource has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Interns `r`, returning its arena id.
    ///
    /// A new resource starts out in a singleton set of its own.
    pub fn intern(&mut self, r: &Resource) -> usize {
        if let Some(&id) = self.ids.get(r) {
            return id;
        }
        let id = self.items.len();
        self.ids.insert(r.clone(), id);
        self.items.push(r.clone());
        self.parent.push(id);
        self.size.push(1);
        id
    }

    /// The canonical set id for `id`.
    pub fn find(&mut self, mut id: usize) -> usize {
        while self.parent[id] != id {
            self.parent[id] = self.parent[self.parent[id]];
            id = self.parent[id];
        }
        id
    }

    /// Merges the sets of `a` and `b`; returns the merged set's id.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return ra;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        ra
    }

    /// Whether `a` and `b` currently belong to the same set.
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// The current sets, each as a sorted set of resources.
    pub fn sets(&mut self) -> Vec<BTreeSet<Resource>> {
        let mut by_root: HashMap<usize, BTreeSet<Resource>> = HashMap::new();
        for id in 0..self.items.len() {
            let root = self.find(id);
            let item = self.items[id].clone();
            by_root.entry(root).or_default().insert(item);
        }
        by_root.into_values().collect()
    }
}
