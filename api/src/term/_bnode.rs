// this module is transparently re-exported by its parent `term`

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_SCOPE: AtomicU32 = AtomicU32::new(0);

/// A blank node: an anonymous node with no global name.
///
/// A blank node is an opaque identity token, unique per allocation:
/// two blank nodes are equal only if they were obtained from the same call
/// to [`BnodeScope::fresh`]. Identity is scoped to the graph owning the
/// allocating scope and carries no meaning across graphs.
///
/// The handle is a plain `(scope, serial)` pair, so it is `Copy`,
/// totally ordered and cheap to hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode {
    scope: u32,
    serial: u32,
}

impl BlankNode {
    /// The id of the [`BnodeScope`] this blank node was allocated in.
    pub fn scope(&self) -> u32 {
        self.scope
    }

    /// The allocation serial within the owning scope.
    pub fn serial(&self) -> u32 {
        self.serial
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "_:s{}n{}", self.scope, self.serial)
    }
}

/// An arena allocating [`BlankNode`]s.
///
/// Every scope receives a process-wide unique id at construction,
/// so nodes allocated by distinct scopes can never compare equal.
/// Allocation only needs `&self`; it is safe from concurrent threads.
#[derive(Debug)]
pub struct BnodeScope {
    scope: u32,
    next: AtomicU32,
}

impl BnodeScope {
    /// Creates a scope with a fresh process-wide id.
    pub fn new() -> Self {
        BnodeScope {
            scope: NEXT_SCOPE.fetch_add(1, Ordering::Relaxed),
            next: AtomicU32::new(0),
        }
    }

    /// Allocates a blank node distinct from every previously allocated one.
    pub fn fresh(&self) -> BlankNode {
        BlankNode {
            scope: self.scope,
            serial: self.next.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The process-wide id of this scope.
    pub fn id(&self) -> u32 {
        self.scope
    }
}

impl Default for BnodeScope {
    fn default() -> Self {
        Self::new()
    }
}
