use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tessera_api::graph::MutableGraph;
use tessera_api::term::{BlankNode, Iri, Resource, Term};
use tessera_api::triple::Triple;

use crate::debug::{self, HeldLock, TrackingReadGuard, TrackingRwLock, TrackingWriteGuard};

/// The type-erased backing store held by a [`LockableGraph`].
pub type BackingGraph = Box<dyn MutableGraph + Send + Sync>;

// the plain lock, or the debug-instrumented one
enum GraphLock {
    Plain(RwLock<BackingGraph>),
    Tracked(TrackingRwLock<BackingGraph>),
}

impl GraphLock {
    fn read(&self) -> GraphReadGuard<'_> {
        match self {
            GraphLock::Plain(l) => GraphReadGuard(ReadInner::Plain(l.read_recursive())),
            GraphLock::Tracked(l) => GraphReadGuard(ReadInner::Tracked(l.read())),
        }
    }

    fn write(&self) -> GraphWriteGuard<'_> {
        match self {
            GraphLock::Plain(l) => GraphWriteGuard(WriteInner::Plain(l.write())),
            GraphLock::Tracked(l) => GraphWriteGuard(WriteInner::Tracked(l.write())),
        }
    }
}

/// A graph behind its own read/write lock.
///
/// Every distinct backing graph owns exactly one lock; the registry holds no
/// global lock, so operations on distinct graphs never contend.
///
/// Single operations (`add`, `remove`, `add_all`, `remove_all`, `len`,
/// `contains`) acquire the lock for exactly the duration of the call: each
/// call is atomic with respect to concurrent readers and writers, but two
/// sequential calls are not atomic as a pair. Multi-step callers take a
/// guard through [`read`](LockableGraph::read) /
/// [`write`](LockableGraph::write) instead.
///
/// Read acquisitions use `read_recursive`, so a thread that already holds
/// the read lock can take it again without queueing behind a waiting
/// writer. Lock acquisition never times out: a blocked caller waits
/// indefinitely.
///
/// When the `TESSERA_LOCK_DEBUG` environment variable is `true` at
/// construction time, the graph is backed by the debug-instrumented
/// [`TrackingRwLock`] instead of the plain lock;
/// [`held_locks`](LockableGraph::held_locks) then reports who holds it.
pub struct LockableGraph {
    lock: GraphLock,
}

impl LockableGraph {
    /// Wraps a backing graph behind a fresh lock.
    ///
    /// The lock is the plain one unless `TESSERA_LOCK_DEBUG=true` is set in
    /// the environment, in which case the debug-instrumented variant is
    /// used.
    pub fn new<G: MutableGraph + Send + Sync + 'static>(graph: G) -> Self {
        if debug::tracking_enabled() {
            Self::new_tracked(graph)
        } else {
            LockableGraph {
                lock: GraphLock::Plain(RwLock::new(Box::new(graph))),
            }
        }
    }

    /// Wraps a backing graph behind the debug-instrumented lock,
    /// regardless of the environment.
    pub fn new_tracked<G: MutableGraph + Send + Sync + 'static>(graph: G) -> Self {
        LockableGraph {
            lock: GraphLock::Tracked(TrackingRwLock::new_tracking(Box::new(graph))),
        }
    }

    /// Acquires the read lock for a multi-step read.
    ///
    /// Prefer the single-call operations where possible; they scope the
    /// lock for you.
    pub fn read(&self) -> GraphReadGuard<'_> {
        self.lock.read()
    }

    /// Acquires the write lock for a multi-step mutation.
    ///
    /// External observers see none of the intermediate states, which is why
    /// the smusher runs its whole rewrite pass under one such guard.
    /// The write lock is not reentrant: do not call the single-call
    /// operations of the same graph while holding this guard.
    pub fn write(&self) -> GraphWriteGuard<'_> {
        self.lock.write()
    }

    /// The guards currently outstanding on this graph's lock, with their
    /// acquisition stacks.
    ///
    /// Always empty unless the graph was built with the
    /// debug-instrumented lock (see [`LockableGraph::new`]).
    pub fn held_locks(&self) -> Vec<HeldLock> {
        match &self.lock {
            GraphLock::Plain(_) => Vec::new(),
            GraphLock::Tracked(l) => l.held_locks(),
        }
    }

    /// Adds a triple, holding the write lock for just this call.
    ///
    /// Returns `false` if the triple was already present.
    pub fn add(&self, t: Triple) -> bool {
        self.lock.write().insert(t)
    }

    /// Removes a triple, holding the write lock for just this call.
    ///
    /// Returns `false` if the triple was not present.
    pub fn remove(&self, t: &Triple) -> bool {
        self.lock.write().remove(t)
    }

    /// Adds every triple of `triples` in one atomic call;
    /// returns the number actually added.
    pub fn add_all<I: IntoIterator<Item = Triple>>(&self, triples: I) -> usize {
        let mut g = self.lock.write();
        triples.into_iter().filter(|t| g.insert(t.clone())).count()
    }

    /// Removes every triple of `triples` in one atomic call;
    /// returns the number actually removed.
    pub fn remove_all<'a, I: IntoIterator<Item = &'a Triple>>(&self, triples: I) -> usize {
        let mut g = self.lock.write();
        triples.into_iter().filter(|t| g.remove(t)).count()
    }

    /// The number of triples currently in the graph.
    pub fn len(&self) -> usize {
        self.lock.read().len()
    }

    /// Whether the graph currently contains no triple.
    pub fn is_empty(&self) -> bool {
        self.lock.read().is_empty()
    }

    /// Whether the graph currently contains the given triple.
    pub fn contains(&self, t: &Triple) -> bool {
        self.lock.read().contains(t)
    }

    /// Allocates a blank node in the backing graph's scope.
    pub fn fresh_blank_node(&self) -> BlankNode {
        self.lock.read().fresh_blank_node()
    }

    /// Copies the current triple set under a single read acquisition.
    pub fn snapshot(&self) -> Vec<Triple> {
        self.lock.read().triples().collect()
    }
}

/// A multi-step read guard on a [`LockableGraph`]'s backing store.
pub struct GraphReadGuard<'a>(ReadInner<'a>);

enum ReadInner<'a> {
    Plain(RwLockReadGuard<'a, BackingGraph>),
    Tracked(TrackingReadGuard<'a, BackingGraph>),
}

impl Deref for GraphReadGuard<'_> {
    type Target = BackingGraph;

    fn deref(&self) -> &BackingGraph {
        match &self.0 {
            ReadInner::Plain(g) => &**g,
            ReadInner::Tracked(g) => &**g,
        }
    }
}

/// A multi-step write guard on a [`LockableGraph`]'s backing store.
pub struct GraphWriteGuard<'a>(WriteInner<'a>);

enum WriteInner<'a> {
    Plain(RwLockWriteGuard<'a, BackingGraph>),
    Tracked(TrackingWriteGuard<'a, BackingGraph>),
}

impl Deref for GraphWriteGuard<'_> {
    type Target = BackingGraph;

    fn deref(&self) -> &BackingGraph {
        match &self.0 {
            WriteInner::Plain(g) => &**g,
            WriteInner::Tracked(g) => &**g,
        }
    }
}

impl DerefMut for GraphWriteGuard<'_> {
    fn deref_mut(&mut self) -> &mut BackingGraph {
        match &mut self.0 {
            WriteInner::Plain(g) => &mut **g,
            WriteInner::Tracked(g) => &mut **g,
        }
    }
}

/// Cursor constructors for shared graphs.
///
/// A cursor owns a handle on its graph, so it is only available on
/// `Arc<LockableGraph>`.
pub trait SharedGraphExt {
    /// A cursor over all triples. See [`GraphCursor`] for the
    /// consistency contract.
    fn cursor(&self) -> GraphCursor;

    /// A cursor over the triples matching the given pattern,
    /// where `None` is a wildcard.
    fn filter(&self, s: Option<Resource>, p: Option<Iri>, o: Option<Term>) -> GraphCursor;
}

impl SharedGraphExt for Arc<LockableGraph> {
    fn cursor(&self) -> GraphCursor {
        self.filter(None, None, None)
    }

    fn filter(&self, s: Option<Resource>, p: Option<Iri>, o: Option<Term>) -> GraphCursor {
        GraphCursor {
            graph: self.clone(),
            s,
            p,
            o,
            last: None,
        }
    }
}

/// A cursor that re-acquires the graph's lock at every step.
///
/// [`advance`](GraphCursor::advance) takes the read lock for just that
/// step, and [`remove_current`](GraphCursor::remove_current) the write
/// lock likewise. A long-running traversal therefore never starves
/// writers — but the traversal is *not* a snapshot: a concurrent writer may
/// insert or delete triples between steps, and the cursor may observe a
/// result set that is neither the pre- nor the post-mutation state. This
/// availability-over-consistency trade-off is deliberate.
///
/// The cursor resumes from the last yielded triple's position in the
/// graph's stable enumeration order
/// (see [`Graph::next_match_after`](tessera_api::graph::Graph::next_match_after)),
/// so it holds no borrow and no lock between steps.
pub struct GraphCursor {
    graph: Arc<LockableGraph>,
    s: Option<Resource>,
    p: Option<Iri>,
    o: Option<Term>,
    last: Option<Triple>,
}

impl GraphCursor {
    /// Yields the next matching triple, taking the read lock for this step
    /// only. `None` means no matching triple currently lies behind the
    /// cursor position; a later call may yield again if a writer inserts
    /// behind the position in the meantime.
    pub fn advance(&mut self) -> Option<Triple> {
        let next = self.graph.lock.read().next_match_after(
            self.last.as_ref(),
            self.s.as_ref(),
            self.p.as_ref(),
            self.o.as_ref(),
        );
        if let Some(t) = &next {
            self.last = Some(t.clone());
        }
        next
    }

    /// Removes the triple last yielded by [`advance`](GraphCursor::advance),
    /// taking the write lock for this step only.
    ///
    /// Returns `false` if nothing was yielded yet, or if the triple has
    /// already been removed by someone else.
    pub fn remove_current(&mut self) -> bool {
        match &self.last {
            Some(t) => self.graph.lock.write().remove(t),
            None => false,
        }
    }
}

impl Iterator for GraphCursor {
    type Item = Triple;

    fn next(&mut self) -> Option<Triple> {
        self.advance()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;
    use tessera_api::term::Literal;
    use tessera_inmem::IndexedGraph;

    fn ex(suffix: &str) -> Iri {
        Iri::new_unchecked(format!("http://example.org/{suffix}"))
    }

    fn shared(triples: Vec<Triple>) -> Arc<LockableGraph> {
        let g: IndexedGraph = triples.into_iter().collect();
        Arc::new(LockableGraph::new(g))
    }

    #[test]
    fn single_call_operations() {
        let g = shared(vec![]);
        let t = Triple::new(ex("a"), ex("p"), ex("b"));
        assert!(g.add(t.clone()));
        assert!(!g.add(t.clone()));
        assert!(g.contains(&t));
        assert_eq!(g.len(), 1);
        assert!(g.remove(&t));
        assert!(g.is_empty());
    }

    #[test]
    fn read_lock_is_reentrant() {
        let g = shared(vec![Triple::new(ex("a"), ex("p"), ex("b"))]);
        let guard = g.read();
        // a second read acquisition on the same thread must not deadlock
        assert_eq!(g.len(), 1);
        drop(guard);
    }

    #[test]
    fn tracked_lock_reports_outstanding_guards() {
        let g = LockableGraph::new_tracked(IndexedGraph::new());
        assert!(g.held_locks().is_empty());

        let t = Triple::new(ex("a"), ex("p"), ex("b"));
        assert!(g.add(t.clone()));

        let guard = g.read();
        let held = g.held_locks();
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].kind, crate::debug::LockKind::Read);
        assert!(!held[0].backtrace.is_empty());
        assert!(guard.contains(&t));
        drop(guard);
        assert!(g.held_locks().is_empty());
    }

    #[test]
    fn plain_lock_reports_nothing() {
        // without TESSERA_LOCK_DEBUG in the environment, `new` picks the
        // plain lock and diagnostics stay empty
        if !debug::tracking_enabled() {
            let g = LockableGraph::new(IndexedGraph::new());
            let _guard = g.read();
            assert!(g.held_locks().is_empty());
        }
    }

    #[test]
    fn bulk_call_is_atomic_wrt_readers() {
        let g = shared(vec![]);
        let pair = |i: usize| {
            vec![
                Triple::new(ex(&format!("s{i}")), ex("p"), Literal::plain("1")),
                Triple::new(ex(&format!("s{i}")), ex("q"), Literal::plain("2")),
            ]
        };
        thread::scope(|s| {
            let writer = g.clone();
            s.spawn(move || {
                for i in 0..200 {
                    let ts = pair(i);
                    writer.add_all(ts.iter().cloned());
                    writer.remove_all(ts.iter());
                }
            });
            let reader = g.clone();
            s.spawn(move || {
                for _ in 0..500 {
                    // each add_all/remove_all call is atomic, so a reader
                    // never observes a torn pair
                    assert_eq!(reader.len() % 2, 0);
                }
            });
        });
    }

    #[test]
    fn cursor_iterates_and_removes() {
        let g = shared(vec![
            Triple::new(ex("a"), ex("p"), ex("b")),
            Triple::new(ex("a"), ex("p"), ex("c")),
            Triple::new(ex("d"), ex("q"), ex("e")),
        ]);
        let mut cursor = g.filter(None, Some(ex("p")), None);
        let mut n = 0;
        while cursor.advance().is_some() {
            assert!(cursor.remove_current());
            n += 1;
        }
        assert_eq!(n, 2);
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn cursor_is_not_a_snapshot() {
        let g = shared(vec![
            Triple::new(ex("a"), ex("p"), ex("b")),
            Triple::new(ex("c"), ex("p"), ex("d")),
        ]);
        let mut cursor = g.cursor();
        let first = cursor.advance().unwrap();
        assert_eq!(first, Triple::new(ex("a"), ex("p"), ex("b")));
        // a writer interleaves between cursor steps
        let late = Triple::new(ex("z"), ex("p"), ex("y"));
        g.add(late.clone());
        g.remove(&Triple::new(ex("c"), ex("p"), ex("d")));
        // the removal ahead of the cursor is observed, and so is the
        // insertion behind the enumeration position
        let rest: Vec<Triple> = cursor.collect();
        assert_eq!(rest, vec![late]);
    }

    #[test]
    fn exhausted_cursor_sees_later_insertions() {
        let g = shared(vec![Triple::new(ex("a"), ex("p"), ex("b"))]);
        let mut cursor = g.cursor();
        assert!(cursor.advance().is_some());
        assert!(cursor.advance().is_none());
        let late = Triple::new(ex("x"), ex("p"), ex("y"));
        g.add(late.clone());
        // weak consistency: the cursor is positional, not terminated
        assert_eq!(cursor.advance(), Some(late));
    }
}
