//! A debug-instrumented read/write lock, for deadlock diagnosis.
//!
//! [`TrackingRwLock`] records, for every outstanding guard, the acquiring
//! thread and a capture of its call stack. It is optional tooling, never
//! required for correctness, and is only engaged when the
//! `TESSERA_LOCK_DEBUG` environment variable is set to `true` (or when
//! constructed with [`TrackingRwLock::new_tracking`]).

use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

const DEBUG_MODE: &str = "TESSERA_LOCK_DEBUG";

/// Whether the environment asks for debug-instrumented locks.
pub(crate) fn tracking_enabled() -> bool {
    std::env::var(DEBUG_MODE)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Whether this lock acquisition was for reading or writing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockKind {
    /// A shared read acquisition.
    Read,
    /// An exclusive write acquisition.
    Write,
}

/// A record of one currently outstanding guard.
#[derive(Clone, Debug)]
pub struct HeldLock {
    /// Read or write.
    pub kind: LockKind,
    /// The acquiring thread, as `{:?}` of its id.
    pub thread: String,
    /// The acquisition call stack.
    pub backtrace: String,
}

/// A read/write lock that can report who currently holds it.
pub struct TrackingRwLock<T> {
    inner: RwLock<T>,
    tracking: bool,
    held: Mutex<HashMap<u64, HeldLock>>,
    next_id: AtomicU64,
}

impl<T> TrackingRwLock<T> {
    /// Wraps `value`; tracking is engaged iff `TESSERA_LOCK_DEBUG=true`.
    pub fn new(value: T) -> Self {
        Self::with_tracking(value, tracking_enabled())
    }

    /// Wraps `value` with tracking unconditionally engaged.
    pub fn new_tracking(value: T) -> Self {
        Self::with_tracking(value, true)
    }

    fn with_tracking(value: T, tracking: bool) -> Self {
        TrackingRwLock {
            inner: RwLock::new(value),
            tracking,
            held: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    fn record(&self, kind: LockKind) -> Option<u64> {
        if !self.tracking {
            return None;
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.held.lock().insert(
            id,
            HeldLock {
                kind,
                thread: format!("{:?}", std::thread::current().id()),
                backtrace: Backtrace::force_capture().to_string(),
            },
        );
        Some(id)
    }

    fn release(&self, id: Option<u64>) {
        if let Some(id) = id {
            self.held.lock().remove(&id);
        }
    }

    /// Acquires the read lock, blocking indefinitely.
    pub fn read(&self) -> TrackingReadGuard<'_, T> {
        let guard = self.inner.read_recursive();
        let id = self.record(LockKind::Read);
        TrackingReadGuard {
            owner: self,
            guard,
            id,
        }
    }

    /// Acquires the write lock, blocking indefinitely.
    pub fn write(&self) -> TrackingWriteGuard<'_, T> {
        let guard = self.inner.write();
        let id = self.record(LockKind::Write);
        TrackingWriteGuard {
            owner: self,
            guard,
            id,
        }
    }

    /// The guards currently outstanding, with their acquisition stacks.
    ///
    /// Empty when tracking is not engaged.
    pub fn held_locks(&self) -> Vec<HeldLock> {
        self.held.lock().values().cloned().collect()
    }
}

/// A tracked read guard; releases its record on drop.
pub struct TrackingReadGuard<'a, T> {
    owner: &'a TrackingRwLock<T>,
    guard: RwLockReadGuard<'a, T>,
    id: Option<u64>,
}

impl<T> std::ops::Deref for TrackingReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> Drop for TrackingReadGuard<'_, T> {
    fn drop(&mut self) {
        self.owner.release(self.id);
    }
}

/// A tracked write guard; releases its record on drop.
pub struct TrackingWriteGuard<'a, T> {
    owner: &'a TrackingRwLock<T>,
    guard: RwLockWriteGuard<'a, T>,
    id: Option<u64>,
}

impl<T> std::ops::Deref for TrackingWriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> std::ops::DerefMut for TrackingWriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> Drop for TrackingWriteGuard<'_, T> {
    fn drop(&mut self) {
        self.owner.release(self.id);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tracks_outstanding_guards() {
        let lock = TrackingRwLock::new_tracking(42);
        assert!(lock.held_locks().is_empty());
        {
            let r1 = lock.read();
            let r2 = lock.read();
            assert_eq!(*r1 + *r2, 84);
            let held = lock.held_locks();
            assert_eq!(held.len(), 2);
            assert!(held.iter().all(|h| h.kind == LockKind::Read));
            assert!(!held[0].backtrace.is_empty());
        }
        assert!(lock.held_locks().is_empty());
        {
            let mut w = lock.write();
            *w += 1;
            assert_eq!(lock.held_locks()[0].kind, LockKind::Write);
        }
        assert!(lock.held_locks().is_empty());
    }

    #[test]
    fn untracked_by_default_without_env() {
        // without TESSERA_LOCK_DEBUG in the environment, tracking is off
        if std::env::var(DEBUG_MODE).is_err() {
            let lock = TrackingRwLock::new(1);
            let _guard = lock.read();
            assert!(lock.held_locks().is_empty());
        }
    }
}
