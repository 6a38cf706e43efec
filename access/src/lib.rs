//! This crate is part of [Tessera],
//! a concurrently-accessed [RDF] named-graph core in Rust.
//!
//! It provides shared access to named graphs:
//! * [`LockableGraph`] puts any backing graph behind a per-graph
//!   read/write lock, with single-call lock scope for every operation;
//! * [`GraphCursor`] iterates a lockable graph by re-acquiring the lock at
//!   every step, trading snapshot consistency for writer availability;
//! * [`GraphRegistry`] resolves a graph name against dynamically
//!   registered, weighted [`GraphProvider`]s;
//! * [`debug`] offers an instrumented lock variant for deadlock diagnosis.
//!
//! [Tessera]: https://docs.rs/tessera/latest/tessera/
//! [RDF]: https://www.w3.org/TR/rdf11-concepts/
#![deny(missing_docs)]

pub mod debug;
mod lockable;
pub use lockable::*;
mod provider;
pub use provider::*;
mod registry;
pub use registry::*;
