//! This crate is part of [Tessera],
//! a concurrently-accessed [RDF] named-graph core in Rust.
//!
//! It provides the default in-memory implementation of
//! [`MutableGraph`](tessera_api::graph::MutableGraph):
//! an [`IndexedGraph`] backed by three triple indexes.
//!
//! [Tessera]: https://docs.rs/tessera/latest/tessera/
//! [RDF]: https://www.w3.org/TR/rdf11-concepts/
#![deny(missing_docs)]

mod graph;
pub use graph::*;
mod index;
pub use index::*;
