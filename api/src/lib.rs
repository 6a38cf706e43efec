//! This crate is part of [Tessera],
//! a concurrently-accessed [RDF] named-graph core in Rust.
//!
//! It defines the value types every other component operates on
//! ([terms](term), [triples](triple))
//! and the [`Graph`](graph::Graph) / [`MutableGraph`](graph::MutableGraph)
//! traits implemented by backing stores.
//!
//! [Tessera]: https://docs.rs/tessera/latest/tessera/
//! [RDF]: https://www.w3.org/TR/rdf11-concepts/
#![deny(missing_docs)]

pub mod graph;
pub mod ns;
pub mod prelude;
pub mod term;
pub mod triple;
