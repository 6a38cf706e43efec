//! A concurrently-accessed [RDF] named-graph core.
//!
//! Each piece of knowledge in RDF (a *statement*) is a [triple] of three
//! [term]s, and a deduplicated set of triples forms a [graph]. This crate
//! gathers the core that stores and reworks such graphs:
//!
//! * [`api`] — terms, triples and the graph traits;
//! * [`inmem`] — the default indexed in-memory graph;
//! * [`access`] — per-graph locking, weak-consistency cursors and the
//!   weighted provider registry resolving graph names;
//! * [`smush`] — equivalence-class canonicalization (`owl:sameAs` merging);
//! * [`isomorphism`] — exact blank-node graph-isomorphism matching.
//!
//! [RDF]: https://www.w3.org/TR/rdf11-concepts/
//! [triple]: api::triple
//! [term]: api::term
//! [graph]: api::graph
//!
//! # Getting started
//!
//! ```
//! use std::sync::Arc;
//! use tessera::access::{GraphRegistry, InMemoryGraphProvider};
//! use tessera::prelude::*;
//!
//! let provider = Arc::new(InMemoryGraphProvider::new());
//! let name = Iri::new("http://example.org/g").unwrap();
//! provider.create_graph(name.clone()).unwrap();
//!
//! let registry = GraphRegistry::new();
//! registry.register(provider, 10);
//!
//! let graph = registry.resolve(&name).unwrap();
//! graph.add(Triple::new(
//!     Iri::new("http://example.org/alice").unwrap(),
//!     Iri::new("http://example.org/knows").unwrap(),
//!     Iri::new("http://example.org/bob").unwrap(),
//! ));
//! assert_eq!(graph.len(), 1);
//! ```
#![deny(missing_docs)]

pub use tessera_access as access;
pub use tessera_api as api;
pub use tessera_inmem as inmem;
pub use tessera_isomorphism as isomorphism;
pub use tessera_smush as smush;

/// A prelude re-exporting the most commonly used types and traits.
pub mod prelude {
    pub use tessera_access::{
        GraphCursor, GraphProvider, GraphRegistry, LockableGraph, SharedGraphExt,
    };
    pub use tessera_api::prelude::*;
    pub use tessera_inmem::IndexedGraph;
    pub use tessera_isomorphism::{are_isomorphic, match_graphs, Isomorphism};
    pub use tessera_smush::{SameAsSmusher, Smusher};
}
