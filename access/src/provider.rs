use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tessera_api::term::Iri;
use tessera_inmem::IndexedGraph;

use crate::lockable::LockableGraph;

/// Error raised when a graph name is not recognized by any provider.
///
/// `resolve` never degrades to an empty graph: an unknown name is a typed
/// error, so that callers cannot silently query the void.
#[derive(Clone, Debug, thiserror::Error)]
#[error("no graph named {0}")]
pub struct NoSuchGraph(pub Iri);

/// Error raised when creating a graph under an already-used name.
#[derive(Clone, Debug, thiserror::Error)]
#[error("a graph named {0} already exists")]
pub struct GraphAlreadyExists(pub Iri);

/// A source of named graphs, pluggable into a
/// [`GraphRegistry`](crate::GraphRegistry).
///
/// Implementations may be backed by memory, files or anything else; the
/// registry only requires that a graph resolved twice under the same name
/// is the same [`LockableGraph`] instance (otherwise its lock would not
/// mediate between the callers).
pub trait GraphProvider: Send + Sync {
    /// The graph registered under `name`, if this provider has it.
    fn graph(&self, name: &Iri) -> Result<Arc<LockableGraph>, NoSuchGraph>;

    /// The names this provider currently serves.
    fn names(&self) -> Vec<Iri>;

    /// Whether this provider currently serves `name`.
    fn has_graph(&self, name: &Iri) -> bool {
        self.graph(name).is_ok()
    }
}

/// The default provider, holding named [`IndexedGraph`]s in memory.
#[derive(Default)]
pub struct InMemoryGraphProvider {
    graphs: RwLock<HashMap<Iri, Arc<LockableGraph>>>,
}

impl InMemoryGraphProvider {
    /// Creates a provider with no graphs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph under `name` and returns it.
    pub fn create_graph(&self, name: Iri) -> Result<Arc<LockableGraph>, GraphAlreadyExists> {
        let mut graphs = self.graphs.write();
        if graphs.contains_key(&name) {
            return Err(GraphAlreadyExists(name));
        }
        let graph = Arc::new(LockableGraph::new(IndexedGraph::new()));
        graphs.insert(name, graph.clone());
        Ok(graph)
    }

    /// Deletes the graph registered under `name`.
    ///
    /// Callers still holding the graph keep a working handle; the provider
    /// merely stops serving it.
    pub fn delete_graph(&self, name: &Iri) -> Result<(), NoSuchGraph> {
        match self.graphs.write().remove(name) {
            Some(_) => Ok(()),
            None => Err(NoSuchGraph(name.clone())),
        }
    }
}

impl GraphProvider for InMemoryGraphProvider {
    fn graph(&self, name: &Iri) -> Result<Arc<LockableGraph>, NoSuchGraph> {
        self.graphs
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| NoSuchGraph(name.clone()))
    }

    fn names(&self) -> Vec<Iri> {
        self.graphs.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tessera_api::triple::Triple;

    fn name(suffix: &str) -> Iri {
        Iri::new_unchecked(format!("http://example.org/graphs/{suffix}"))
    }

    #[test]
    fn create_resolve_delete() {
        let provider = InMemoryGraphProvider::new();
        let g = provider.create_graph(name("g1")).unwrap();
        g.add(Triple::new(name("a"), name("p"), name("b")));

        assert!(provider.has_graph(&name("g1")));
        // the same instance is served on every call
        let again = provider.graph(&name("g1")).unwrap();
        assert!(Arc::ptr_eq(&g, &again));

        assert!(provider.create_graph(name("g1")).is_err());

        provider.delete_graph(&name("g1")).unwrap();
        assert!(!provider.has_graph(&name("g1")));
        assert!(provider.delete_graph(&name("g1")).is_err());
        // the survivor handle still works
        assert_eq!(g.len(), 1);
    }
}
