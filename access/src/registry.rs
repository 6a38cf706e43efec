use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tessera_api::term::Iri;

use crate::lockable::LockableGraph;
use crate::provider::{GraphProvider, NoSuchGraph};

struct Entry {
    weight: u32,
    seq: u64,
    provider: Arc<dyn GraphProvider>,
}

/// Makes a set of weighted [`GraphProvider`]s appear as one.
///
/// [`resolve`](GraphRegistry::resolve) tries the registered providers in
/// decreasing order of weight and returns the first graph found. Providers
/// sharing a weight are tried most-recently-registered first, so a late
/// registration shadows an earlier one of equal weight.
///
/// Registration and unregistration may happen concurrently with lookups.
/// Resolutions are never cached: a provider unregistered now is out of the
/// running for the very next `resolve` call, which either falls back to the
/// next provider serving the name or fails with [`NoSuchGraph`].
#[derive(Default)]
pub struct GraphRegistry {
    // sorted descending by (weight, seq)
    entries: RwLock<Vec<Entry>>,
    next_seq: AtomicU64,
}

impl GraphRegistry {
    /// Creates a registry with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider with the given weight.
    ///
    /// The same provider may be registered only once; registering it again
    /// moves it to the new weight.
    pub fn register(&self, provider: Arc<dyn GraphProvider>, weight: u32) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.entries.write();
        entries.retain(|e| !Arc::ptr_eq(&e.provider, &provider));
        let at = entries.partition_point(|e| (e.weight, e.seq) > (weight, seq));
        entries.insert(
            at,
            Entry {
                weight,
                seq,
                provider,
            },
        );
        log::debug!("registered graph provider with weight {weight}");
    }

    /// Unregisters a provider; returns `false` if it was not registered.
    ///
    /// Names served only through this provider fail to resolve from the
    /// next call on.
    pub fn unregister(&self, provider: &Arc<dyn GraphProvider>) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| !Arc::ptr_eq(&e.provider, provider));
        let removed = entries.len() != before;
        if removed {
            log::debug!("unregistered graph provider");
        }
        removed
    }

    /// Resolves `name` to the authoritative backing graph.
    ///
    /// Providers are consulted in decreasing `(weight, recency)` order; the
    /// first to serve the name wins. A `resolve` call sees every provider
    /// either fully registered or not at all.
    pub fn resolve(&self, name: &Iri) -> Result<Arc<LockableGraph>, NoSuchGraph> {
        // snapshot the provider order for this call, so that provider
        // lookups run without holding the registry lock
        let providers: Vec<Arc<dyn GraphProvider>> = self
            .entries
            .read()
            .iter()
            .map(|e| e.provider.clone())
            .collect();
        for provider in providers {
            if let Ok(graph) = provider.graph(name) {
                return Ok(graph);
            }
        }
        Err(NoSuchGraph(name.clone()))
    }

    /// The names currently served by at least one provider, deduplicated.
    pub fn graph_names(&self) -> Vec<Iri> {
        let providers: Vec<Arc<dyn GraphProvider>> = self
            .entries
            .read()
            .iter()
            .map(|e| e.provider.clone())
            .collect();
        let mut names = BTreeSet::new();
        for provider in providers {
            names.extend(provider.names());
        }
        names.into_iter().collect()
    }

    /// The number of registered providers.
    pub fn provider_count(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::provider::InMemoryGraphProvider;
    use tessera_api::triple::Triple;

    fn name(suffix: &str) -> Iri {
        Iri::new_unchecked(format!("http://example.org/{suffix}"))
    }

    /// A provider serving `name("g")`, whose graph holds one marker triple.
    fn marked_provider(marker: &str) -> Arc<dyn GraphProvider> {
        let provider = InMemoryGraphProvider::new();
        let g = provider.create_graph(name("g")).unwrap();
        g.add(Triple::new(name(marker), name("p"), name(marker)));
        Arc::new(provider)
    }

    fn marker_of(g: &Arc<LockableGraph>) -> Triple {
        let mut triples = g.snapshot();
        assert_eq!(triples.len(), 1);
        triples.pop().unwrap()
    }

    #[test]
    fn resolve_unknown_name() {
        let registry = GraphRegistry::new();
        assert!(registry.resolve(&name("nope")).is_err());
        registry.register(marked_provider("a"), 1);
        assert!(registry.resolve(&name("nope")).is_err());
        assert!(registry.resolve(&name("g")).is_ok());
    }

    #[test]
    fn highest_weight_wins_and_next_takes_over() {
        let _ = env_logger::builder().is_test(true).try_init();

        let registry = GraphRegistry::new();
        let low = marked_provider("low");
        let high = marked_provider("high");
        registry.register(low.clone(), 1);
        registry.register(high.clone(), 10);

        let g = registry.resolve(&name("g")).unwrap();
        assert_eq!(marker_of(&g).s(), &tessera_api::term::Resource::from(name("high")));

        // unregistration takes effect on the very next call
        assert!(registry.unregister(&high));
        let g = registry.resolve(&name("g")).unwrap();
        assert_eq!(marker_of(&g).s(), &tessera_api::term::Resource::from(name("low")));

        assert!(registry.unregister(&low));
        assert!(!registry.unregister(&low));
        assert!(registry.resolve(&name("g")).is_err());
    }

    #[test]
    fn equal_weight_ties_break_by_recency() {
        let registry = GraphRegistry::new();
        let first = marked_provider("first");
        let second = marked_provider("second");
        registry.register(first, 5);
        registry.register(second, 5);

        let g = registry.resolve(&name("g")).unwrap();
        assert_eq!(marker_of(&g).s(), &tessera_api::term::Resource::from(name("second")));
    }

    #[test]
    fn reregistering_moves_the_provider() {
        let registry = GraphRegistry::new();
        let a = marked_provider("a");
        let b = marked_provider("b");
        registry.register(a.clone(), 10);
        registry.register(b, 5);
        assert_eq!(registry.provider_count(), 2);

        registry.register(a, 1);
        assert_eq!(registry.provider_count(), 2);
        let g = registry.resolve(&name("g")).unwrap();
        assert_eq!(marker_of(&g).s(), &tessera_api::term::Resource::from(name("b")));
    }

    #[test]
    fn graph_names_are_deduplicated() {
        let registry = GraphRegistry::new();
        registry.register(marked_provider("a"), 1);
        registry.register(marked_provider("b"), 2);
        assert_eq!(registry.graph_names(), vec![name("g")]);
    }
}
