//! Adapter registry
//!
//! Owns every registered adapter and wires the cross-adapter lookup into
//! each one. Adapters hold the lookup as a weak back-reference, so a
//! dropped registry resolves nothing instead of leaking a cycle.

use crate::adapter::CrossChainAdapter;
use crate::{Error, Result};
use bridge_core::{ChainName, CrossChainRouter};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Registry of chain adapters
pub struct AdapterRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    adapters: RwLock<HashMap<ChainName, Arc<dyn CrossChainAdapter>>>,
}

impl AdapterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                adapters: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Register `adapter` under its chain and hand it the registry lookup.
    ///
    /// Re-registering a chain replaces the previous adapter.
    pub fn register(&self, adapter: Arc<dyn CrossChainAdapter>) {
        let chain = adapter.base().chain_name().clone();
        self.inner
            .adapters
            .write()
            .insert(chain.clone(), Arc::clone(&adapter));

        let weak = Arc::downgrade(&self.inner);
        adapter.inject_resolver(Arc::new(move |chain: &ChainName| {
            weak.upgrade()
                .and_then(|inner| inner.adapters.read().get(chain).cloned())
        }));

        info!(%chain, "adapter registered");
    }

    /// Find the adapter serving `chain`.
    pub fn find_adapter(&self, chain: &ChainName) -> Result<Arc<dyn CrossChainAdapter>> {
        self.inner
            .adapters
            .read()
            .get(chain)
            .cloned()
            .ok_or_else(|| Error::AdapterNotFound {
                chain: chain.clone(),
            })
    }

    /// Find the router carrying `token` from `from` to `to`.
    pub fn find_router(
        &self,
        token: &str,
        from: &ChainName,
        to: &ChainName,
    ) -> Result<CrossChainRouter> {
        let adapter = self.find_adapter(from)?;
        adapter
            .list_routers()
            .into_iter()
            .find(|router| router.token == token && &router.to == to)
            .ok_or_else(|| Error::RouterNotFound {
                token: token.to_string(),
                dest: to.clone(),
                network: from.clone(),
            })
    }

    /// Every lane served by the registered adapters.
    pub fn available_routers(&self) -> Vec<CrossChainRouter> {
        self.inner
            .adapters
            .read()
            .values()
            .flat_map(|adapter| adapter.list_routers())
            .collect()
    }

    /// Number of registered adapters.
    pub fn len(&self) -> usize {
        self.inner.adapters.read().len()
    }

    /// Whether no adapter is registered yet.
    pub fn is_empty(&self) -> bool {
        self.inner.adapters.read().is_empty()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
