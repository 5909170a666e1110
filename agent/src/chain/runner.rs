use crate::chain::iter::ChainIter;
use crate::chain::models::WalkError;
use graph::GraphStore;
use providers::BaseProvider;

/// Walks agent chains from a store through a provider
pub struct ChainWalker<S: GraphStore, P: BaseProvider> {
    store: S,
    provider: P,
    max_hops: Option<usize>,
}

impl<S: GraphStore, P: BaseProvider> ChainWalker<S, P> {
    pub fn new(store: S, provider: P) -> Self {
        ChainWalker {
            store,
            provider,
            max_hops: None,
        }
    }

    /// Bound the number of agents one walk may visit. `None` leaves the walk
    /// unbounded, so a cyclic chain never terminates.
    pub fn with_max_hops(mut self, max_hops: Option<usize>) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Give back the store and provider, e.g. to close the store
    pub fn into_parts(self) -> (S, P) {
        (self.store, self.provider)
    }

    /// Create an iterator that visits the chain one agent at a time
    pub fn iter(&self, node_id: &str, carried_response: &str) -> ChainIter<'_, S, P> {
        ChainIter::new(
            &self.store,
            &self.provider,
            self.max_hops,
            node_id.to_string(),
            carried_response.to_string(),
        )
    }

    /// Walk the chain starting at `node_id` and return the last response.
    ///
    /// A missing start node returns `carried_response` unchanged; a provider
    /// rejection returns an "Error processing agent" string. Only transport
    /// failures and the hop limit are errors.
    pub async fn walk(&self, node_id: &str, carried_response: &str) -> Result<String, WalkError> {
        let mut iter = self.iter(node_id, carried_response);
        while let Some(step) = iter.next().await {
            step?;
        }
        Ok(iter.into_result().unwrap_or_default())
    }
}
