use std::sync::Arc;

use storage::Store;
use storage::services::access::AccessPolicy;

/// Shared handler state: the backing store and the access policy built from config.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub policy: Arc<AccessPolicy>,
}

impl AppState {
    pub fn new<S>(store: S, policy: AccessPolicy) -> Self
    where
        S: Store + 'static,
    {
        Self {
            store: Arc::new(store),
            policy: Arc::new(policy),
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
