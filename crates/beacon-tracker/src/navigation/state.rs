use std::sync::{Arc, Mutex};

use beacon_core::models::NavigationState;

use crate::sync::lock;

/// Navigation state shared between the tracker, the listeners it binds, and
/// the public entry point. Only the navigation tracker advances it.
#[derive(Debug, Clone)]
pub struct SharedNavigation {
    inner: Arc<Mutex<NavigationState>>,
}

impl SharedNavigation {
    pub fn new(state: NavigationState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn snapshot(&self) -> NavigationState {
        lock(&self.inner).clone()
    }

    pub fn current_url(&self) -> String {
        lock(&self.inner).url.clone()
    }

    /// Move to `url` and return the resulting state.
    pub(crate) fn advance(&self, url: String) -> NavigationState {
        lock(&self.inner).advance(url).clone()
    }
}
