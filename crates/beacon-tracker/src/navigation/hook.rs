use std::sync::Arc;

use beacon_core::errors::HostError;
use beacon_core::traits::{HistoryCall, HistoryMethod, NavigationPrimitive};

/// Side effect run before a hooked primitive forwards its call.
pub type NavigationHook = Arc<dyn Fn(HistoryMethod, &HistoryCall) + Send + Sync>;

/// Decorator around a host navigation primitive. Runs the hook, then
/// forwards the unchanged call to the original and returns its result.
pub struct HookedPrimitive {
    method: HistoryMethod,
    original: Arc<dyn NavigationPrimitive>,
    hook: NavigationHook,
}

impl HookedPrimitive {
    pub fn new(
        method: HistoryMethod,
        original: Arc<dyn NavigationPrimitive>,
        hook: NavigationHook,
    ) -> Self {
        Self {
            method,
            original,
            hook,
        }
    }
}

impl NavigationPrimitive for HookedPrimitive {
    fn invoke(&self, call: &HistoryCall) -> Result<(), HostError> {
        (self.hook)(self.method, call);
        self.original.invoke(call)
    }
}
