use std::any::Any;
use std::sync::Arc;

pub type GlobalService = Arc<dyn Any + Send + Sync>;

/// Well-known binding points of the host page.
pub trait GlobalScope: Send + Sync {
    fn lookup(&self, name: &str) -> Option<GlobalService>;

    /// Bind `service` under `name` unless something is already bound there.
    /// Returns true when this call performed the binding.
    fn define_if_absent(&self, name: &str, service: GlobalService) -> bool;
}
