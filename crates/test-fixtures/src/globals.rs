use beacon_core::traits::{GlobalScope, GlobalService};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Global scope backed by a `DashMap`.
#[derive(Default)]
pub struct FakeGlobals {
    bindings: DashMap<String, GlobalService>,
}

impl FakeGlobals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl GlobalScope for FakeGlobals {
    fn lookup(&self, name: &str) -> Option<GlobalService> {
        self.bindings.get(name).map(|r| r.value().clone())
    }

    fn define_if_absent(&self, name: &str, service: GlobalService) -> bool {
        match self.bindings.entry(name.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(service);
                true
            }
        }
    }
}
