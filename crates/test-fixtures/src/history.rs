//! History with replaceable primitive slots.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use beacon_core::errors::HostError;
use beacon_core::traits::{History, HistoryCall, HistoryMethod, NavigationPrimitive};

/// The host's own primitive: records the target url as a history entry.
struct LocationPrimitive {
    method: HistoryMethod,
    entries: Arc<Mutex<Vec<(HistoryMethod, Option<String>)>>>,
    reject: Arc<AtomicBool>,
}

impl NavigationPrimitive for LocationPrimitive {
    fn invoke(&self, call: &HistoryCall) -> Result<(), HostError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(HostError::Rejected {
                operation: self.method.as_str().to_string(),
                reason: "cross-origin url".to_string(),
            });
        }
        self.entries
            .lock()
            .unwrap()
            .push((self.method, call.url.clone()));
        Ok(())
    }
}

pub struct FakeHistory {
    slots: Mutex<HashMap<HistoryMethod, Arc<dyn NavigationPrimitive>>>,
    entries: Arc<Mutex<Vec<(HistoryMethod, Option<String>)>>>,
    reject: Arc<AtomicBool>,
}

impl FakeHistory {
    pub fn new() -> Self {
        let entries = Arc::new(Mutex::new(Vec::new()));
        let reject = Arc::new(AtomicBool::new(false));
        let mut slots: HashMap<HistoryMethod, Arc<dyn NavigationPrimitive>> = HashMap::new();
        for method in HistoryMethod::ALL {
            slots.insert(
                method,
                Arc::new(LocationPrimitive {
                    method,
                    entries: Arc::clone(&entries),
                    reject: Arc::clone(&reject),
                }),
            );
        }
        Self {
            slots: Mutex::new(slots),
            entries,
            reject,
        }
    }

    /// Call whatever primitive currently occupies the slot, as host code would.
    pub fn call(&self, method: HistoryMethod, call: HistoryCall) -> Result<(), HostError> {
        let primitive = self.primitive(method);
        primitive.invoke(&call)
    }

    pub fn push_state(&self, url: &str) -> Result<(), HostError> {
        self.call(HistoryMethod::Push, HistoryCall::to(url))
    }

    pub fn replace_state(&self, url: &str) -> Result<(), HostError> {
        self.call(HistoryMethod::Replace, HistoryCall::to(url))
    }

    /// Make the underlying primitives fail from now on.
    pub fn reject_calls(&self) {
        self.reject.store(true, Ordering::SeqCst);
    }

    /// Entries recorded by the underlying host primitives.
    pub fn entries(&self) -> Vec<(HistoryMethod, Option<String>)> {
        self.entries.lock().unwrap().clone()
    }
}

impl Default for FakeHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History for FakeHistory {
    fn primitive(&self, method: HistoryMethod) -> Arc<dyn NavigationPrimitive> {
        let slots = self.slots.lock().unwrap();
        Arc::clone(&slots[&method])
    }

    fn set_primitive(&self, method: HistoryMethod, primitive: Arc<dyn NavigationPrimitive>) {
        self.slots.lock().unwrap().insert(method, primitive);
    }
}
