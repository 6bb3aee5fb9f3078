use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock ignoring poisoning. Tracker state stays usable after a host
/// callback panicked while holding it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
