//! Incremental binding of nodes inserted after a scan.

pub mod watcher;

pub use watcher::MutationWatcher;
