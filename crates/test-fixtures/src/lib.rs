//! # test-fixtures
//!
//! In-memory simulated host page for Beacon tests: a node tree with
//! listener dispatch and batched mutation delivery, replaceable history
//! primitives, session storage, a global scope, and a transport that
//! records every beacon instead of sending it.

pub mod document;
pub mod globals;
pub mod history;
pub mod page;
pub mod storage;
pub mod transport;

pub use document::FakeDocument;
pub use globals::FakeGlobals;
pub use history::FakeHistory;
pub use page::{FakePage, FakePageBuilder};
pub use storage::MemoryStorage;
pub use transport::{RecordedRequest, RecordingTransport};

/// Let detached tasks and timers run. Intended for paused-clock tests,
/// where the sleep completes instantly once the runtime is idle.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
}
