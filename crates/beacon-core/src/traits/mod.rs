//! Host-environment seams. The tracker touches the embedding page only
//! through these traits.

pub mod globals;
pub mod history;
pub mod host;
pub mod mutation;
pub mod node_tree;
pub mod storage;
pub mod transport;

pub use globals::{GlobalScope, GlobalService};
pub use history::{History, HistoryCall, HistoryMethod, NavigationPrimitive};
pub use host::{EmbeddingElement, HostEnvironment};
pub use mutation::{
    MutationCallback, MutationKind, MutationObserverApi, MutationRecord, ObservationHandle,
    ObserveOptions,
};
pub use node_tree::{Listener, ListenerCallback, ListenerId, ListenerOptions, NodeId, NodeTree};
pub use storage::SessionStorage;
pub use transport::{BeaconTransport, CollectResponse};
