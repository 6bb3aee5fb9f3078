//! Declarative event binding: class tokens of the form
//! `<prefix>--<event-type>--<event-value>` become capture-phase listeners
//! that emit event beacons.

pub mod binder;
pub mod grammar;
pub mod registry;

pub use binder::EventBinder;
pub use grammar::{BindingGrammar, BindingToken};
pub use registry::{BindingKey, ListenerRegistry};
