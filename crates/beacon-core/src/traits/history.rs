//! Host navigation primitives.

use std::sync::Arc;

use crate::errors::HostError;

/// The two history-mutation primitives the tracker intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryMethod {
    Push,
    Replace,
}

impl HistoryMethod {
    pub const ALL: [HistoryMethod; 2] = [HistoryMethod::Push, HistoryMethod::Replace];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "pushState",
            Self::Replace => "replaceState",
        }
    }
}

/// Arguments of one programmatic route change.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryCall {
    pub state: serde_json::Value,
    pub title: String,
    /// Navigation target, absolute or relative. Absent for state-only calls.
    pub url: Option<String>,
}

impl HistoryCall {
    pub fn to(url: impl Into<String>) -> Self {
        Self {
            state: serde_json::Value::Null,
            title: String::new(),
            url: Some(url.into()),
        }
    }
}

pub trait NavigationPrimitive: Send + Sync {
    fn invoke(&self, call: &HistoryCall) -> Result<(), HostError>;
}

/// Replaceable slots holding the host's current primitives.
pub trait History: Send + Sync {
    fn primitive(&self, method: HistoryMethod) -> Arc<dyn NavigationPrimitive>;

    fn set_primitive(&self, method: HistoryMethod, primitive: Arc<dyn NavigationPrimitive>);
}
