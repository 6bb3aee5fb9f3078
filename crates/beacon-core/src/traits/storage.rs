use crate::errors::HostError;

/// Page-scoped ephemeral key/value storage.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError>;
}
