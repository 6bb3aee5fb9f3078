//! ErrorCode trait for stable, machine-readable error identifiers.

/// Every error enum implements this to provide a structured error code
/// string for host-side bindings and log correlation.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
pub const CLIENT_BUILD_FAILED: &str = "CLIENT_BUILD_FAILED";
pub const SERIALIZATION_FAILED: &str = "SERIALIZATION_FAILED";
pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
pub const HOST_REJECTED: &str = "HOST_REJECTED";
