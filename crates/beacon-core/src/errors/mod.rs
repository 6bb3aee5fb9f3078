//! Error handling for Beacon.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod host_error;
pub mod transport_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use host_error::HostError;
pub use transport_error::TransportError;

/// Top-level error aggregating subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum BeaconError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

impl ErrorCode for BeaconError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Transport(e) => e.error_code(),
            Self::Host(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type BeaconResult<T> = Result<T, BeaconError>;
