use super::error_code::{self, ErrorCode};

/// Beacon delivery errors. Never surfaced to the host page at runtime;
/// the collector logs and drops them.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("http client construction failed: {reason}")]
    ClientBuild { reason: String },

    #[error("beacon serialization failed: {reason}")]
    Serialization { reason: String },
}

impl ErrorCode for TransportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Network { .. } => error_code::NETWORK_ERROR,
            Self::ClientBuild { .. } => error_code::CLIENT_BUILD_FAILED,
            Self::Serialization { .. } => error_code::SERIALIZATION_FAILED,
        }
    }
}
