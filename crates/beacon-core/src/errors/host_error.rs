use super::error_code::{self, ErrorCode};

/// Failures reported by the host page through the environment traits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("session storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    #[error("host rejected {operation}: {reason}")]
    Rejected { operation: String, reason: String },
}

impl ErrorCode for HostError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable { .. } => error_code::STORAGE_UNAVAILABLE,
            Self::Rejected { .. } => error_code::HOST_REJECTED,
        }
    }
}
