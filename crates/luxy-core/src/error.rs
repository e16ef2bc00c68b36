use thiserror::Error;

/// Failures surfaced by the parallax controller and its hosts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LuxyError {
    /// The configured wrapper id matched no element; nothing was mutated.
    #[error("wrapper element #{id} not found")]
    WrapperNotFound { id: String },
    #[error("invalid target selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("invalid option `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },
    /// The host refused to schedule a frame or timer.
    #[error("scheduling failed: {0}")]
    Scheduling(String),
}

pub type Result<T, E = LuxyError> = std::result::Result<T, E>;
