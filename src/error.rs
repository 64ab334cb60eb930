use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required platform capability is missing; no session can begin.
    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("event channel closed")]
    ChannelClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
