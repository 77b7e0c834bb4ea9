//! Unified error types surfaced by the runtime API.
use thiserror::Error;
use tokio::sync::oneshot;

use crate::world::LayoutError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("field worker command channel closed")]
    CommandChannelClosed,

    #[error("field worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("field worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("invalid runtime configuration: {reason}")]
    InvalidConfig { reason: &'static str },
}
