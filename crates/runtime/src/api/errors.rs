//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and player intake so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::IntakeError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("combat scheduler command channel closed")]
    CommandChannelClosed,

    #[error("combat scheduler reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("event channel for {topic} closed")]
    EventChannelClosed { topic: crate::events::Topic },

    #[error("combat scheduler join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an initial combat state before building")]
    MissingState,

    #[error("action rejected: {0}")]
    Rejected(#[from] IntakeError),

    #[error("player action provider failed: {0}")]
    Provider(String),
}
