//! Fatal error types for the layout engine.
//!
//! Per the error handling design, only genuinely unrecoverable conditions
//! become a `LayoutError`. Grid-placement escapes, convergence-cap timeouts,
//! and numeric anomalies (zero-magnitude directions, NaN after integration)
//! are soft: they are logged and clamped in place rather than surfaced here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
  #[error("input format error: {0}")]
  InputFormat(String),

  #[error("configuration error: {0}")]
  Configuration(String),

  #[error("graph has no vertices to lay out")]
  GraphTooSmall,

  #[error("failed to spawn worker thread: {0}")]
  ThreadFailure(#[from] std::io::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
