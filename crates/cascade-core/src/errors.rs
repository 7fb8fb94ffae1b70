//! Cross-cutting error types for Cascade.
//!
//! Domain-specific errors (`ConfigError`, `GatewayError`, `SyncError`) are
//! defined in their respective crates. The binary converges them through
//! `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Cascade crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A run state machine transition was attempted that is not allowed.
    #[error("Invalid run state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
