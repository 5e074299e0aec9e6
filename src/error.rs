//! Error types.
//!
//! Only [`ConfigError`] crosses the public API as a failure. [`TransformError`]
//! is returned by the transform operations so callers can tell why nothing
//! happened; the pointer state machine logs it and carries on.

use crate::scene::ObjectId;

/// Why a transform or insertion left the scene untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The hit test found nothing to act on.
    #[error("no target under pointer")]
    MissingTarget,
    /// The object was removed from the scene since it was selected.
    #[error("object no longer in scene: {0}")]
    StaleReference(ObjectId),
    /// The object is locked against transforms.
    #[error("object is locked: {0}")]
    Locked(ObjectId),
    /// The asset factory produced no drawable.
    #[error("asset construction failed")]
    AssetFailure,
    /// Rendered bounds have zero extent on the axis a resize divides by.
    #[error("degenerate bounds: {0}")]
    DegenerateBounds(ObjectId),
}

/// Errors produced while building an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An env var was set to something that is not a number.
    #[error("config parse failed: {var}={value:?}")]
    Parse { var: String, value: String },
    /// A numeric setting must be finite and strictly positive.
    #[error("config value out of range: {var} must be finite and > 0, got {value}")]
    NotPositive { var: String, value: f64 },
}
