//! Paint error types

use thiserror::Error;
use vellum_animation::MotionError;

/// Paint-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaintError {
    /// Gradient transitions need the same number of stops on both sides
    #[error("Gradient stop count mismatch: source has {source_stops}, target has {target_stops}")]
    GradientStopMismatch {
        source_stops: usize,
        target_stops: usize,
    },

    /// Operation needs a native paint built by `initialize_task`
    #[error("Paint used before initialize_task built its native paint")]
    NotInitialized,

    /// Operation only applies to solid color paints
    #[error("Operation requires a solid color paint")]
    NotSolid,

    /// Failure reading or writing an animated style property
    #[error("Motion property error: {0}")]
    Motion(#[from] MotionError),
}

/// Result type for paint operations
pub type Result<T> = std::result::Result<T, PaintError>;
