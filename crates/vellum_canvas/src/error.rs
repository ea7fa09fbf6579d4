//! Canvas and configuration errors

use thiserror::Error;
use vellum_core::{CanvasId, DrawableId, PaintId};
use vellum_paint::PaintError;

/// Errors from stage and canvas operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
    #[error("Unknown canvas: {0:?}")]
    UnknownCanvas(CanvasId),

    #[error("Unknown paint: {0:?}")]
    UnknownPaint(PaintId),

    #[error("Unknown drawable: {0:?}")]
    UnknownDrawable(DrawableId),

    #[error("Paint error: {0}")]
    Paint(#[from] PaintError),
}

/// Errors loading a `MotionConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
