//! Vellum Core
//!
//! Foundational types shared by every Vellum crate:
//!
//! - **Geometry**: points, sizes and rectangles
//! - **Color**: 8-bit RGBA colors matching the native rasterizer's channel depth
//! - **Strokes**: line width, caps, joins and dash patterns
//! - **Draw Context**: the backend trait every rasterizer implements, plus a
//!   `RecordingContext` that records commands for deferred execution or tests
//! - **Handles**: arena keys identifying canvases, paints and drawables
//!
//! # Example
//!
//! ```rust
//! use vellum_core::{Brush, Color, DrawContext, Rect, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));
//! ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Brush::Solid(Color::BLUE));
//! assert_eq!(ctx.commands().len(), 1);
//! ```

pub mod brush;
pub mod color;
pub mod draw;
pub mod geometry;
pub mod handle;

pub use brush::{Brush, Gradient, GradientStop, GradientStops};
pub use color::Color;
pub use draw::{
    DrawCommand, DrawContext, LayerEffect, LineCap, LineJoin, RecordingContext, Stroke,
};
pub use geometry::{Point, Rect, Size};
pub use handle::{dirty_flag, CanvasId, DirtyFlag, DrawableId, PaintId};
