//! Vellum Paint Tasks
//!
//! A paint is a drawing style (solid color, linear or radial gradient) plus
//! the set of geometries it is responsible for on each canvas it is attached
//! to. During a frame each paint runs one *pass*:
//!
//! ```text
//! Uninitialized ──initialize_task──▶ Initialized ──dispose──▶ Disposed
//!                                     │  ▲                      │
//!                  apply/restore_opacity_mask per geometry      │
//!       ▲                                                       │
//!       └───────────────── next frame rebuilds ◀────────────────┘
//! ```
//!
//! Initialization may push clip and image-filter state onto the backend; the
//! matching `dispose` pops it. `PaintPass` pairs the two so every frame leaves
//! the backend's state stacks as it found them.
//!
//! # Example
//!
//! ```ignore
//! use vellum_paint::{Paint, PaintContext};
//! use vellum_core::{Color, RecordingContext, Size};
//!
//! let mut paint = Paint::solid(Color::RED);
//! let mut backend = RecordingContext::new(Size::new(800.0, 600.0));
//! let mut ctx = PaintContext::new(&mut backend, canvas);
//!
//! let mut pass = paint.begin_pass(&mut ctx)?;
//! pass.draw(&mut rectangle)?;
//! // dropping the pass disposes the paint and restores the clip
//! ```

pub mod context;
pub mod drawable;
pub mod effects;
pub mod error;
pub mod gradient;
pub mod native;
pub mod paint;

pub use context::PaintContext;
pub use drawable::{Drawable, PaintPass};
pub use effects::{ImageFilter, PathEffect};
pub use error::{PaintError, Result};
pub use gradient::{LinearGradient, RadialGradient};
pub use native::NativePaint;
pub use paint::{Paint, PaintKind, PaintStyle};
