//! Vellum Motion Canvas
//!
//! Retained-mode scheduling of paint tasks over animated geometries:
//!
//! - **Stage**: arena owning canvases, paints and drawables
//! - **Canvas**: per-surface paint task list, validity and dirty flag
//! - **Frames**: `draw_frame` runs one paint pass per task in z-index order
//! - **Frame loop**: background thread redrawing dirty canvases
//! - **Configuration**: `MotionConfig`, loadable from TOML
//!
//! # Example
//!
//! ```ignore
//! use vellum_canvas::{MotionConfig, MotionStage, RectangleGeometry};
//! use vellum_core::{Color, Rect, RecordingContext, Size};
//! use vellum_paint::Paint;
//!
//! let mut stage = MotionStage::new(MotionConfig::default());
//! let canvas = stage.create_canvas();
//! let fill = stage.add_paint(Paint::solid(Color::BLUE));
//! let bar = stage.add_drawable(RectangleGeometry::new(Rect::new(0.0, 0.0, 20.0, 80.0)));
//! stage.add_geometry_to_paint_task(canvas, fill, bar)?;
//!
//! let mut backend = RecordingContext::new(Size::new(800.0, 600.0));
//! stage.draw_frame(canvas, &mut backend)?;
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod geometry;
pub mod stage;

pub use canvas::{CoreMotionCanvas, FrameStats};
pub use config::MotionConfig;
pub use error::{CanvasError, ConfigError, Result};
pub use frame_loop::FrameLoop;
pub use geometry::{CircleGeometry, LineGeometry, RectangleGeometry};
pub use stage::MotionStage;
