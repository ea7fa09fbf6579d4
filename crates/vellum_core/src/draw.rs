//! Draw Context - backend rendering API
//!
//! The `DrawContext` trait is the boundary between Vellum's paint/animation
//! core and whatever rasterizer a front-end plugs in. The core only ever
//! pushes and pops clip rectangles and layer effects, and issues fill or
//! stroke calls with a resolved `Brush`.
//!
//! Every `push_*` must be matched by the corresponding `pop_*`; the
//! `RecordingContext` exposes its stack depths so callers can verify that a
//! frame left the surface balanced.
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     ctx.push_clip(Rect::new(0.0, 0.0, 200.0, 100.0));
//!     ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::BLUE.into());
//!     ctx.pop_clip();
//! }
//! ```

use smallvec::SmallVec;

use crate::brush::Brush;
use crate::color::Color;
use crate::geometry::{Point, Rect, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the endpoint
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint
    Round,
    /// Square cap extending past the endpoint
    Square,
}

/// Line join style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    /// Miter join (sharp corner)
    #[default]
    Miter,
    /// Round join
    Round,
    /// Bevel join (flat corner)
    Bevel,
}

/// Stroke style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Line join style
    pub join: LineJoin,
    /// Miter limit (for Miter joins)
    pub miter_limit: f32,
    /// Dash pattern (empty for solid line)
    pub dash: SmallVec<[f32; 4]>,
    /// Dash offset
    pub dash_offset: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
            dash: SmallVec::new(),
            dash_offset: 0.0,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn with_miter_limit(mut self, miter_limit: f32) -> Self {
        self.miter_limit = miter_limit;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layer Effects
// ─────────────────────────────────────────────────────────────────────────────

/// Image filter applied to everything drawn while the effect is pushed
#[derive(Clone, Debug, PartialEq)]
pub enum LayerEffect {
    /// Gaussian blur
    Blur { sigma_x: f32, sigma_y: f32 },
    /// Drop shadow rendered behind the content
    DropShadow {
        dx: f32,
        dy: f32,
        sigma_x: f32,
        sigma_y: f32,
        color: Color,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Backend drawing surface
///
/// Implemented by every rasterizer. Supplied by the platform front-end and
/// borrowed by the paint core for the duration of one frame.
pub trait DrawContext {
    // ─────────────────────────────────────────────────────────────────────────
    // State stacks
    // ─────────────────────────────────────────────────────────────────────────

    /// Save the surface state and intersect the clip with `rect`
    fn push_clip(&mut self, rect: Rect);

    /// Restore the surface state saved by the matching `push_clip`
    fn pop_clip(&mut self);

    /// Number of clips currently pushed
    fn clip_depth(&self) -> usize;

    /// Start applying an image filter to subsequent draws
    fn push_effect(&mut self, effect: LayerEffect);

    /// Stop applying the most recently pushed image filter
    fn pop_effect(&mut self);

    /// Enable or disable antialiasing for subsequent draws
    fn set_antialias(&mut self, _enabled: bool) {}

    // ─────────────────────────────────────────────────────────────────────────
    // 2D Drawing
    // ─────────────────────────────────────────────────────────────────────────

    fn fill_rect(&mut self, rect: Rect, brush: Brush);

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, brush: Brush);

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush);

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, brush: Brush);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, brush: Brush);

    /// Size of the drawing surface
    fn viewport_size(&self) -> Size;
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushClip(Rect),
    PopClip,
    PushEffect(LayerEffect),
    PopEffect,
    SetAntialias(bool),

    // 2D Drawing
    FillRect {
        rect: Rect,
        brush: Brush,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
        brush: Brush,
    },
    FillCircle {
        center: Point,
        radius: f32,
        brush: Brush,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        stroke: Stroke,
        brush: Brush,
    },
    StrokeLine {
        from: Point,
        to: Point,
        stroke: Stroke,
        brush: Brush,
    },
}

impl DrawCommand {
    /// Brush used by a drawing command, `None` for state commands
    pub fn brush(&self) -> Option<&Brush> {
        match self {
            DrawCommand::FillRect { brush, .. }
            | DrawCommand::StrokeRect { brush, .. }
            | DrawCommand::FillCircle { brush, .. }
            | DrawCommand::StrokeCircle { brush, .. }
            | DrawCommand::StrokeLine { brush, .. } => Some(brush),
            _ => None,
        }
    }
}

/// A draw context that records commands for later execution
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
    effect_depth: usize,
    viewport: Size,
}

impl RecordingContext {
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            clip_stack: Vec::new(),
            effect_depth: 0,
            viewport,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of image filters currently pushed
    pub fn effect_depth(&self) -> usize {
        self.effect_depth
    }

    /// Brushes of every recorded drawing command, in order
    pub fn brushes(&self) -> impl Iterator<Item = &Brush> + '_ {
        self.commands.iter().filter_map(DrawCommand::brush)
    }

    /// Clear all recorded commands and reset the state stacks
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
        self.effect_depth = 0;
    }
}

impl DrawContext for RecordingContext {
    fn push_clip(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::PushClip(rect));
        self.clip_stack.push(rect);
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
        if self.clip_stack.pop().is_none() {
            tracing::warn!("RecordingContext: pop_clip with an empty clip stack");
        }
    }

    fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    fn push_effect(&mut self, effect: LayerEffect) {
        self.commands.push(DrawCommand::PushEffect(effect));
        self.effect_depth += 1;
    }

    fn pop_effect(&mut self) {
        self.commands.push(DrawCommand::PopEffect);
        self.effect_depth = self.effect_depth.saturating_sub(1);
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.commands.push(DrawCommand::SetAntialias(enabled));
    }

    fn fill_rect(&mut self, rect: Rect, brush: Brush) {
        self.commands.push(DrawCommand::FillRect { rect, brush });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: stroke.clone(),
            brush,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            brush,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: stroke.clone(),
            brush,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            stroke: stroke.clone(),
            brush,
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}
