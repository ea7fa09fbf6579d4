//! Native paint objects
//!
//! `NativePaint` is the fully resolved style a paint hands to geometries for
//! one pass: concrete color or shader, stroke attributes and filters. It is
//! rebuilt lazily at the start of every pass from the paint's current
//! (interpolated) properties.

use vellum_core::{Brush, Color, Gradient, LayerEffect, Stroke};

use crate::paint::PaintStyle;

/// Resolved drawing style for a single paint pass
#[derive(Clone, Debug, PartialEq)]
pub struct NativePaint {
    pub style: PaintStyle,
    /// Solid color; for shader paints only its alpha is used, as a modulator
    pub color: Color,
    pub shader: Option<Gradient>,
    pub stroke: Stroke,
    pub antialias: bool,
    pub effects: Vec<LayerEffect>,
}

impl NativePaint {
    /// Backend brush for the current color/shader state
    pub fn brush(&self) -> Brush {
        match &self.shader {
            Some(gradient) if self.color.a == 255 => Brush::Gradient(gradient.clone()),
            Some(gradient) => {
                Brush::Gradient(gradient.clone().modulate_alpha(self.color.a as f32 / 255.0))
            }
            None => Brush::Solid(self.color),
        }
    }

    pub fn is_stroke(&self) -> bool {
        self.style == PaintStyle::Stroke
    }
}
