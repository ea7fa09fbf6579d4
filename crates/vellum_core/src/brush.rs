//! Brushes handed to the drawing backend
//!
//! A `Brush` is the resolved, backend-facing form of a paint: either a
//! solid color or a gradient shader with concrete stops.

use smallvec::SmallVec;

use crate::color::Color;
use crate::geometry::Point;

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Inline storage for gradient stops; most chart gradients have two to four
pub type GradientStops = SmallVec<[GradientStop; 4]>;

/// Gradient shader
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    /// Linear gradient between two points
    Linear {
        start: Point,
        end: Point,
        stops: GradientStops,
    },
    /// Radial gradient from center outward
    Radial {
        center: Point,
        radius: f32,
        stops: GradientStops,
    },
}

impl Gradient {
    /// Get the gradient stops
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Gradient::Linear { stops, .. } => stops,
            Gradient::Radial { stops, .. } => stops,
        }
    }

    fn stops_mut(&mut self) -> &mut GradientStops {
        match self {
            Gradient::Linear { stops, .. } => stops,
            Gradient::Radial { stops, .. } => stops,
        }
    }

    /// Multiply every stop's alpha by `factor`
    pub fn modulate_alpha(mut self, factor: f32) -> Self {
        for stop in self.stops_mut().iter_mut() {
            stop.color = stop.color.scale_alpha(factor);
        }
        self
    }
}

/// Brush for filling or stroking shapes
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    Gradient(Gradient),
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl From<Gradient> for Brush {
    fn from(gradient: Gradient) -> Self {
        Brush::Gradient(gradient)
    }
}
