//! Gradient paint configurations
//!
//! Gradient geometry is expressed relative to the paint's draw rectangle
//! (the canvas clip rectangle when one is set, otherwise the whole surface):
//! `(0, 0)` is the top-left corner and `(1, 1)` the bottom-right one. The
//! rectangle is only known at `initialize_task`, where these configurations
//! are resolved into absolute backend gradients.

use vellum_animation::Interpolate;
use vellum_core::{Color, Gradient, GradientStop, GradientStops, Point, Rect};

use crate::error::{PaintError, Result};

/// Linear gradient between two relative points
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: GradientStops,
}

impl LinearGradient {
    /// Evenly spaced colors from `start` to `end`
    pub fn new(colors: &[Color], start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            stops: evenly_spaced(colors),
        }
    }

    /// Left-to-right gradient across the draw rectangle
    pub fn horizontal(colors: &[Color]) -> Self {
        Self::new(colors, Point::new(0.0, 0.5), Point::new(1.0, 0.5))
    }

    pub fn with_stops(mut self, stops: impl IntoIterator<Item = GradientStop>) -> Self {
        self.stops = stops.into_iter().collect();
        self
    }

    /// Absolute backend gradient inside `bounds`
    pub fn resolve(&self, bounds: Rect) -> Gradient {
        Gradient::Linear {
            start: relative_to(bounds, self.start),
            end: relative_to(bounds, self.end),
            stops: self.stops.clone(),
        }
    }

    pub fn transitionate(&self, progress: f32, target: &LinearGradient) -> Result<LinearGradient> {
        Ok(LinearGradient {
            start: self.start.lerp(&target.start, progress),
            end: self.end.lerp(&target.end, progress),
            stops: blend_stops(&self.stops, &target.stops, progress)?,
        })
    }
}

/// Radial gradient around a relative center
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    /// Radius as a fraction of the draw rectangle's shorter side
    pub radius: f32,
    pub stops: GradientStops,
}

impl RadialGradient {
    pub fn new(colors: &[Color], center: Point, radius: f32) -> Self {
        Self {
            center,
            radius,
            stops: evenly_spaced(colors),
        }
    }

    /// Gradient centered in the draw rectangle, reaching its shorter edges
    pub fn centered(colors: &[Color]) -> Self {
        Self::new(colors, Point::new(0.5, 0.5), 0.5)
    }

    pub fn with_stops(mut self, stops: impl IntoIterator<Item = GradientStop>) -> Self {
        self.stops = stops.into_iter().collect();
        self
    }

    pub fn resolve(&self, bounds: Rect) -> Gradient {
        Gradient::Radial {
            center: relative_to(bounds, self.center),
            radius: self.radius * bounds.width().min(bounds.height()),
            stops: self.stops.clone(),
        }
    }

    pub fn transitionate(&self, progress: f32, target: &RadialGradient) -> Result<RadialGradient> {
        Ok(RadialGradient {
            center: self.center.lerp(&target.center, progress),
            radius: self.radius.lerp(&target.radius, progress),
            stops: blend_stops(&self.stops, &target.stops, progress)?,
        })
    }
}

fn relative_to(bounds: Rect, point: Point) -> Point {
    Point::new(
        bounds.x() + bounds.width() * point.x,
        bounds.y() + bounds.height() * point.y,
    )
}

fn evenly_spaced(colors: &[Color]) -> GradientStops {
    let last = colors.len().saturating_sub(1).max(1) as f32;
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| GradientStop::new(i as f32 / last, *color))
        .collect()
}

/// Blend stop arrays pairwise; lengths must match
fn blend_stops(
    source: &GradientStops,
    target: &GradientStops,
    progress: f32,
) -> Result<GradientStops> {
    if source.len() != target.len() {
        return Err(PaintError::GradientStopMismatch {
            source_stops: source.len(),
            target_stops: target.len(),
        });
    }

    Ok(source
        .iter()
        .zip(target.iter())
        .map(|(a, b)| GradientStop {
            offset: a.offset.lerp(&b.offset, progress),
            color: a.color.lerp(&b.color, progress),
        })
        .collect())
}
