//! Built-in animated geometries
//!
//! Minimal drawables whose shape and opacity are motion properties. Setting
//! a new shape starts a transition from whatever is currently on screen.

use vellum_animation::{Animatable, PropertyKey};
use vellum_core::{Point, Rect, Size};
use vellum_paint::{Drawable, PaintContext, Result};

/// Opacity shared by every built-in geometry
pub const OPACITY: PropertyKey<f32> = PropertyKey::new("opacity");

fn current_opacity(animatable: &mut Animatable) -> f32 {
    animatable.get(OPACITY).unwrap_or(1.0)
}

/// Fade to transparent and leave the paint task once the fade settles
fn fade_out(animatable: &mut Animatable) -> Result<()> {
    animatable.set(OPACITY, 0.0)?;
    animatable.set_remove_on_completed(true);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Rectangle
// ═══════════════════════════════════════════════════════════════════════════

pub const BOUNDS: PropertyKey<Rect> = PropertyKey::new("bounds");

/// Axis-aligned rectangle
#[derive(Clone, Debug)]
pub struct RectangleGeometry {
    animatable: Animatable,
}

impl RectangleGeometry {
    pub fn new(bounds: Rect) -> Self {
        Self {
            animatable: Animatable::new()
                .with_property(BOUNDS.name(), bounds)
                .with_property(OPACITY.name(), 1.0_f32),
        }
    }

    /// Interpolated bounds at the current frame time
    pub fn bounds(&mut self) -> Result<Rect> {
        Ok(self.animatable.get(BOUNDS)?)
    }

    pub fn set_bounds(&mut self, bounds: Rect) -> Result<()> {
        Ok(self.animatable.set(BOUNDS, bounds)?)
    }

    pub fn set_opacity(&mut self, opacity: f32) -> Result<()> {
        Ok(self.animatable.set(OPACITY, opacity)?)
    }

    pub fn fade_out(&mut self) -> Result<()> {
        fade_out(&mut self.animatable)
    }
}

impl Drawable for RectangleGeometry {
    fn draw(&mut self, ctx: &mut PaintContext<'_>) -> Result<()> {
        let bounds = self.bounds()?;
        ctx.draw_rect(bounds)
    }

    fn measure(&mut self) -> Size {
        self.animatable.get(BOUNDS).map_or(Size::ZERO, |b| b.size())
    }

    fn opacity(&mut self) -> f32 {
        current_opacity(&mut self.animatable)
    }

    fn animatable(&self) -> &Animatable {
        &self.animatable
    }

    fn animatable_mut(&mut self) -> &mut Animatable {
        &mut self.animatable
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Circle
// ═══════════════════════════════════════════════════════════════════════════

pub const CENTER: PropertyKey<Point> = PropertyKey::new("center");
pub const RADIUS: PropertyKey<f32> = PropertyKey::new("radius");

/// Circle around a center point
#[derive(Clone, Debug)]
pub struct CircleGeometry {
    animatable: Animatable,
}

impl CircleGeometry {
    pub fn new(center: Point, radius: f32) -> Self {
        Self {
            animatable: Animatable::new()
                .with_property(CENTER.name(), center)
                .with_property(RADIUS.name(), radius)
                .with_property(OPACITY.name(), 1.0_f32),
        }
    }

    pub fn center(&mut self) -> Result<Point> {
        Ok(self.animatable.get(CENTER)?)
    }

    pub fn radius(&mut self) -> Result<f32> {
        Ok(self.animatable.get(RADIUS)?)
    }

    pub fn set_center(&mut self, center: Point) -> Result<()> {
        Ok(self.animatable.set(CENTER, center)?)
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        Ok(self.animatable.set(RADIUS, radius)?)
    }

    pub fn set_opacity(&mut self, opacity: f32) -> Result<()> {
        Ok(self.animatable.set(OPACITY, opacity)?)
    }

    pub fn fade_out(&mut self) -> Result<()> {
        fade_out(&mut self.animatable)
    }
}

impl Drawable for CircleGeometry {
    fn draw(&mut self, ctx: &mut PaintContext<'_>) -> Result<()> {
        let center = self.center()?;
        let radius = self.radius()?;
        ctx.draw_circle(center, radius)
    }

    fn measure(&mut self) -> Size {
        let diameter = self.animatable.get(RADIUS).unwrap_or(0.0) * 2.0;
        Size::new(diameter, diameter)
    }

    fn opacity(&mut self) -> f32 {
        current_opacity(&mut self.animatable)
    }

    fn animatable(&self) -> &Animatable {
        &self.animatable
    }

    fn animatable_mut(&mut self) -> &mut Animatable {
        &mut self.animatable
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Line
// ═══════════════════════════════════════════════════════════════════════════

pub const FROM: PropertyKey<Point> = PropertyKey::new("from");
pub const TO: PropertyKey<Point> = PropertyKey::new("to");

/// Straight segment; always stroked
#[derive(Clone, Debug)]
pub struct LineGeometry {
    animatable: Animatable,
}

impl LineGeometry {
    pub fn new(from: Point, to: Point) -> Self {
        Self {
            animatable: Animatable::new()
                .with_property(FROM.name(), from)
                .with_property(TO.name(), to)
                .with_property(OPACITY.name(), 1.0_f32),
        }
    }

    pub fn endpoints(&mut self) -> Result<(Point, Point)> {
        Ok((self.animatable.get(FROM)?, self.animatable.get(TO)?))
    }

    pub fn set_endpoints(&mut self, from: Point, to: Point) -> Result<()> {
        self.animatable.set(FROM, from)?;
        self.animatable.set(TO, to)?;
        Ok(())
    }

    pub fn set_opacity(&mut self, opacity: f32) -> Result<()> {
        Ok(self.animatable.set(OPACITY, opacity)?)
    }

    pub fn fade_out(&mut self) -> Result<()> {
        fade_out(&mut self.animatable)
    }
}

impl Drawable for LineGeometry {
    fn draw(&mut self, ctx: &mut PaintContext<'_>) -> Result<()> {
        let (from, to) = self.endpoints()?;
        ctx.draw_line(from, to)
    }

    fn measure(&mut self) -> Size {
        match self.endpoints() {
            Ok((from, to)) => Size::new((to.x - from.x).abs(), (to.y - from.y).abs()),
            Err(_) => Size::ZERO,
        }
    }

    fn opacity(&mut self) -> f32 {
        current_opacity(&mut self.animatable)
    }

    fn animatable(&self) -> &Animatable {
        &self.animatable
    }

    fn animatable_mut(&mut self) -> &mut Animatable {
        &mut self.animatable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vellum_animation::{Animation, Easing};

    #[test]
    fn test_measure() {
        let mut rect = RectangleGeometry::new(Rect::new(5.0, 5.0, 20.0, 10.0));
        assert_eq!(rect.measure(), Size::new(20.0, 10.0));

        let mut circle = CircleGeometry::new(Point::new(0.0, 0.0), 4.0);
        assert_eq!(circle.measure(), Size::new(8.0, 8.0));

        let mut line = LineGeometry::new(Point::new(10.0, 0.0), Point::new(0.0, 5.0));
        assert_eq!(line.measure(), Size::new(10.0, 5.0));
    }

    #[test]
    fn test_bounds_transition() {
        let mut rect = RectangleGeometry::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        rect.animatable_mut().set_transition(
            Some(Animation::new(Easing::Linear, Duration::from_millis(100))),
            None,
        );
        rect.set_bounds(Rect::new(0.0, 0.0, 20.0, 30.0)).unwrap();
        rect.bounds().unwrap();

        rect.animatable_mut().set_current_time(50);
        assert_eq!(rect.bounds().unwrap(), Rect::new(0.0, 0.0, 15.0, 20.0));
        assert!(!rect.animatable().is_completed());

        rect.animatable_mut().set_current_time(100);
        assert_eq!(rect.bounds().unwrap(), Rect::new(0.0, 0.0, 20.0, 30.0));
        assert!(rect.animatable().is_completed());
    }

    #[test]
    fn test_fade_out_marks_removal() {
        let mut circle = CircleGeometry::new(Point::new(0.0, 0.0), 4.0);
        assert_eq!(circle.opacity(), 1.0);

        circle.fade_out().unwrap();
        assert!(circle.animatable().remove_on_completed());
        assert_eq!(circle.opacity(), 0.0);
    }
}
