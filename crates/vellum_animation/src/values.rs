//! Animatable value types
//!
//! Provides the interpolation rule for every value a motion property can
//! hold. Numeric types blend linearly; colors blend per channel and truncate
//! back to 8 bits.

use vellum_core::{Color, Point, Rect, Size};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are equal within `epsilon` per component
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// Scalars
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t as f64
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon as f64
    }
}

impl Interpolate for bool {
    /// Switches to the target value once the transition has finished
    fn lerp(&self, other: &Self, t: f32) -> Self {
        if t >= 1.0 {
            *other
        } else {
            *self
        }
    }

    fn approx_eq(&self, other: &Self, _epsilon: f32) -> bool {
        self == other
    }
}

// ============================================================================
// Geometry
// ============================================================================

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.approx_eq(&other.x, epsilon) && self.y.approx_eq(&other.y, epsilon)
    }
}

impl Interpolate for Size {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Size::new(
            self.width.lerp(&other.width, t),
            self.height.lerp(&other.height, t),
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.width.approx_eq(&other.width, epsilon)
            && self.height.approx_eq(&other.height, epsilon)
    }
}

impl Interpolate for Rect {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Rect::from_origin_size(
            self.origin.lerp(&other.origin, t),
            self.size.lerp(&other.size, t),
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.origin.approx_eq(&other.origin, epsilon) && self.size.approx_eq(&other.size, epsilon)
    }
}

// ============================================================================
// Color
// ============================================================================

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }

    /// Channels are compared on the 0-255 scale
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        let close = |a: u8, b: u8| ((a as f32) - (b as f32)).abs() < epsilon;
        close(self.r, other.r)
            && close(self.g, other.g)
            && close(self.b, other.b)
            && close(self.a, other.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
        assert!((10.0_f64.lerp(&20.0, 0.25) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_rect_interpolation() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(100.0, 50.0, 20.0, 30.0);
        let mid = a.lerp(&b, 0.5);
        assert!(mid.approx_eq(&Rect::new(50.0, 25.0, 15.0, 20.0), 1e-4));
    }

    #[test]
    fn test_color_interpolation() {
        let mid = Color::RED.lerp(&Color::BLUE, 0.5);
        assert!(mid.approx_eq(&Color::rgba(128, 0, 128, 255), 1.5));
    }

    #[test]
    fn test_bool_switches_at_end() {
        assert!(!false.lerp(&true, 0.99));
        assert!(false.lerp(&true, 1.0));
    }
}
