//! 8-bit RGBA colors
//!
//! Channels are stored as `u8` to match the native rasterizer. Blending
//! between colors works per channel in sRGB space and truncates back to
//! the 8-bit range; it is not gamma-correct.

/// RGBA color with 8-bit channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 128, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `0xRRGGBB` value into an opaque color
    pub fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.a = alpha;
        self
    }

    /// Scale the alpha channel by `factor` (clamped to 0.0..=1.0)
    pub fn scale_alpha(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        self.with_alpha((self.a as f32 * factor) as u8)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Normalized channels in `[r, g, b, a]` order
    pub fn to_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Per-channel linear blend, truncated back to 8 bits
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: lerp_channel(a.r, b.r, t),
            g: lerp_channel(a.g, b.g, t),
            b: lerp_channel(a.b, b.b, t),
            a: lerp_channel(a.a, b.a, t),
        }
    }
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    let from = from as f32;
    (from + (to as f32 - from) * t) as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::rgba(r, g, b, a)
    }
}
