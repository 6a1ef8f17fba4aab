//! Color representation

/// Linear RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    /// True when nothing would be painted with this color.
    pub fn is_transparent(&self) -> bool {
        self.3 <= 0.0
    }

    /// Returns the color as 8-bit RGB, ignoring alpha.
    ///
    /// Terminal and raster backends that have no blending use this.
    pub fn to_rgb_u8(&self) -> (u8, u8, u8) {
        fn channel(value: f32) -> u8 {
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        (channel(self.0), channel(self.1), channel(self.2))
    }

    pub const BLUE: Color = Color(0.0, 0.0, 1.0, 1.0);
    /// Matches the platform "dark gray" (one third white).
    pub const DARK_GRAY: Color = Color(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);
}
