//! Depth-to-colour mapping.
//!
//! A particle's display colour is the shared base colour, plus its fixed
//! [`ColorProfile`] offset, plus `z * depth_scale` added equally to every
//! channel. The sum is left unclamped here; saturation to the displayable
//! range happens at the backend boundary in [`Rgb::to_unit`].

use crate::particle::ColorProfile;

/// Reference base colour.
pub const DEFAULT_BASE_COLOR: Rgb = Rgb::new(150.0, 100.0, 150.0);

/// Reference depth shading factor.
pub const DEFAULT_DEPTH_SCALE: f64 = 5.0;

/// An RGB triple on the 0-255 scale.
///
/// Channels are not clamped and may fall outside `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Add the same scalar to every channel.
    #[inline]
    pub fn shift(self, amount: f64) -> Self {
        Self::new(self.r + amount, self.g + amount, self.b + amount)
    }

    /// Add a per-channel integer offset.
    #[inline]
    pub fn offset(self, offset: [u8; 3]) -> Self {
        Self::new(
            self.r + f64::from(offset[0]),
            self.g + f64::from(offset[1]),
            self.b + f64::from(offset[2]),
        )
    }

    /// Saturate each channel to `[0, 255]` and rescale to `[0, 1]`.
    ///
    /// NaN channels map to 0.
    pub fn to_unit(self) -> [f32; 3] {
        let unit = |c: f64| {
            if c.is_nan() {
                0.0
            } else {
                (c.clamp(0.0, 255.0) / 255.0) as f32
            }
        };
        [unit(self.r), unit(self.g), unit(self.b)]
    }

    /// Same as [`to_unit`](Self::to_unit) but as a wgpu clear colour.
    pub fn to_wgpu(self) -> wgpu::Color {
        let [r, g, b] = self.to_unit();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}

/// Display colour for a particle at depth `z`.
#[inline]
pub fn depth_color(base: Rgb, profile: &ColorProfile, z: f64, depth_scale: f64) -> Rgb {
    base.offset(profile.offset).shift(z * depth_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_shift_is_scalar() {
        let color = depth_color(
            Rgb::new(150.0, 100.0, 150.0),
            &ColorProfile::new([0, 0, 0]),
            2.0,
            DEFAULT_DEPTH_SCALE,
        );
        assert_eq!(color, Rgb::new(160.0, 110.0, 160.0));
    }

    #[test]
    fn test_profile_offset_per_channel() {
        let color = depth_color(
            DEFAULT_BASE_COLOR,
            &ColorProfile::new([30, 0, 7]),
            0.0,
            DEFAULT_DEPTH_SCALE,
        );
        assert_eq!(color, Rgb::new(180.0, 100.0, 157.0));
    }

    #[test]
    fn test_negative_depth_darkens() {
        let color = depth_color(
            DEFAULT_BASE_COLOR,
            &ColorProfile::default(),
            -4.0,
            DEFAULT_DEPTH_SCALE,
        );
        assert_eq!(color, Rgb::new(130.0, 80.0, 130.0));
    }

    #[test]
    fn test_mapping_is_unclamped() {
        let bright = depth_color(DEFAULT_BASE_COLOR, &ColorProfile::new([30; 3]), 40.0, 5.0);
        assert!(bright.r > 255.0);

        let dark = depth_color(DEFAULT_BASE_COLOR, &ColorProfile::default(), -40.0, 5.0);
        assert!(dark.g < 0.0);
    }

    #[test]
    fn test_to_unit_saturates() {
        assert_eq!(Rgb::new(300.0, -20.0, 255.0).to_unit(), [1.0, 0.0, 1.0]);
        assert_eq!(Rgb::new(0.0, 0.0, 0.0).to_unit(), [0.0, 0.0, 0.0]);
        assert_eq!(Rgb::new(f64::NAN, 0.0, 0.0).to_unit(), [0.0, 0.0, 0.0]);

        let [r, _, _] = Rgb::new(51.0, 0.0, 0.0).to_unit();
        assert!((r - 0.2).abs() < 1e-6);
    }
}
