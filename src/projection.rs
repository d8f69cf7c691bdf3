//! Orthographic projection of particle positions to device pixels.
//!
//! Only `x` and `y` reach the screen; depth is conveyed purely by colour, so
//! every disc has the same diameter.

use glam::{DVec2, DVec3};

use crate::color::Rgb;

/// Reference pixels per attractor unit.
pub const DEFAULT_SCALE: f64 = 40.0;

/// Reference offset added after centring, in pixels.
pub const DEFAULT_OFFSET: DVec2 = DVec2::new(100.0, 100.0);

/// Reference disc diameter, in pixels.
pub const DEFAULT_DIAMETER: f64 = 10.0;

/// Maps attractor space onto a fixed-size pixel surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Surface size in pixels, `(width, height)`.
    pub screen: DVec2,
    /// Pixels per attractor unit.
    pub scale: f64,
    /// Offset applied after centring on the screen.
    pub offset: DVec2,
    /// Diameter of every drawn disc.
    pub diameter: f64,
}

/// A filled circle ready for the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    /// Centre in device pixels, origin top-left.
    pub center: DVec2,
    pub diameter: f64,
    /// Unclamped display colour.
    pub color: Rgb,
}

impl Projection {
    /// Projection with the reference scale, offset and diameter.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen: DVec2::new(f64::from(width), f64::from(height)),
            scale: DEFAULT_SCALE,
            offset: DEFAULT_OFFSET,
            diameter: DEFAULT_DIAMETER,
        }
    }

    /// Device coordinate of `position`, ignoring depth.
    #[inline]
    pub fn project(&self, position: DVec3) -> DVec2 {
        position.truncate() * self.scale + self.screen * 0.5 + self.offset
    }

    /// Disc for a particle at `position` drawn in `color`.
    #[inline]
    pub fn disc(&self, position: DVec3, color: Rgb) -> Disc {
        Disc {
            center: self.project(position),
            diameter: self.diameter,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_offset_centre() {
        let projection = Projection::new(1920, 1080);
        assert_eq!(
            projection.project(DVec3::new(0.0, 0.0, 7.5)),
            DVec2::new(1060.0, 640.0)
        );
    }

    #[test]
    fn test_depth_does_not_move_disc() {
        let projection = Projection::new(1920, 1080);
        let near = projection.project(DVec3::new(1.0, -2.0, -50.0));
        let far = projection.project(DVec3::new(1.0, -2.0, 50.0));
        assert_eq!(near, far);
    }

    #[test]
    fn test_scale_applies_per_unit() {
        let projection = Projection::new(1920, 1080);
        assert_eq!(
            projection.project(DVec3::new(1.0, -2.0, 0.0)),
            DVec2::new(1100.0, 560.0)
        );
    }

    #[test]
    fn test_disc_has_fixed_diameter() {
        let projection = Projection::new(800, 600);
        let a = projection.disc(DVec3::new(0.0, 0.0, -3.0), Rgb::BLACK);
        let b = projection.disc(DVec3::new(2.0, 1.0, 3.0), Rgb::BLACK);
        assert_eq!(a.diameter, DEFAULT_DIAMETER);
        assert_eq!(b.diameter, DEFAULT_DIAMETER);
        assert_eq!(a.center, DVec2::new(500.0, 400.0));
    }
}
