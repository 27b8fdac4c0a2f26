use crate::config::SkyConfig;
use crate::ray::Ray;
use crate::vec3::{Axis::*, Color, Vec3};

/// Background shading: a vertical blend between two colors, keyed on how far
/// up or down a ray points. Horizontal direction has no effect.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sky {
    /// Color seen looking straight down.
    pub bottom: Color,
    /// Color seen looking straight up.
    pub top: Color,
}

impl Default for Sky {
    fn default() -> Self {
        Sky {
            bottom: Vec3(1., 1., 1.),
            top: Vec3(0.5, 0.7, 1.0),
        }
    }
}

impl From<&SkyConfig> for Sky {
    fn from(config: &SkyConfig) -> Self {
        Sky {
            bottom: Vec3::from(config.bottom),
            top: Vec3::from(config.top),
        }
    }
}

impl Sky {
    /// Computes the color seen along `ray`.
    ///
    /// A zero-length direction normalizes to NaN, and so does the result.
    pub fn ray_color(&self, ray: &Ray) -> Color {
        let unit_direction = ray.direction().into_unit();
        // Map y from [-1, 1] onto [0, 1].
        let a = 0.5 * (unit_direction[Y] + 1.);
        Vec3::lerp(self.bottom, self.top, a)
    }
}
