use crate::vec3::{Point3, Vec3};

/// A ray, beginning at `origin` and extending along `direction`.
///
/// `direction` is stored as given: it is not normalized, and may even be zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Ray { origin, direction }
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}
