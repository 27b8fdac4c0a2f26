/// A three-vector of floats, used as a color, coordinate, etc.
///
/// The components of the vector can be accessed in four ways:
///
/// 1. Tuple-style: `v.0`, `v.1`, `v.2`.
/// 2. Accessor-style: `v.x()`, `v.y()`, `v.z()`.
/// 3. Using the `Axis` enum: `v[X]`, `v[Y]`, `v[Z]`. This requires a `use
///    skyray::vec3::Axis::*` statement.
/// 4. Using the `Channel` enum: `v[R]`, `v[G]`, `v[B]`. This requires a `use
///    skyray::vec3::Channel::*` statement.
///
/// There are no in-place operators; everything produces a new value.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Vec3(pub f64, pub f64, pub f64);

/// A `Vec3` used as a location in world space.
pub type Point3 = Vec3;

/// A `Vec3` used as a normalized RGB color, nominally in `[0,1]` per channel.
pub type Color = Vec3;

impl Vec3 {
    #[inline]
    pub fn x(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.1
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.2
    }

    /// Computes the dot product of two vectors.
    #[inline]
    pub fn dot(&self, other: Self) -> f64 {
        self.zip_with(other, core::ops::Mul::mul)
            .reduce(core::ops::Add::add)
    }

    /// Sum of the squared components.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Gets the length/magnitude of a vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Produces a vector collinear with `self` but with unit length. That is,
    /// the result points the same direction as `self` relative to the origin.
    ///
    /// The zero vector has no direction; its components come back non-finite.
    pub fn into_unit(self) -> Self {
        self / self.length()
    }

    /// Linear interpolation: `(1-t)*a + t*b`.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        (1. - t) * a + t * b
    }

    /// Applies `f` to each element of the vector in turn, giving a new vector.
    #[inline]
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Vec3(f(self.0), f(self.1), f(self.2))
    }

    /// Combines each corresponding element of `self` and `other` by giving them
    /// as arguments to function `f`. The results are collected into a new
    /// vector.
    #[inline]
    pub fn zip_with(self, other: Vec3, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        Vec3(f(self.0, other.0), f(self.1, other.1), f(self.2, other.2))
    }

    /// Combines the elements of `self` using `f` until only one result remains.
    #[inline]
    pub fn reduce(self, f: impl Fn(f64, f64) -> f64) -> f64 {
        f(f(self.0, self.1), self.2)
    }
}

/// Free-function form of `Vec3::into_unit`.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v.into_unit()
}

impl From<[f64; 3]> for Vec3 {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vec3(x, y, z)
    }
}

/// `vector * scalar`
impl std::ops::Mul<f64> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        self.map(|x| x * rhs)
    }
}

/// `scalar * vector`
impl std::ops::Mul<Vec3> for f64 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

/// `vector / scalar`, computed as `(1/scalar) * vector`.
impl std::ops::Div<f64> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        (1. / rhs) * self
    }
}

/// `vector + vector`
impl std::ops::Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Self::Output {
        self.zip_with(rhs, std::ops::Add::add)
    }
}

/// `vector - vector`
impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Self::Output {
        self.zip_with(rhs, std::ops::Sub::sub)
    }
}

/// Names for vector lanes when used as a color.
///
/// `Vec3` has an `Index` impl for `Channel`, so you can use `Channel` values to
/// select components from a `Vec3`:
///
/// ```
/// use skyray::vec3::{Vec3, Channel::*};
///
/// let v = Vec3(1., 2., 3.);
/// assert_eq!(v[R], 1.);
/// assert_eq!(v[G], 2.);
/// assert_eq!(v[B], 3.);
/// ```
#[derive(Copy, Clone, Debug)]
pub enum Channel {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
}

use Channel::*;

impl ::std::ops::Index<Channel> for Vec3 {
    type Output = f64;

    fn index(&self, idx: Channel) -> &Self::Output {
        match idx {
            R => &self.0,
            G => &self.1,
            B => &self.2,
        }
    }
}

/// Names for vector lanes when used as a coordinate.
///
/// `Vec3` has an `Index` impl for `Axis`, so you can use `Axis` values to
/// select components from a `Vec3`:
///
/// ```
/// use skyray::vec3::{Vec3, Axis::*};
///
/// let v = Vec3(1., 2., 3.);
/// assert_eq!(v[X], 1.);
/// assert_eq!(v[Y], 2.);
/// assert_eq!(v[Z], 3.);
/// ```
#[derive(Copy, Clone, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

use Axis::*;

impl ::std::ops::Index<Axis> for Vec3 {
    type Output = f64;

    fn index(&self, idx: Axis) -> &Self::Output {
        match idx {
            X => &self.0,
            Y => &self.1,
            Z => &self.2,
        }
    }
}
