//! Quaternion coordinates: one value carrying both position and orientation.
//!
//! Conventions
//! - A point at polar coordinates `(norm, elevation, azimuth, roll)` is stored
//!   as `√norm · U(elevation, azimuth, roll)`, with `U` a unit quaternion.
//!   The squared magnitude (Cayley norm) of the stored value is therefore the
//!   radial distance itself. Spiral radius functions rely on this: they hand
//!   their radius straight to `from_polar` and must not take a root first.
//! - `U` rotates the +x axis onto the point's direction:
//!   `U = from_euler_angles(roll, -elevation, azimuth)` (nalgebra applies
//!   roll, then pitch, then yaw), hence `x = norm·cos e·cos d`,
//!   `y = norm·cos e·sin d`, `z = norm·sin e`.
//! - Angles are radians and are not normalized here; the trigonometric
//!   functions handle wrap-around. Recovered angles lie in the principal
//!   ranges `elevation ∈ [-π/2, π/2]`, `azimuth, roll ∈ (-π, π]`.
//! - At the poles (`elevation = ±π/2`) azimuth and roll are not separable;
//!   the recovered split differs from the input while the position agrees.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::cfg::NORM_EPS;
use crate::error::{GeomError, Result};

/// Polar view of a quaternion coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polar {
    pub norm: f64,
    pub elevation: f64,
    pub azimuth: f64,
    pub roll: f64,
}

impl Polar {
    #[inline]
    pub fn new(norm: f64, elevation: f64, azimuth: f64, roll: f64) -> Self {
        Self {
            norm,
            elevation,
            azimuth,
            roll,
        }
    }

    #[inline]
    pub fn to_quat(&self) -> Result<Quat> {
        Quat::from_polar(self.norm, self.elevation, self.azimuth, self.roll)
    }

    /// Projection onto `(x, y, z)`.
    pub fn to_cartesian(&self) -> Vector3<f64> {
        let xy = self.norm * self.elevation.cos();
        Vector3::new(
            xy * self.azimuth.cos(),
            xy * self.azimuth.sin(),
            self.norm * self.elevation.sin(),
        )
    }
}

/// Unit rotation taking +x onto the direction `(elevation, azimuth)`, then
/// rolled by `roll` about that direction.
#[inline]
pub fn unit_rotation(elevation: f64, azimuth: f64, roll: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(roll, -elevation, azimuth)
}

/// Quaternion-backed coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat(pub Quaternion<f64>);

impl Default for Quat {
    fn default() -> Self {
        Self::zero()
    }
}

impl Quat {
    /// The origin (no orientation).
    #[inline]
    pub fn zero() -> Self {
        Self(Quaternion::new(0.0, 0.0, 0.0, 0.0))
    }

    /// From polar coordinates: `√norm · unit_rotation(elevation, azimuth, roll)`.
    ///
    /// Errors with `Domain` for a negative or non-finite norm, or non-finite angles.
    pub fn from_polar(norm: f64, elevation: f64, azimuth: f64, roll: f64) -> Result<Self> {
        if !norm.is_finite() || norm < 0.0 {
            return Err(GeomError::domain(format!(
                "polar norm must be finite and non-negative, got {norm}"
            )));
        }
        if !(elevation.is_finite() && azimuth.is_finite() && roll.is_finite()) {
            return Err(GeomError::domain(format!(
                "polar angles must be finite, got ({elevation}, {azimuth}, {roll})"
            )));
        }
        let u = unit_rotation(elevation, azimuth, roll);
        Ok(Self(u.into_inner() * norm.sqrt()))
    }

    /// From `[norm, elevation]`, `[norm, elevation, azimuth]` or
    /// `[norm, elevation, azimuth, roll]`.
    pub fn from_polar_slice(coords: &[f64]) -> Result<Self> {
        match *coords {
            [n, e] => Self::from_polar(n, e, 0.0, 0.0),
            [n, e, d] => Self::from_polar(n, e, d, 0.0),
            [n, e, d, r] => Self::from_polar(n, e, d, r),
            _ => Err(GeomError::domain(format!(
                "polar input needs norm and elevation (2 to 4 values), got {} values",
                coords.len()
            ))),
        }
    }

    /// From cartesian `(x, y, z)` and a roll about the radial direction.
    pub fn from_cartesian(x: f64, y: f64, z: f64, roll: f64) -> Result<Self> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(GeomError::domain(format!(
                "cartesian input must be finite, got ({x}, {y}, {z})"
            )));
        }
        let xy = x.hypot(y);
        let norm = xy.hypot(z);
        Self::from_polar(norm, z.atan2(xy), y.atan2(x), roll)
    }

    /// From `[x, y, z]` or `[x, y, z, roll]`; anything shorter leaves `y`/`z`
    /// unresolved and is a `Domain` error.
    pub fn from_cartesian_slice(coords: &[f64]) -> Result<Self> {
        match *coords {
            [x, y, z] => Self::from_cartesian(x, y, z, 0.0),
            [x, y, z, r] => Self::from_cartesian(x, y, z, r),
            _ => Err(GeomError::domain(format!(
                "y and/or z is not set: cartesian input needs 3 or 4 values, got {}",
                coords.len()
            ))),
        }
    }

    /// `[w, i, j, k]`.
    #[inline]
    pub fn components(&self) -> [f64; 4] {
        [self.0.w, self.0.i, self.0.j, self.0.k]
    }

    /// Radial distance (the Cayley norm of the stored value).
    #[inline]
    pub fn norm(&self) -> f64 {
        self.0.norm_squared()
    }

    #[inline]
    pub fn is_origin(&self) -> bool {
        self.0.norm() <= NORM_EPS
    }

    /// Orientation part; identity at the origin.
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        if self.is_origin() {
            UnitQuaternion::identity()
        } else {
            UnitQuaternion::new_normalize(self.0)
        }
    }

    /// Unit direction of the point (the rotated +x axis).
    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.rotation()
            .transform_vector(&Vector3::new(1.0, 0.0, 0.0))
    }

    /// Elevation and azimuth come from the direction (well conditioned near
    /// the poles); roll comes from the Euler decomposition.
    pub fn polar(&self) -> Polar {
        let rot = self.rotation();
        let dir = rot.transform_vector(&Vector3::new(1.0, 0.0, 0.0));
        let (roll, _, _) = rot.euler_angles();
        Polar {
            norm: self.norm(),
            elevation: dir.z.atan2(dir.x.hypot(dir.y)),
            azimuth: dir.y.atan2(dir.x),
            roll,
        }
    }

    #[inline]
    pub fn elevation(&self) -> f64 {
        self.polar().elevation
    }
    #[inline]
    pub fn azimuth(&self) -> f64 {
        self.polar().azimuth
    }
    #[inline]
    pub fn roll(&self) -> f64 {
        self.polar().roll
    }

    /// `(x, y, z)`; equal to `self.polar().to_cartesian()`.
    #[inline]
    pub fn cartesian(&self) -> Vector3<f64> {
        self.direction() * self.norm()
    }

    /// Rotate about the origin; the norm is unchanged.
    #[inline]
    pub fn rotated(&self, by: &UnitQuaternion<f64>) -> Self {
        Self(by.into_inner() * self.0)
    }

    /// Move by a cartesian offset; roll is carried over.
    pub fn translated(&self, by: &Vector3<f64>) -> Result<Self> {
        let p = self.cartesian() + by;
        Self::from_cartesian(p.x, p.y, p.z, self.roll())
    }

    /// Scale the radial distance by `f` about the origin.
    pub fn scaled(&self, f: f64) -> Result<Self> {
        if !f.is_finite() || f < 0.0 {
            return Err(GeomError::domain(format!(
                "scale factor must be finite and non-negative, got {f}"
            )));
        }
        Ok(Self(self.0 * f.sqrt()))
    }

    /// Shrink (or grow) the angles while keeping the norm.
    pub fn pinched(&self, pinch: Pinch) -> Result<Self> {
        let p = self.polar();
        let (fe, fd, fr) = pinch.factors();
        Self::from_polar(p.norm, p.elevation * fe, p.azimuth * fd, p.roll * fr)
    }
}

impl std::fmt::Display for Quat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [w, i, j, k] = self.components();
        write!(f, "Quat({w}, {i}, {j}, {k})")
    }
}

/// Angular scale factors for `Quat::pinched`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pinch {
    Elevation(f64),
    ElevationAzimuth(f64, f64),
    All { elevation: f64, azimuth: f64, roll: f64 },
}

impl Pinch {
    /// `(elevation, azimuth, roll)` multipliers; unnamed axes keep 1.
    #[inline]
    pub fn factors(&self) -> (f64, f64, f64) {
        match *self {
            Pinch::Elevation(e) => (e, 1.0, 1.0),
            Pinch::ElevationAzimuth(e, d) => (e, d, 1.0),
            Pinch::All {
                elevation,
                azimuth,
                roll,
            } => (elevation, azimuth, roll),
        }
    }
}

impl TryFrom<&[f64]> for Pinch {
    type Error = GeomError;

    fn try_from(f: &[f64]) -> Result<Self> {
        match *f {
            [e] => Ok(Pinch::Elevation(e)),
            [e, d] => Ok(Pinch::ElevationAzimuth(e, d)),
            [e, d, r] => Ok(Pinch::All {
                elevation: e,
                azimuth: d,
                roll: r,
            }),
            _ => Err(GeomError::config(format!(
                "pinch takes 1, 2 or 3 factors, got {}",
                f.len()
            ))),
        }
    }
}
