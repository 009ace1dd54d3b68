//! Points: indexed vertices whose quaternion is resolved through their owner.
//!
//! A `Point` stores only its index and where its value comes from. Every view
//! (polar, cartesian, distances) is computed on access through a `PointRef`,
//! which pairs the point with its owning `Polytope`; nothing is cached, so
//! parameter changes on the owner are always visible.

use std::fmt;
use std::sync::Arc;

use nalgebra::Vector3;

use super::polytope::Polytope;
use super::sampling::Params;
use crate::cfg::NORM_EPS;
use crate::error::{GeomError, Result};
use crate::quat::{Polar, Quat};

/// Parametrized value: `(gamma of this vertex, owner params) -> quaternion`.
pub type ParamFn = Arc<dyn Fn(f64, Params) -> Result<Quat> + Send + Sync>;

/// Where a point's quaternion comes from.
#[derive(Clone)]
pub enum PointSource {
    Fixed(Quat),
    Parametrized(ParamFn),
    /// Delegate to the owner's default rule for this index.
    Derived,
}

impl fmt::Debug for PointSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointSource::Fixed(q) => f.debug_tuple("Fixed").field(q).finish(),
            PointSource::Parametrized(_) => f.write_str("Parametrized(..)"),
            PointSource::Derived => f.write_str("Derived"),
        }
    }
}

/// Vertex of a polytope. The index is assigned by the owner on `reset_ranges`.
#[derive(Clone, Debug)]
pub struct Point {
    index: usize,
    source: PointSource,
}

impl Point {
    #[inline]
    pub fn derived() -> Self {
        Self {
            index: 0,
            source: PointSource::Derived,
        }
    }

    #[inline]
    pub fn fixed(q: Quat) -> Self {
        Self {
            index: 0,
            source: PointSource::Fixed(q),
        }
    }

    pub fn parametrized<F>(f: F) -> Self
    where
        F: Fn(f64, Params) -> Result<Quat> + Send + Sync + 'static,
    {
        Self {
            index: 0,
            source: PointSource::Parametrized(Arc::new(f)),
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn source(&self) -> &PointSource {
        &self.source
    }

    #[inline]
    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    #[inline]
    pub(crate) fn set_source(&mut self, source: PointSource) {
        self.source = source;
    }

    /// Resolve the current quaternion against `owner`.
    pub fn quaternion(&self, owner: &Polytope) -> Result<Quat> {
        match &self.source {
            PointSource::Fixed(q) => Ok(*q),
            PointSource::Parametrized(f) => {
                let gamma = owner.gamma(self.index).ok_or_else(|| {
                    GeomError::structural(format!(
                        "no gamma sample for vertex {} of {}",
                        self.index,
                        owner.name()
                    ))
                })?;
                f(gamma, owner.params())
            }
            PointSource::Derived => owner.default_quaternion(self.index),
        }
    }
}

/// Borrowed view of a point together with its owner.
#[derive(Clone, Copy)]
pub struct PointRef<'a> {
    owner: &'a Polytope,
    point: &'a Point,
}

impl<'a> PointRef<'a> {
    #[inline]
    pub(crate) fn new(owner: &'a Polytope, point: &'a Point) -> Self {
        Self { owner, point }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.point.index()
    }

    #[inline]
    pub fn owner(&self) -> &'a Polytope {
        self.owner
    }

    #[inline]
    pub fn point(&self) -> &'a Point {
        self.point
    }

    #[inline]
    pub fn quaternion(&self) -> Result<Quat> {
        self.point.quaternion(self.owner)
    }

    #[inline]
    pub fn polar(&self) -> Result<Polar> {
        Ok(self.quaternion()?.polar())
    }

    /// Azimuth (yaw on the horizontal plane, counter-clockwise).
    #[doc(alias = "d")]
    pub fn azimuth(&self) -> Result<f64> {
        Ok(self.polar()?.azimuth)
    }

    /// Elevation (pitch relative to the horizontal plane).
    #[doc(alias = "e")]
    pub fn elevation(&self) -> Result<f64> {
        Ok(self.polar()?.elevation)
    }

    /// Roll about the radial direction.
    #[doc(alias = "p")]
    pub fn roll(&self) -> Result<f64> {
        Ok(self.polar()?.roll)
    }

    pub fn norm(&self) -> Result<f64> {
        Ok(self.quaternion()?.norm())
    }

    #[doc(alias = "xyz")]
    pub fn cartesian(&self) -> Result<Vector3<f64>> {
        Ok(self.quaternion()?.cartesian())
    }

    /// Euclidean distance to any other point (possibly of another owner).
    pub fn distance_to(&self, other: &PointRef<'_>) -> Result<f64> {
        Ok((other.cartesian()? - self.cartesian()?).norm())
    }

    /// Distance to the next vertex of the same owner; `None` for the last
    /// vertex (a travel move, not a cut).
    pub fn distance_to_next(&self) -> Result<Option<f64>> {
        self.owner.distance_to_next(self.index())
    }

    /// Unit vector towards `target`.
    ///
    /// The norm of the result is 1 within `DIRECTION_EPS`, not exactly.
    /// Points closer than `NORM_EPS` count as coincident and yield a
    /// `Domain` error.
    pub fn direction_to(&self, target: &PointRef<'_>) -> Result<Vector3<f64>> {
        let v = target.cartesian()? - self.cartesian()?;
        let len = v.norm();
        if len <= NORM_EPS {
            return Err(GeomError::domain(format!(
                "no direction between coincident points (distance {len})"
            )));
        }
        Ok(v / len)
    }
}

impl fmt::Debug for PointRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointRef")
            .field("owner", &self.owner.name())
            .field("index", &self.index())
            .field("source", self.point.source())
            .finish()
    }
}

impl fmt::Display for PointRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quaternion() {
            Ok(q) => {
                let [w, i, j, k] = q.components();
                write!(f, "Point({w}, {i}, {j}, {k})")
            }
            Err(e) => write!(f, "Point(<{e}>)"),
        }
    }
}
