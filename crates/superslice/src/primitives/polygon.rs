//! Flat regular and star polygons on the horizontal plane.

use std::f64::consts::TAU;

use super::point::Point;
use super::polytope::Polytope;
use super::sampling::RangeCfg;
use super::topology::{edges_from_loops, Edge};
use crate::error::{GeomError, Result};
use crate::quat::Quat;

/// Polygon template: `sides` vertices on a circle of radius `radius`,
/// vertex `i` joined to vertex `i + skip`.
///
/// `skip == 1` is the convex polygon (one face, counter-clockwise seen from
/// +z); `skip > 1` draws the star polygon `{sides/skip}`, whose self-crossing
/// outline has no face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polygon {
    pub radius: f64,
    pub sides: usize,
    pub skip: usize,
    /// Azimuth of vertex 0.
    pub phase: f64,
}

impl Default for Polygon {
    fn default() -> Self {
        Self {
            radius: 1.0,
            sides: 6,
            skip: 1,
            phase: 0.0,
        }
    }
}

impl Polygon {
    pub fn regular(radius: f64, sides: usize) -> Self {
        Self {
            radius,
            sides,
            ..Self::default()
        }
    }

    pub fn star(radius: f64, sides: usize, skip: usize) -> Self {
        Self {
            radius,
            sides,
            skip,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.sides < 3 {
            return Err(GeomError::config(format!(
                "a polygon needs at least 3 sides, got {}",
                self.sides
            )));
        }
        if self.skip == 0 || 2 * self.skip >= self.sides {
            return Err(GeomError::config(format!(
                "skip must be at least 1 and below half of {} sides, got {}",
                self.sides, self.skip
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GeomError::config(format!(
                "polygon radius must be positive, got {}",
                self.radius
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Polytope> {
        self.validate()?;
        let n = self.sides;
        let vertices = (0..n)
            .map(|i| {
                let azimuth = self.phase + TAU * i as f64 / n as f64;
                Quat::from_polar(self.radius, 0.0, azimuth, 0.0).map(Point::fixed)
            })
            .collect::<Result<Vec<_>>>()?;
        let (edges, faces) = if self.skip == 1 {
            let (edges, faces) = edges_from_loops(&[(0..n).collect()]);
            (edges, Some(faces))
        } else {
            let edges = (0..n).map(|i| Edge::new(i, (i + self.skip) % n)).collect();
            (edges, None)
        };
        let name = if self.skip == 1 {
            format!("Polygon{{{n}}}")
        } else {
            format!("Polygon{{{n}/{}}}", self.skip)
        };
        tracing::debug!(%name, radius = self.radius, "polygon");
        Polytope::new(name, vertices, edges, faces, RangeCfg::default())
    }
}
