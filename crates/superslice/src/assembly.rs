//! Ordered sequence of shapes, visited one after another.
//!
//! Adjacency is the sequence order: after the last vertex of shape `k` comes
//! the first vertex of shape `k + 1`. Within a shape, consecutive indices are
//! cut moves; crossing to the next shape is a travel move.

use std::fmt;

use crate::error::{GeomError, Result};
use crate::primitives::Polytope;

#[derive(Clone, Debug, Default)]
pub struct Assembly {
    shapes: Vec<Polytope>,
}

impl Assembly {
    pub fn new(shapes: Vec<Polytope>) -> Self {
        Self { shapes }
    }

    pub fn push(&mut self, shape: Polytope) {
        tracing::debug!(name = shape.name(), position = self.shapes.len(), "assembly push");
        self.shapes.push(shape);
    }

    #[inline]
    pub fn shapes(&self) -> &[Polytope] {
        &self.shapes
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Distance from vertex `vertex` of shape `shape` to the vertex after it.
    ///
    /// - Inside a shape: distance to `vertex + 1`.
    /// - Last vertex, `same_segment = true`: `None` (a travel move follows).
    /// - Last vertex, `same_segment = false`: distance to the first vertex of
    ///   the next non-empty shape; `None` after the final shape.
    pub fn distance_to_next(
        &self,
        shape: usize,
        vertex: usize,
        same_segment: bool,
    ) -> Result<Option<f64>> {
        let poly = self.shapes.get(shape).ok_or_else(|| {
            GeomError::structural(format!(
                "assembly: shape {shape} out of range (len {})",
                self.shapes.len()
            ))
        })?;
        let inside = poly.distance_to_next(vertex)?;
        if inside.is_some() || same_segment {
            return Ok(inside);
        }
        let Some(next) = self.shapes[shape + 1..].iter().find(|p| p.vertex_count() > 0) else {
            return Ok(None);
        };
        let from = poly.vertices()[vertex].quaternion(poly)?.cartesian();
        let to = next.vertices()[0].quaternion(next)?.cartesian();
        Ok(Some((to - from).norm()))
    }

    /// Sum of all cut moves (within shapes) and travel moves (between them).
    pub fn path_length(&self) -> Result<(f64, f64)> {
        let (mut cut, mut travel) = (0.0, 0.0);
        for (s, poly) in self.shapes.iter().enumerate() {
            for v in 0..poly.vertex_count() {
                match (poly.distance_to_next(v)?, self.distance_to_next(s, v, false)?) {
                    (Some(d), _) => cut += d,
                    (None, Some(d)) => travel += d,
                    (None, None) => {}
                }
            }
        }
        Ok((cut, travel))
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, shape) in self.shapes.iter().enumerate() {
            if k > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{shape}")?;
        }
        Ok(())
    }
}
