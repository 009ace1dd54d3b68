//! Edges, faces and the shared face-loop builder.
//!
//! Conventions
//! - An `Edge` is a directed pair of vertex indices.
//! - A `Face` is a closed loop of edge indices: each edge ends where the next
//!   one starts. Winding is counter-clockwise seen from outside (right-hand
//!   rule around the outward normal); reversing a loop flips the face.
//! - Closed solids store both directions of every edge, so each directed
//!   edge is used by exactly one face.

use std::collections::HashMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::cfg::PLANE_EPS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Edge {
    #[inline]
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
    /// Direction-free key `(min, max)`.
    #[inline]
    pub fn key(&self) -> (usize, usize) {
        (self.from.min(self.to), self.from.max(self.to))
    }
}

/// Ordered loop of edge indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub edges: Vec<usize>,
}

impl Face {
    #[inline]
    pub fn new(edges: Vec<usize>) -> Self {
        Self { edges }
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Consecutive vertex chain `0→1→…→n-1` (open curves).
pub fn chain_edges(n: usize) -> Vec<Edge> {
    (1..n).map(|i| Edge::new(i - 1, i)).collect()
}

/// Build edges (both directions, in first-seen order) and faces from vertex
/// loops. Edge `2k` is the direction first met, `2k + 1` its reverse.
pub fn edges_from_loops(loops: &[Vec<usize>]) -> (Vec<Edge>, Vec<Face>) {
    let mut edges: Vec<Edge> = Vec::new();
    let mut lookup: HashMap<(usize, usize), usize> = HashMap::new();
    let mut faces = Vec::with_capacity(loops.len());
    for lp in loops {
        let mut face = Vec::with_capacity(lp.len());
        for k in 0..lp.len() {
            let e = Edge::new(lp[k], lp[(k + 1) % lp.len()]);
            let idx = match lookup.get(&(e.from, e.to)) {
                Some(&i) => i,
                None => {
                    let i = edges.len();
                    lookup.insert((e.from, e.to), i);
                    lookup.insert((e.to, e.from), i + 1);
                    edges.push(e);
                    edges.push(e.reversed());
                    i
                }
            };
            face.push(idx);
        }
        faces.push(Face::new(face));
    }
    (edges, faces)
}

/// Sort a planar vertex set counter-clockwise around `normal`.
pub fn wind_around(mut ids: Vec<usize>, positions: &[Vector3<f64>], normal: &Vector3<f64>) -> Vec<usize> {
    if ids.len() < 3 {
        return ids;
    }
    let centroid: Vector3<f64> = ids
        .iter()
        .fold(Vector3::zeros(), |acc, &i| acc + positions[i])
        / ids.len() as f64;
    let e1 = (positions[ids[0]] - centroid).normalize();
    let e2 = normal.cross(&e1);
    let angle = |i: usize| {
        let d = positions[i] - centroid;
        d.dot(&e2).atan2(d.dot(&e1))
    };
    ids.sort_by(|&a, &b| {
        angle(a)
            .partial_cmp(&angle(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ids
}

/// Newell normal of a vertex loop (unnormalized; zero when degenerate).
pub fn loop_normal(ids: &[usize], positions: &[Vector3<f64>]) -> Vector3<f64> {
    let mut n = Vector3::zeros();
    for k in 0..ids.len() {
        let a = positions[ids[k]];
        let b = positions[ids[(k + 1) % ids.len()]];
        n += Vector3::new(
            (a.y - b.y) * (a.z + b.z),
            (a.z - b.z) * (a.x + b.x),
            (a.x - b.x) * (a.y + b.y),
        );
    }
    n
}

/// Quantized key for merging coincident positions.
pub(crate) fn quantize3(v: &Vector3<f64>, tol: f64) -> (i64, i64, i64) {
    let s = 1.0 / tol;
    (
        (v.x * s).round() as i64,
        (v.y * s).round() as i64,
        (v.z * s).round() as i64,
    )
}

/// Whether all positions of a loop lie in one plane.
pub fn is_planar(ids: &[usize], positions: &[Vector3<f64>]) -> bool {
    let n = loop_normal(ids, positions);
    let len = n.norm();
    if len <= PLANE_EPS || ids.is_empty() {
        return false;
    }
    let n = n / len;
    let p0 = positions[ids[0]];
    ids.iter()
        .all(|&i| (positions[i] - p0).dot(&n).abs() <= 1e3 * PLANE_EPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loops_share_reversed_edges() {
        // two triangles sharing edge 1-2
        let (edges, faces) = edges_from_loops(&[vec![0, 1, 2], vec![2, 1, 3]]);
        assert_eq!(edges.len(), 10);
        assert_eq!(faces.len(), 2);
        let shared_a = edges[faces[0].edges[1]];
        let shared_b = edges[faces[1].edges[0]];
        assert_eq!(shared_a, Edge::new(1, 2));
        assert_eq!(shared_b, Edge::new(2, 1));
        assert_eq!(shared_a.key(), shared_b.key());
    }

    #[test]
    fn winding_is_counter_clockwise() {
        let pos = vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        let up = Vector3::new(0.0, 0.0, 1.0);
        let ids = wind_around(vec![0, 1, 2, 3], &pos, &up);
        assert!(loop_normal(&ids, &pos).dot(&up) > 0.0);
        assert!(is_planar(&ids, &pos));
        let down = wind_around(vec![0, 1, 2, 3], &pos, &-up);
        assert!(loop_normal(&down, &pos).dot(&up) < 0.0);
    }

    #[test]
    fn chain_is_consecutive() {
        assert!(chain_edges(0).is_empty());
        assert!(chain_edges(1).is_empty());
        assert_eq!(chain_edges(3), vec![Edge::new(0, 1), Edge::new(1, 2)]);
    }
}
