//! Vertex tables of the five regular solids (unscaled, centered at 0).
//!
//! References
//! - Standard coordinates: <https://en.wikipedia.org/wiki/Platonic_solid#Cartesian_coordinates>
//! - Tetrahedron: alternate corners of the cube (±1,±1,±1), product of
//!   signs +1. Its dual is the other alternation, i.e. `-v`.
//! - Icosahedron: cyclic permutations of (0, ±1, ±φ).
//! - Dodecahedron: (±1,±1,±1) plus cyclic permutations of (0, ±φ, ±1/φ).
//!   This orientation makes it the dual of the icosahedron above: each
//!   vertex direction of one is a face normal of the other.

use nalgebra::Vector3;

use crate::cfg::GOLDEN;

const SIGNS: [f64; 2] = [1.0, -1.0];

pub fn tetrahedron() -> Vec<Vector3<f64>> {
    vec![
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, -1.0, -1.0),
        Vector3::new(-1.0, 1.0, -1.0),
        Vector3::new(-1.0, -1.0, 1.0),
    ]
}

pub fn cube() -> Vec<Vector3<f64>> {
    let mut out = Vec::with_capacity(8);
    for &z in &SIGNS {
        for &y in &SIGNS {
            for &x in &SIGNS {
                out.push(Vector3::new(x, y, z));
            }
        }
    }
    out
}

pub fn octahedron() -> Vec<Vector3<f64>> {
    vec![
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, 0.0, -1.0),
    ]
}

/// The three cyclic permutations of `(0, ±a, ±b)`.
fn cyclic(a: f64, b: f64, out: &mut Vec<Vector3<f64>>) {
    for &s in &SIGNS {
        for &t in &SIGNS {
            let (p, q) = (s * a, t * b);
            out.push(Vector3::new(0.0, p, q));
            out.push(Vector3::new(p, q, 0.0));
            out.push(Vector3::new(q, 0.0, p));
        }
    }
}

pub fn icosahedron() -> Vec<Vector3<f64>> {
    let mut out = Vec::with_capacity(12);
    cyclic(1.0, GOLDEN, &mut out);
    out
}

pub fn dodecahedron() -> Vec<Vector3<f64>> {
    let mut out = cube();
    cyclic(GOLDEN, 1.0 / GOLDEN, &mut out);
    out
}
