//! Periodic planar tilings on `z = 0`.
//!
//! Every cell is a regular polygon inscribed in a circle of radius `r`:
//! - `Quad`: squares of side `r√2`, `cols x rows` cells.
//! - `Tri`: triangles of side `r√3`, row height `1.5 r`; `cols x rows`
//!   rhombic cells on a sheared lattice, each split into two triangles.
//! - `Hex`: flat-top hexagons, column spacing `1.5 r`, row spacing `√3 r`,
//!   odd columns shifted up by half a row.
//!
//! Shared corners are merged, so the result is one connected surface with
//! `V - E + F = 1`. Faces wind counter-clockwise seen from +z.
//!
//! `Penrose` and `Quasicrystal` are aperiodic and not built.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;

use crate::error::{GeomError, Result};
use crate::primitives::topology::{edges_from_loops, quantize3};
use crate::primitives::{Point, Polytope, RangeCfg};
use crate::quat::Quat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TilingKind {
    Tri,
    Quad,
    Hex,
    Penrose,
    Quasicrystal,
}

impl TilingKind {
    pub const ALL: [TilingKind; 5] = [
        TilingKind::Tri,
        TilingKind::Quad,
        TilingKind::Hex,
        TilingKind::Penrose,
        TilingKind::Quasicrystal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TilingKind::Tri => "TriGrid",
            TilingKind::Quad => "QuadGrid",
            TilingKind::Hex => "HexGrid",
            TilingKind::Penrose => "Penrose",
            TilingKind::Quasicrystal => "Quasicrystal",
        }
    }

    pub fn is_periodic(&self) -> bool {
        matches!(self, TilingKind::Tri | TilingKind::Quad | TilingKind::Hex)
    }
}

impl fmt::Display for TilingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TilingKind {
    type Err = GeomError;

    /// Accepts `tri`, `quad`, `hex`, `penrose`, `quasicrystal` or the full
    /// names, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        TilingKind::ALL
            .iter()
            .copied()
            .find(|k| {
                let name = k.name().to_ascii_lowercase();
                name == lower || name.strip_suffix("grid") == Some(lower.as_str())
            })
            .ok_or_else(|| GeomError::config(format!("unknown tiling '{s}'")))
    }
}

/// A `cols x rows` patch of one tiling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub kind: TilingKind,
    pub radius: f64,
    pub cols: usize,
    pub rows: usize,
}

impl Grid {
    pub fn new(kind: TilingKind, radius: f64, cols: usize, rows: usize) -> Self {
        Self {
            kind,
            radius,
            cols,
            rows,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.kind.is_periodic() {
            return Err(GeomError::not_supported(format!(
                "{} tiling is aperiodic",
                self.kind
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GeomError::config(format!(
                "{}: radius must be positive, got {}",
                self.kind, self.radius
            )));
        }
        if self.cols == 0 || self.rows == 0 {
            return Err(GeomError::config(format!(
                "{}: need at least one column and one row, got {}x{}",
                self.kind, self.cols, self.rows
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Polytope> {
        self.validate()?;
        let mut pool = VertexPool::new(self.radius * 1e-6);
        let loops = match self.kind {
            TilingKind::Quad => self.quad_loops(&mut pool),
            TilingKind::Tri => self.tri_loops(&mut pool),
            TilingKind::Hex => self.hex_loops(&mut pool),
            TilingKind::Penrose | TilingKind::Quasicrystal => {
                return Err(GeomError::not_supported(self.kind.name()))
            }
        };
        let (edges, faces) = edges_from_loops(&loops);
        let vertices = pool
            .positions
            .iter()
            .map(|p| Quat::from_cartesian(p.x, p.y, p.z, 0.0).map(Point::fixed))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            kind = %self.kind,
            cols = self.cols,
            rows = self.rows,
            vertices = vertices.len(),
            faces = faces.len(),
            "tiling"
        );
        Polytope::new(self.kind.name(), vertices, edges, Some(faces), RangeCfg::default())
    }

    fn quad_loops(&self, pool: &mut VertexPool) -> Vec<Vec<usize>> {
        let s = self.radius * 2f64.sqrt();
        let mut loops = Vec::with_capacity(self.cols * self.rows);
        for j in 0..self.rows {
            for i in 0..self.cols {
                let (x, y) = (i as f64 * s, j as f64 * s);
                loops.push(vec![
                    pool.add(x, y),
                    pool.add(x + s, y),
                    pool.add(x + s, y + s),
                    pool.add(x, y + s),
                ]);
            }
        }
        loops
    }

    fn tri_loops(&self, pool: &mut VertexPool) -> Vec<Vec<usize>> {
        let s = self.radius * 3f64.sqrt();
        let h = 1.5 * self.radius;
        let at = |i: usize, j: usize| (i as f64 * s + j as f64 * s / 2.0, j as f64 * h);
        let mut loops = Vec::with_capacity(2 * self.cols * self.rows);
        for j in 0..self.rows {
            for i in 0..self.cols {
                let a = at(i, j);
                let b = at(i + 1, j);
                let c = at(i + 1, j + 1);
                let d = at(i, j + 1);
                let (a, b, c, d) = (
                    pool.add(a.0, a.1),
                    pool.add(b.0, b.1),
                    pool.add(c.0, c.1),
                    pool.add(d.0, d.1),
                );
                loops.push(vec![a, b, d]);
                loops.push(vec![b, c, d]);
            }
        }
        loops
    }

    fn hex_loops(&self, pool: &mut VertexPool) -> Vec<Vec<usize>> {
        let r = self.radius;
        let dy = 3f64.sqrt() * r;
        let mut loops = Vec::with_capacity(self.cols * self.rows);
        for j in 0..self.rows {
            for i in 0..self.cols {
                let cx = 1.5 * r * i as f64;
                let cy = dy * (j as f64 + if i % 2 == 1 { 0.5 } else { 0.0 });
                let lp = (0..6)
                    .map(|k| {
                        let t = std::f64::consts::FRAC_PI_3 * k as f64;
                        pool.add(cx + r * t.cos(), cy + r * t.sin())
                    })
                    .collect();
                loops.push(lp);
            }
        }
        loops
    }
}

/// Positions with coincident points merged by quantized key.
struct VertexPool {
    tol: f64,
    positions: Vec<Vector3<f64>>,
    lookup: HashMap<(i64, i64, i64), usize>,
}

impl VertexPool {
    fn new(tol: f64) -> Self {
        Self {
            tol,
            positions: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    fn add(&mut self, x: f64, y: f64) -> usize {
        let p = Vector3::new(x, y, 0.0);
        let key = quantize3(&p, self.tol);
        *self.lookup.entry(key).or_insert_with(|| {
            self.positions.push(p);
            self.positions.len() - 1
        })
    }
}
