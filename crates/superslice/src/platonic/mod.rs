//! Platonic solids on a circumscribed sphere of radius `r`.
//!
//! Purpose
//! - Build the five regular solids as closed `Polytope`s with fixed vertices,
//!   both directions of every edge, and one face per facet.
//!
//! Algorithm
//! - Vertices: a standard coordinate table, rescaled to radius `r`.
//! - Faces: each vertex direction of the dual solid is an outward facet
//!   normal `n`; the facet is the set of vertices maximizing `v̂·n` (within
//!   `PLANE_EPS`), wound counter-clockwise around `n`.
//! - Edges: both directions from the face loops, edge `2k + 1` reversing `2k`.
//!
//! Why this design
//! - Deriving faces from normals keeps the tables to vertex coordinates only;
//!   no hand-written edge or face lists to get wrong.
//! - The declared V/E/F constants are checked against what was built
//!   (`verify_counts`), so a table defect fails loudly as `Structural`.

mod tables;

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;

use crate::cfg::PLANE_EPS;
use crate::error::{GeomError, Result};
use crate::primitives::topology::{edges_from_loops, wind_around};
use crate::primitives::{Point, Polygon, Polytope, RangeCfg};
use crate::quat::Quat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Solid {
    Tetrahedron,
    Cube,
    Octahedron,
    Dodecahedron,
    Icosahedron,
}

/// Declared `(vertices, undirected edges, faces)` of a solid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counts {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
}

impl Solid {
    pub const ALL: [Solid; 5] = [
        Solid::Tetrahedron,
        Solid::Cube,
        Solid::Octahedron,
        Solid::Dodecahedron,
        Solid::Icosahedron,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Solid::Tetrahedron => "Tetrahedron",
            Solid::Cube => "Cube",
            Solid::Octahedron => "Octahedron",
            Solid::Dodecahedron => "Dodecahedron",
            Solid::Icosahedron => "Icosahedron",
        }
    }

    pub fn counts(&self) -> Counts {
        let (vertices, edges, faces) = match self {
            Solid::Tetrahedron => (4, 6, 4),
            Solid::Cube => (8, 12, 6),
            Solid::Octahedron => (6, 12, 8),
            Solid::Dodecahedron => (20, 30, 12),
            Solid::Icosahedron => (12, 30, 20),
        };
        Counts {
            vertices,
            edges,
            faces,
        }
    }

    /// Sides of every face.
    pub fn face_sides(&self) -> usize {
        match self {
            Solid::Tetrahedron | Solid::Octahedron | Solid::Icosahedron => 3,
            Solid::Cube => 4,
            Solid::Dodecahedron => 5,
        }
    }

    pub fn dual(&self) -> Solid {
        match self {
            Solid::Tetrahedron => Solid::Tetrahedron,
            Solid::Cube => Solid::Octahedron,
            Solid::Octahedron => Solid::Cube,
            Solid::Dodecahedron => Solid::Icosahedron,
            Solid::Icosahedron => Solid::Dodecahedron,
        }
    }

    fn table(&self) -> Vec<Vector3<f64>> {
        match self {
            Solid::Tetrahedron => tables::tetrahedron(),
            Solid::Cube => tables::cube(),
            Solid::Octahedron => tables::octahedron(),
            Solid::Dodecahedron => tables::dodecahedron(),
            Solid::Icosahedron => tables::icosahedron(),
        }
    }

    /// Outward unit facet normals.
    fn facet_normals(&self) -> Vec<Vector3<f64>> {
        let dual = self.dual().table();
        match self {
            // self-dual: facet opposite vertex v faces -v
            Solid::Tetrahedron => dual.iter().map(|v| -v.normalize()).collect(),
            _ => dual.iter().map(|v| v.normalize()).collect(),
        }
    }
}

impl fmt::Display for Solid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Solid {
    type Err = GeomError;

    /// Case-insensitive; `tetra`, `octa`, `dodeca`, `icosa` are accepted too.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        Solid::ALL
            .iter()
            .copied()
            .find(|solid| {
                let name = solid.name().to_ascii_lowercase();
                name == lower || (lower.len() >= 4 && name.starts_with(&lower))
            })
            .ok_or_else(|| GeomError::config(format!("unknown solid '{s}'")))
    }
}

/// Compare declared and built counts. Edges are counted undirected.
pub fn verify_counts(poly: &Polytope, declared: Counts) -> Result<()> {
    let built = Counts {
        vertices: poly.vertex_count(),
        edges: poly.undirected_edge_count(),
        faces: poly.face_count().unwrap_or(0),
    };
    if built != declared {
        return Err(GeomError::structural(format!(
            "{}: declared V={} E={} F={}, built V={} E={} F={}",
            poly.name(),
            declared.vertices,
            declared.edges,
            declared.faces,
            built.vertices,
            built.edges,
            built.faces
        )));
    }
    Ok(())
}

/// A regular solid with its radius and optional face template.
#[derive(Clone, Debug)]
pub struct Polyhedron {
    solid: Solid,
    radius: f64,
    template: Option<Polygon>,
    poly: Polytope,
}

impl Polyhedron {
    pub fn new(solid: Solid, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeomError::config(format!(
                "{solid}: radius must be positive, got {radius}"
            )));
        }
        let positions: Vec<Vector3<f64>> = solid
            .table()
            .iter()
            .map(|v| v.normalize() * radius)
            .collect();
        let loops = face_loops(&positions, &solid.facet_normals());
        let sides = solid.face_sides();
        if let Some((f, lp)) = loops.iter().enumerate().find(|(_, lp)| lp.len() != sides) {
            return Err(GeomError::structural(format!(
                "{solid}: face {f} has {} vertices, expected {sides}",
                lp.len()
            )));
        }
        let (edges, faces) = edges_from_loops(&loops);
        let vertices = positions
            .iter()
            .map(|p| Quat::from_cartesian(p.x, p.y, p.z, 0.0).map(Point::fixed))
            .collect::<Result<Vec<_>>>()?;
        let poly = Polytope::new(solid.name(), vertices, edges, Some(faces), RangeCfg::default())?;
        verify_counts(&poly, solid.counts())?;
        tracing::debug!(%solid, radius, "polyhedron");
        Ok(Self {
            solid,
            radius,
            template: None,
            poly,
        })
    }

    pub fn tetrahedron(radius: f64) -> Result<Self> {
        Self::new(Solid::Tetrahedron, radius)
    }
    pub fn cube(radius: f64) -> Result<Self> {
        Self::new(Solid::Cube, radius)
    }
    pub fn octahedron(radius: f64) -> Result<Self> {
        Self::new(Solid::Octahedron, radius)
    }
    pub fn dodecahedron(radius: f64) -> Result<Self> {
        Self::new(Solid::Dodecahedron, radius)
    }
    pub fn icosahedron(radius: f64) -> Result<Self> {
        Self::new(Solid::Icosahedron, radius)
    }

    /// Attach a default face template; its side count must match the faces.
    pub fn with_template(mut self, template: Polygon) -> Result<Self> {
        if template.sides != self.solid.face_sides() || template.skip != 1 {
            return Err(GeomError::config(format!(
                "{}: faces are {}-gons, template is {{{}/{}}}",
                self.solid,
                self.solid.face_sides(),
                template.sides,
                template.skip
            )));
        }
        self.template = Some(template);
        Ok(self)
    }

    #[inline]
    pub fn solid(&self) -> Solid {
        self.solid
    }
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
    #[inline]
    pub fn template(&self) -> Option<&Polygon> {
        self.template.as_ref()
    }
    #[inline]
    pub fn polytope(&self) -> &Polytope {
        &self.poly
    }
    #[inline]
    pub fn polytope_mut(&mut self) -> &mut Polytope {
        &mut self.poly
    }
    pub fn into_polytope(self) -> Polytope {
        self.poly
    }

    /// Length of edge 0 (all edges are equal on a regular solid).
    pub fn edge_length(&self) -> Result<f64> {
        let e = self.poly.edges().first().copied().ok_or_else(|| {
            GeomError::structural(format!("{}: no edges", self.solid))
        })?;
        let pos = self.poly.cartesians()?;
        Ok((pos[e.to] - pos[e.from]).norm())
    }
}

/// For each outward normal, the tight vertex set wound counter-clockwise.
fn face_loops(positions: &[Vector3<f64>], normals: &[Vector3<f64>]) -> Vec<Vec<usize>> {
    let support: Vec<f64> = positions.iter().map(|p| p.norm()).collect();
    normals
        .iter()
        .map(|n| {
            let dots: Vec<f64> = positions
                .iter()
                .zip(&support)
                .map(|(p, s)| p.dot(n) / s)
                .collect();
            let top = dots.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let ids = (0..positions.len())
                .filter(|&i| top - dots[i] <= PLANE_EPS)
                .collect();
            wind_around(ids, positions, n)
        })
        .collect()
}
