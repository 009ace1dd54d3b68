//! Plain-data snapshot of a polytope for viewers and JSON output.
//!
//! The snapshot is a copy: editing it never touches the polytope.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::primitives::Polytope;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<[f64; 3]>,
    /// Directed vertex pairs, in edge order.
    pub edges: Vec<[usize; 2]>,
    /// Vertex loops; `None` when faces do not apply.
    pub faces: Option<Vec<Vec<usize>>>,
    /// Fan triangulation of every face, winding preserved.
    pub triangles: Vec<[usize; 3]>,
}

impl MeshData {
    pub fn from_polytope(poly: &Polytope) -> Result<Self> {
        let vertices = poly
            .cartesians()?
            .iter()
            .map(|c| [c.x, c.y, c.z])
            .collect();
        let edges = poly.edges().iter().map(|e| [e.from, e.to]).collect();
        let faces = poly.face_loops();
        let triangles = faces
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .flat_map(|lp| fan(lp))
            .collect();
        Ok(Self {
            name: poly.name().to_string(),
            vertices,
            edges,
            faces,
            triangles,
        })
    }
}

fn fan(lp: &[usize]) -> Vec<[usize; 3]> {
    (1..lp.len().saturating_sub(1))
        .map(|k| [lp[0], lp[k], lp[k + 1]])
        .collect()
}

impl Polytope {
    /// Copy out positions and topology.
    pub fn mesh(&self) -> Result<MeshData> {
        MeshData::from_polytope(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platonic::Polyhedron;
    use crate::primitives::Polygon;

    #[test]
    fn cube_mesh_has_two_triangles_per_face() {
        let m = Polyhedron::cube(1.0).unwrap().polytope().mesh().unwrap();
        assert_eq!(m.vertices.len(), 8);
        assert_eq!(m.edges.len(), 24);
        assert_eq!(m.faces.as_ref().map(Vec::len), Some(6));
        assert_eq!(m.triangles.len(), 12);
    }

    #[test]
    fn json_keeps_absent_faces_distinct() {
        let star = Polygon::star(1.0, 5, 2).build().unwrap().mesh().unwrap();
        let json = serde_json::to_value(&star).unwrap();
        assert!(json["faces"].is_null());
        assert_eq!(json["edges"][0], serde_json::json!([0, 2]));
        let back: MeshData = serde_json::from_value(json).unwrap();
        assert_eq!(back.edges, star.edges);
        assert_eq!(back.faces, None);
        for (a, b) in back.vertices.iter().zip(&star.vertices) {
            assert!((0..3).all(|k| (a[k] - b[k]).abs() < 1e-12));
        }
    }

    #[test]
    fn fan_of_a_hexagon() {
        let hex = Polygon::regular(1.0, 6).build().unwrap().mesh().unwrap();
        assert_eq!(
            hex.triangles,
            vec![[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]]
        );
    }
}
