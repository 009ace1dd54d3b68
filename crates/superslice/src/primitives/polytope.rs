//! Polytope: vertices, directed edges, face loops and the gamma sampling
//! that drives lazily evaluated vertices.
//!
//! Invariants (checked by `check_invariants`)
//! - `len == vertices.len()` and vertex `i` carries index `i`.
//! - `gammas.0` holds exactly `len` samples, `gammas.1` exactly `steps`.
//! - Every edge endpoint is a vertex index; every face is a closed loop of
//!   at least three edge indices.
//!
//! Any change to the vertex collection goes through `reset_ranges`, so the
//! invariants hold after every public mutation. Edges and faces refer to
//! vertices by index: changing a vertex value is seen by all of them.

use std::fmt;
use std::sync::Arc;

use nalgebra::{UnitQuaternion, Vector3};

use super::point::{Point, PointRef, PointSource};
use super::sampling::{Params, RangeCfg};
use super::topology::{Edge, Face};
use crate::error::{GeomError, Result};
use crate::quat::{Pinch, Quat};

/// Default value of `Derived` points, supplied by the owning generator.
pub trait VertexRule: fmt::Debug + Send + Sync {
    fn default_quaternion(&self, gamma: f64, index: usize) -> Result<Quat>;
}

#[derive(Clone, Debug)]
pub struct Polytope {
    name: String,
    vertices: Vec<Point>,
    edges: Vec<Edge>,
    faces: Option<Vec<Face>>,
    ranges: RangeCfg,
    params: Params,
    rule: Option<Arc<dyn VertexRule>>,
    len: usize,
    gammas: (Vec<f64>, Vec<f64>),
}

impl Polytope {
    /// Validate topology and assign indices.
    ///
    /// `faces = None` means faces do not apply (curves), as opposed to a
    /// solid with zero faces. An empty vertex set is allowed.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Point>,
        edges: Vec<Edge>,
        faces: Option<Vec<Face>>,
        ranges: RangeCfg,
    ) -> Result<Self> {
        let name = name.into();
        validate_topology(&name, vertices.len(), &edges, faces.as_deref())?;
        let mut out = Self {
            name,
            vertices,
            edges,
            faces,
            ranges,
            params: Params::default(),
            rule: None,
            len: 0,
            gammas: (Vec::new(), Vec::new()),
        };
        out.reset_ranges()?;
        Ok(out)
    }

    /// Attach the generator that evaluates `Derived` points.
    pub fn with_rule(mut self, rule: Arc<dyn VertexRule>) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Recount vertices, resample both axes, reassign indices `0..n`.
    ///
    /// A custom sampler that returns the wrong number of samples is a
    /// `Config` error; the polytope is left unchanged.
    pub fn reset_ranges(&mut self) -> Result<()> {
        let gammas = sample_axes(&self.name, &self.ranges, self.vertices.len())?;
        self.len = self.vertices.len();
        self.gammas = gammas;
        for (i, v) in self.vertices.iter_mut().enumerate() {
            v.set_index(i);
        }
        tracing::debug!(
            name = %self.name,
            vertices = self.len,
            steps = self.ranges.steps,
            "reset_ranges"
        );
        Ok(())
    }

    /// Replace the whole topology (used when a generator resamples).
    /// All-or-nothing: on error the old topology stays.
    pub fn replace_topology(
        &mut self,
        vertices: Vec<Point>,
        edges: Vec<Edge>,
        faces: Option<Vec<Face>>,
    ) -> Result<()> {
        validate_topology(&self.name, vertices.len(), &edges, faces.as_deref())?;
        sample_axes(&self.name, &self.ranges, vertices.len())?;
        self.vertices = vertices;
        self.edges = edges;
        self.faces = faces;
        self.reset_ranges()
    }

    /// Swap the sampling ranges; on error the old ranges stay.
    pub fn set_ranges(&mut self, ranges: RangeCfg) -> Result<()> {
        sample_axes(&self.name, &ranges, self.vertices.len())?;
        self.ranges = ranges;
        self.reset_ranges()
    }

    /// Runtime parameters for parametrized points. No state is cached, so
    /// the next read sees the new values.
    pub fn set_params(&mut self, params: Params) {
        tracing::debug!(name = %self.name, omega = params.omega, psi = params.psi, "set_params");
        self.params = params;
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[inline]
    pub fn params(&self) -> Params {
        self.params
    }
    #[inline]
    pub fn ranges(&self) -> &RangeCfg {
        &self.ranges
    }
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    #[inline]
    pub fn faces(&self) -> Option<&[Face]> {
        self.faces.as_deref()
    }
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.len
    }
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    /// Number of distinct vertex pairs joined by an edge (either direction).
    pub fn undirected_edge_count(&self) -> usize {
        let mut keys: Vec<(usize, usize)> = self.edges.iter().map(Edge::key).collect();
        keys.sort_unstable();
        keys.dedup();
        keys.len()
    }
    /// `None` when faces do not apply; `Some(0)` for a faceless solid.
    #[inline]
    pub fn face_count(&self) -> Option<usize> {
        self.faces.as_ref().map(Vec::len)
    }
    /// Layer samples of the second axis.
    #[inline]
    pub fn layer_samples(&self) -> &[f64] {
        &self.gammas.1
    }
    /// First-axis samples, one per vertex.
    #[inline]
    pub fn gamma_samples(&self) -> &[f64] {
        &self.gammas.0
    }

    /// First-axis sample for `index`, wrapping modulo the vertex count.
    pub fn gamma(&self, index: usize) -> Option<f64> {
        if self.len == 0 {
            return None;
        }
        self.gammas.0.get(index % self.len).copied()
    }

    /// Value of a `Derived` point at `index`.
    pub fn default_quaternion(&self, index: usize) -> Result<Quat> {
        let rule = self.rule.as_ref().ok_or_else(|| {
            GeomError::structural(format!(
                "{}: vertex {index} has no value and no default rule",
                self.name
            ))
        })?;
        let gamma = self.gamma(index).ok_or_else(|| {
            GeomError::structural(format!("{}: no gamma sample for vertex {index}", self.name))
        })?;
        rule.default_quaternion(gamma, index).map_err(|e| {
            tracing::trace!(name = %self.name, index, gamma, error = %e, "default_quaternion");
            e
        })
    }

    #[inline]
    pub fn vertex(&self, index: usize) -> Option<PointRef<'_>> {
        self.vertices.get(index).map(|p| PointRef::new(self, p))
    }

    pub fn points(&self) -> impl Iterator<Item = PointRef<'_>> + '_ {
        self.vertices.iter().map(move |p| PointRef::new(self, p))
    }

    /// Current quaternion of every vertex, in index order.
    pub fn quaternions(&self) -> Result<Vec<Quat>> {
        self.vertices.iter().map(|p| p.quaternion(self)).collect()
    }

    /// Current cartesian position of every vertex, in index order.
    pub fn cartesians(&self) -> Result<Vec<Vector3<f64>>> {
        Ok(self.quaternions()?.iter().map(Quat::cartesian).collect())
    }

    /// Distance from `index` to `index + 1`; `None` for the last vertex.
    pub fn distance_to_next(&self, index: usize) -> Result<Option<f64>> {
        if index >= self.len {
            return Err(GeomError::structural(format!(
                "{}: vertex {index} out of range (len {})",
                self.name, self.len
            )));
        }
        if index + 1 == self.len {
            return Ok(None);
        }
        let a = self.vertices[index].quaternion(self)?.cartesian();
        let b = self.vertices[index + 1].quaternion(self)?.cartesian();
        Ok(Some((b - a).norm()))
    }

    /// Vertex indices of face `f`, in winding order.
    pub fn face_vertices(&self, f: usize) -> Option<Vec<usize>> {
        let face = self.faces.as_ref()?.get(f)?;
        Some(face.edges.iter().map(|&e| self.edges[e].from).collect())
    }

    /// All faces as vertex loops; `None` when faces do not apply.
    pub fn face_loops(&self) -> Option<Vec<Vec<usize>>> {
        let n = self.faces.as_ref()?.len();
        (0..n).map(|f| self.face_vertices(f)).collect()
    }

    /// Overwrite one vertex with a fixed value.
    pub fn set_vertex(&mut self, index: usize, q: Quat) -> Result<()> {
        let p = self.vertices.get_mut(index).ok_or_else(|| {
            GeomError::structural(format!("{}: vertex {index} out of range", self.name))
        })?;
        p.set_source(PointSource::Fixed(q));
        Ok(())
    }

    /// Apply `f` to every current vertex value and store the results as fixed
    /// values. All-or-nothing: on error no vertex is changed.
    pub fn map_vertices<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(Quat) -> Result<Quat>,
    {
        let next = self
            .quaternions()?
            .into_iter()
            .map(&mut f)
            .collect::<Result<Vec<_>>>()?;
        for (p, q) in self.vertices.iter_mut().zip(next) {
            p.set_source(PointSource::Fixed(q));
        }
        Ok(())
    }

    pub fn rotate(&mut self, by: &UnitQuaternion<f64>) -> Result<()> {
        self.map_vertices(|q| Ok(q.rotated(by)))
    }

    pub fn translate(&mut self, by: &Vector3<f64>) -> Result<()> {
        self.map_vertices(|q| q.translated(by))
    }

    pub fn scale(&mut self, f: f64) -> Result<()> {
        self.map_vertices(|q| q.scaled(f))
    }

    pub fn pinch(&mut self, pinch: Pinch) -> Result<()> {
        self.map_vertices(|q| q.pinched(pinch))
    }

    /// Verify the index and sampling invariants.
    pub fn check_invariants(&self) -> Result<()> {
        if self.len != self.vertices.len() {
            return Err(GeomError::structural(format!(
                "{}: recorded {} vertices but holds {}",
                self.name,
                self.len,
                self.vertices.len()
            )));
        }
        if let Some((i, p)) = self
            .vertices
            .iter()
            .enumerate()
            .find(|(i, p)| p.index() != *i)
        {
            return Err(GeomError::structural(format!(
                "{}: vertex at position {i} carries stale index {}",
                self.name,
                p.index()
            )));
        }
        if self.gammas.0.len() != self.len || self.gammas.1.len() != self.ranges.steps {
            return Err(GeomError::structural(format!(
                "{}: sampling arrays ({}, {}) do not match ({}, {})",
                self.name,
                self.gammas.0.len(),
                self.gammas.1.len(),
                self.len,
                self.ranges.steps
            )));
        }
        validate_topology(&self.name, self.len, &self.edges, self.faces.as_deref())
    }
}

/// Sample both axes, rejecting samplers that miss the requested count.
fn sample_axes(name: &str, ranges: &RangeCfg, len: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    let gamma = ranges.gamma.sample(len);
    let layers = ranges.layers.sample(ranges.steps);
    if gamma.len() != len || layers.len() != ranges.steps {
        return Err(GeomError::config(format!(
            "{name}: sampler returned ({}, {}) samples, expected ({len}, {})",
            gamma.len(),
            layers.len(),
            ranges.steps
        )));
    }
    Ok((gamma, layers))
}

fn validate_topology(
    name: &str,
    n_vertices: usize,
    edges: &[Edge],
    faces: Option<&[Face]>,
) -> Result<()> {
    if let Some((k, e)) = edges
        .iter()
        .enumerate()
        .find(|(_, e)| e.from >= n_vertices || e.to >= n_vertices)
    {
        return Err(GeomError::structural(format!(
            "{name}: edge {k} ({} -> {}) references a vertex outside 0..{n_vertices}",
            e.from, e.to
        )));
    }
    for (f, face) in faces.unwrap_or(&[]).iter().enumerate() {
        if face.len() < 3 {
            return Err(GeomError::structural(format!(
                "{name}: face {f} has {} edges, needs at least 3",
                face.len()
            )));
        }
        if let Some(&bad) = face.edges.iter().find(|&&e| e >= edges.len()) {
            return Err(GeomError::structural(format!(
                "{name}: face {f} references edge {bad} outside 0..{}",
                edges.len()
            )));
        }
        for k in 0..face.len() {
            let cur = edges[face.edges[k]];
            let next = edges[face.edges[(k + 1) % face.len()]];
            if cur.to != next.from {
                return Err(GeomError::structural(format!(
                    "{name}: face {f} is not a closed loop at edge position {k}"
                )));
            }
        }
    }
    Ok(())
}

impl fmt::Display for Polytope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces = match self.face_count() {
            Some(n) => n.to_string(),
            None => "n/a".to_string(),
        };
        write!(
            f,
            "{} (F={},E={},V={})",
            self.name,
            faces,
            self.edges.len(),
            self.vertices.len()
        )
    }
}
