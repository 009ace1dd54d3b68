//! Spirals: polar curves `r(φ)` sampled into an open chain of vertices.
//!
//! Purpose
//! - Turn a family selection `(name, args, optional fn)` into a `Polytope`
//!   whose vertices are `Derived`: vertex `i` sits at radius `r(γ_i)` and
//!   azimuth `γ_i`, where `γ_i` is the polytope's first-axis sample.
//!
//! Why this design
//! - The family is a closed enum with per-variant parameters (`Curve`);
//!   argument errors surface once at construction, evaluation errors
//!   (`Domain`) surface lazily per vertex.
//! - The spiral owns the curve behind an `Arc` and hands the same `Arc` to
//!   its polytope as the vertex rule, so clones stay cheap.
//!
//! References
//! - Polar spirals: <https://en.wikipedia.org/wiki/Spiral>

mod curves;
mod family;

use std::sync::Arc;

pub use curves::{
    archimedean, curve_args, ellipse, fermat, fibonacci, hyperbolic, lituus, logarithmic, Curve,
    CurveArgs, CurveSpec, CustomCurve, EllipseArgs, RadiusFn,
};
pub use family::SpiralFamily;

use crate::error::{GeomError, Result};
use crate::primitives::topology::chain_edges;
use crate::primitives::{Edge, Point, Polytope, RangeCfg};

#[derive(Clone, Debug)]
pub struct Spiral {
    curve: Arc<Curve>,
    poly: Polytope,
}

impl Spiral {
    /// `vertices` derived points over the default parametrization range.
    pub fn new(vertices: usize, spec: CurveSpec) -> Result<Self> {
        Self::with_ranges(vertices, spec, RangeCfg::default())
    }

    pub fn with_ranges(vertices: usize, spec: CurveSpec, ranges: RangeCfg) -> Result<Self> {
        let curve = Arc::new(Curve::from_spec(&spec)?);
        Self::from_curve(vertices, curve, ranges)
    }

    pub fn from_curve(vertices: usize, curve: Arc<Curve>, ranges: RangeCfg) -> Result<Self> {
        let (points, edges) = chain(vertices);
        let poly = Polytope::new(curve.name(), points, edges, None, ranges)?
            .with_rule(curve.clone());
        tracing::debug!(family = %curve.family(), name = curve.name(), vertices, "spiral");
        Ok(Self { curve, poly })
    }

    #[inline]
    pub fn curve(&self) -> &Curve {
        &self.curve
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

    /// `r(γ_index)`, signed as the curve returns it.
    pub fn radius_at(&self, index: usize) -> Result<f64> {
        let gamma = self.poly.gamma(index).ok_or_else(|| {
            GeomError::structural(format!("{}: spiral has no vertices", self.poly.name()))
        })?;
        self.curve.radius(gamma)
    }

    /// Resample with `n` vertices over the same range. Fixed values set
    /// through transforms are discarded.
    pub fn set_vertex_count(&mut self, n: usize) -> Result<()> {
        let (points, edges) = chain(n);
        self.poly.replace_topology(points, edges, None)
    }
}

fn chain(n: usize) -> (Vec<Point>, Vec<Edge>) {
    ((0..n).map(|_| Point::derived()).collect(), chain_edges(n))
}
