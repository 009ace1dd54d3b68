//! Points, polytopes and the pieces every generator shares.
//!
//! Purpose
//! - `Point`: a vertex whose value is fixed, parametrized by the owner's
//!   runtime parameters, or derived from the owner's default rule.
//! - `Polytope`: vertices + directed edges + face loops + gamma sampling.
//! - `topology`: the edge/face builder and winding helpers used by solids,
//!   tilings and polygons.
//!
//! Why index references
//! - Edges and faces store vertex/edge indices, so a vertex value change is
//!   visible to every edge and face without copies or shared mutability.

mod point;
mod polygon;
mod polytope;
pub mod sampling;
pub mod topology;

pub use point::{ParamFn, Point, PointRef, PointSource};
pub use polygon::Polygon;
pub use polytope::{Polytope, VertexRule};
pub use sampling::{linspace, AxisRange, Params, RangeCfg, Sampling};
pub use topology::{Edge, Face};

#[cfg(test)]
mod tests;
