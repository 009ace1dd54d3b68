//! Quaternion-backed geometry core.
//!
//! Layers, leaf first:
//! - `quat`: polar/cartesian coordinates carried by one quaternion value.
//! - `primitives`: points, polytopes, sampling ranges, face/edge builders.
//! - generators: `spirals`, `platonic`, `tilings`.
//! - `assembly`: ordered shapes; `mesh`: serializable snapshots for viewers.
//!
//! Evaluation is pull-based: reading a vertex computes its value from the
//! current parameters, so nothing cached can go stale. Rendering, windowing,
//! file watching and toolpath output live outside this crate.

pub mod assembly;
pub mod cfg;
pub mod error;
pub mod mesh;
pub mod platonic;
pub mod primitives;
pub mod quat;
pub mod spirals;
pub mod tilings;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{GeomError, Result};

/// Common exports for callers.
pub mod prelude {
    pub use crate::assembly::Assembly;
    pub use crate::error::{GeomError, Result};
    pub use crate::mesh::MeshData;
    pub use crate::platonic::{Polyhedron, Solid};
    pub use crate::primitives::{
        AxisRange, Edge, Face, Params, Point, PointRef, PointSource, Polygon, Polytope, RangeCfg,
        Sampling, VertexRule,
    };
    pub use crate::quat::{Pinch, Polar, Quat};
    pub use crate::spirals::{curve_args, Curve, CurveSpec, Spiral, SpiralFamily};
    pub use crate::tilings::{Grid, TilingKind};
}
