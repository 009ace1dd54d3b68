//! Tolerance defaults and shared constants.
//!
//! Policy
//! - Defaults are fixed constants to avoid “tolerance juggling” across call
//!   sites. Parametrization defaults live on `RangeCfg`, which callers override.

/// Quarter turn; the default end of both parametrization axes.
pub const QI: f64 = std::f64::consts::FRAC_PI_2;

/// Golden ratio φ = (1 + √5) / 2.
pub const GOLDEN: f64 = 1.618_033_988_749_895;

/// Magnitudes below this are treated as the origin (angles undefined).
pub(crate) const NORM_EPS: f64 = 1e-12;

/// Documented tolerance on the norm of `direction_to` results.
pub const DIRECTION_EPS: f64 = 1e-9;

/// Coplanarity threshold when grouping solid vertices into faces.
pub(crate) const PLANE_EPS: f64 = 1e-9;

/// Denominators closer to zero than this are a domain error.
pub(crate) const POLE_EPS: f64 = 1e-12;
