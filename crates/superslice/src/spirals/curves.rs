//! Radius functions `r(φ)` and the tagged `Curve` that selects one.
//!
//! Domains
//! - Hyperbolic: `φ ≠ 0`. Fermat: `φ ≥ 0`. Lituus: `φ > 0`.
//! - Ellipse (focal form): `1 + e·cos φ ≠ 0`; eccentricity `e ∈ [0, 1)`.
//! - Logarithmic, Archimedean, Fibonacci: all finite `φ`.
//!
//! Reference: <https://en.wikipedia.org/wiki/Spiral>

use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::sync::Arc;

use super::family::SpiralFamily;
use crate::cfg::{GOLDEN, POLE_EPS};
use crate::error::{GeomError, Result};
use crate::primitives::VertexRule;
use crate::quat::Quat;

/// Keyword arguments of a radius function.
pub type CurveArgs = BTreeMap<String, f64>;

/// Caller-supplied radius function, called as `f(φ, args)`.
pub type RadiusFn = Arc<dyn Fn(f64, &CurveArgs) -> Result<f64> + Send + Sync>;

/// Build a `CurveArgs` map from `(name, value)` pairs.
pub fn curve_args<I, K>(pairs: I) -> CurveArgs
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Ellipse (or circle) around its right focus, or around its center.
///
/// The eccentricity must lie in `[0, 1)`; anything else is a `Domain` error.
pub fn ellipse(phi: f64, a: f64, e: f64, center: bool) -> Result<f64> {
    if !(0.0..1.0).contains(&e) {
        return Err(GeomError::domain(format!(
            "ellipse: eccentricity must be in [0, 1), got {e}"
        )));
    }
    if center {
        let b = a * (1.0 - e * e).sqrt();
        let c = phi.cos();
        return Ok(b / (1.0 - e * e * c * c).sqrt());
    }
    let denom = 1.0 + e * phi.cos();
    if denom.abs() < POLE_EPS {
        return Err(GeomError::domain(format!(
            "ellipse: 1 + e·cos(φ) vanishes at φ = {phi} (e = {e})"
        )));
    }
    Ok(a * (1.0 - e * e) / denom)
}

/// Equiangular spiral; looks the same at every zoom level.
#[inline]
pub fn logarithmic(phi: f64, a: f64, k: f64) -> f64 {
    a * (k * phi).exp()
}

/// Constant spacing between turns.
#[inline]
pub fn archimedean(phi: f64, a: f64) -> f64 {
    a * phi
}

pub fn hyperbolic(phi: f64, a: f64) -> Result<f64> {
    if phi == 0.0 {
        return Err(GeomError::domain("hyperbolic spiral: φ must not be 0"));
    }
    Ok(a / phi)
}

pub fn fermat(phi: f64, a: f64) -> Result<f64> {
    if phi < 0.0 {
        return Err(GeomError::domain(format!(
            "Fermat spiral: φ must be non-negative, got {phi}"
        )));
    }
    Ok(a * phi.sqrt())
}

pub fn lituus(phi: f64, a: f64) -> Result<f64> {
    if phi <= 0.0 {
        return Err(GeomError::domain(format!(
            "lituus: φ must be positive, got {phi}"
        )));
    }
    Ok(a / phi.sqrt())
}

/// Golden spiral: grows by φ_golden every quarter turn.
#[inline]
pub fn fibonacci(phi: f64, a: f64) -> f64 {
    a * GOLDEN.powf(phi / FRAC_PI_2)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipseArgs {
    /// Semi-major axis.
    pub a: f64,
    /// Eccentricity in `[0, 1)`; 0 is a circle.
    pub e: f64,
    /// Measure from the center instead of the right focus.
    pub center: bool,
}

#[derive(Clone)]
pub struct CustomCurve {
    pub name: String,
    pub func: RadiusFn,
    pub args: CurveArgs,
}

impl fmt::Debug for CustomCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCurve")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// A selected family with its parsed parameters.
#[derive(Clone, Debug)]
pub enum Curve {
    Ellipse(EllipseArgs),
    Logarithmic { a: f64, k: f64 },
    Archimedean { a: f64 },
    Hyperbolic { a: f64 },
    Fermat { a: f64 },
    Lituus { a: f64 },
    Fibonacci { a: f64 },
    Custom(CustomCurve),
}

/// Unparsed selection: `(family name, keyword args, optional function)`.
#[derive(Clone, Default)]
pub struct CurveSpec {
    pub family: String,
    pub args: CurveArgs,
    pub custom: Option<RadiusFn>,
}

impl CurveSpec {
    pub fn named<I, K>(family: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            family: family.into(),
            args: curve_args(args),
            custom: None,
        }
    }

    pub fn custom<F>(name: impl Into<String>, args: CurveArgs, f: F) -> Self
    where
        F: Fn(f64, &CurveArgs) -> Result<f64> + Send + Sync + 'static,
    {
        Self {
            family: name.into(),
            args,
            custom: Some(Arc::new(f)),
        }
    }
}

impl fmt::Debug for CurveSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveSpec")
            .field("family", &self.family)
            .field("args", &self.args)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Checked access to keyword arguments of one family.
struct ArgReader<'a> {
    family: SpiralFamily,
    args: &'a CurveArgs,
}

impl<'a> ArgReader<'a> {
    fn new(family: SpiralFamily, args: &'a CurveArgs, allowed: &[&str]) -> Result<Self> {
        let allowed: BTreeSet<&str> = allowed.iter().copied().collect();
        if let Some(extra) = args.keys().find(|k| !allowed.contains(k.as_str())) {
            return Err(GeomError::config(format!(
                "{family}: unexpected argument '{extra}' (accepted: {allowed:?})"
            )));
        }
        if let Some((k, v)) = args.iter().find(|(_, v)| !v.is_finite()) {
            return Err(GeomError::config(format!(
                "{family}: argument '{k}' must be finite, got {v}"
            )));
        }
        Ok(Self { family, args })
    }

    fn required(&self, key: &str) -> Result<f64> {
        self.args.get(key).copied().ok_or_else(|| {
            GeomError::config(format!("{}: missing argument '{key}'", self.family))
        })
    }

    fn optional(&self, key: &str, default: f64) -> f64 {
        self.args.get(key).copied().unwrap_or(default)
    }
}

impl Curve {
    /// Resolve a `(name, args, function)` selection.
    ///
    /// - Built-in names use their own formula; a supplied function is ignored.
    /// - Unknown names (and `Custom`) need a function, else `Config`.
    /// - Reserved names raise `NotSupported`.
    pub fn from_spec(spec: &CurveSpec) -> Result<Self> {
        match (SpiralFamily::from_name(&spec.family), &spec.custom) {
            (Some(SpiralFamily::Custom) | None, Some(func)) => Ok(Curve::Custom(CustomCurve {
                name: spec.family.clone(),
                func: Arc::clone(func),
                args: spec.args.clone(),
            })),
            (Some(SpiralFamily::Custom), None) => Err(GeomError::config(
                "Custom spiral needs a radius function",
            )),
            (None, None) => Err(GeomError::config(format!(
                "unknown spiral family '{}' and no radius function given",
                spec.family
            ))),
            (Some(family), custom) => {
                if custom.is_some() {
                    tracing::warn!(%family, "radius function ignored for a built-in family");
                }
                Self::new(family, &spec.args)
            }
        }
    }

    /// Parse the arguments of a built-in family.
    pub fn new(family: SpiralFamily, args: &CurveArgs) -> Result<Self> {
        if family.is_reserved() {
            return Err(GeomError::not_supported(format!(
                "{family} spiral has no closed-form radius"
            )));
        }
        let curve = match family {
            SpiralFamily::Ellipse => {
                let r = ArgReader::new(family, args, &["a", "e", "center"])?;
                let ea = EllipseArgs {
                    a: r.optional("a", 1.0),
                    e: r.optional("e", 0.0),
                    center: r.optional("center", 0.0) != 0.0,
                };
                if !(0.0..1.0).contains(&ea.e) {
                    return Err(GeomError::config(format!(
                        "Ellipse: eccentricity must lie in [0, 1), got {}",
                        ea.e
                    )));
                }
                if ea.a <= 0.0 {
                    return Err(GeomError::config(format!(
                        "Ellipse: semi-major axis must be positive, got {}",
                        ea.a
                    )));
                }
                Curve::Ellipse(ea)
            }
            SpiralFamily::Logarithmic => {
                let r = ArgReader::new(family, args, &["a", "k"])?;
                Curve::Logarithmic {
                    a: r.required("a")?,
                    k: r.required("k")?,
                }
            }
            SpiralFamily::Archimedean => Curve::Archimedean {
                a: ArgReader::new(family, args, &["a"])?.required("a")?,
            },
            SpiralFamily::Hyperbolic => Curve::Hyperbolic {
                a: ArgReader::new(family, args, &["a"])?.required("a")?,
            },
            SpiralFamily::Fermat => Curve::Fermat {
                a: ArgReader::new(family, args, &["a"])?.required("a")?,
            },
            SpiralFamily::Lituus => Curve::Lituus {
                a: ArgReader::new(family, args, &["a"])?.required("a")?,
            },
            SpiralFamily::Fibonacci => Curve::Fibonacci {
                a: ArgReader::new(family, args, &["a"])?.required("a")?,
            },
            SpiralFamily::Custom => {
                return Err(GeomError::config("Custom spiral needs a radius function"))
            }
            SpiralFamily::Clothoid | SpiralFamily::Theodorus | SpiralFamily::Involute => {
                return Err(GeomError::not_supported(family.name()))
            }
        };
        Ok(curve)
    }

    pub fn family(&self) -> SpiralFamily {
        match self {
            Curve::Ellipse(_) => SpiralFamily::Ellipse,
            Curve::Logarithmic { .. } => SpiralFamily::Logarithmic,
            Curve::Archimedean { .. } => SpiralFamily::Archimedean,
            Curve::Hyperbolic { .. } => SpiralFamily::Hyperbolic,
            Curve::Fermat { .. } => SpiralFamily::Fermat,
            Curve::Lituus { .. } => SpiralFamily::Lituus,
            Curve::Fibonacci { .. } => SpiralFamily::Fibonacci,
            Curve::Custom(_) => SpiralFamily::Custom,
        }
    }

    /// Display name; custom curves keep the caller's name.
    pub fn name(&self) -> &str {
        match self {
            Curve::Custom(c) => &c.name,
            other => other.family().name(),
        }
    }

    pub fn radius(&self, phi: f64) -> Result<f64> {
        match self {
            Curve::Ellipse(ea) => ellipse(phi, ea.a, ea.e, ea.center),
            Curve::Logarithmic { a, k } => Ok(logarithmic(phi, *a, *k)),
            Curve::Archimedean { a } => Ok(archimedean(phi, *a)),
            Curve::Hyperbolic { a } => hyperbolic(phi, *a),
            Curve::Fermat { a } => fermat(phi, *a),
            Curve::Lituus { a } => lituus(phi, *a),
            Curve::Fibonacci { a } => Ok(fibonacci(phi, *a)),
            Curve::Custom(c) => (c.func)(phi, &c.args),
        }
    }
}

impl VertexRule for Curve {
    /// `from_polar(r(γ), 0, γ)`: the sample is both the radius argument and
    /// the azimuth. A negative radius is drawn on the opposite ray.
    fn default_quaternion(&self, gamma: f64, _index: usize) -> Result<Quat> {
        let r = self.radius(gamma)?;
        if r < 0.0 {
            Quat::from_polar(-r, 0.0, gamma + PI, 0.0)
        } else {
            Quat::from_polar(r, 0.0, gamma, 0.0)
        }
    }
}
