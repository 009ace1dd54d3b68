//! Parametrization axes ("gamma" sampling) and runtime parameters.
//!
//! - Axis 0 is sampled once per vertex; axis 1 once per step (layer).
//! - `Linear` matches an inclusive linspace: `n == 1` yields `[start]`,
//!   `n == 0` yields nothing.

use crate::cfg::QI;

/// Custom sampler signature: `(start, stop, count) -> samples`.
pub type SampleFn = fn(f64, f64, usize) -> Vec<f64>;

/// How an axis range is turned into `count` samples.
#[derive(Clone, Copy, Debug)]
pub enum Sampling {
    Linear,
    Custom(SampleFn),
}

impl Sampling {
    pub fn sample(&self, start: f64, stop: f64, count: usize) -> Vec<f64> {
        match self {
            Sampling::Linear => linspace(start, stop, count),
            Sampling::Custom(f) => f(start, stop, count),
        }
    }
}

/// Inclusive, evenly spaced samples on `[start, stop]`.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut out: Vec<f64> = (0..count).map(|k| start + step * k as f64).collect();
            // pin the endpoint exactly
            if let Some(last) = out.last_mut() {
                *last = stop;
            }
            out
        }
    }
}

/// One parametrization axis: `(start, stop, sampling)`.
#[derive(Clone, Copy, Debug)]
pub struct AxisRange {
    pub start: f64,
    pub stop: f64,
    pub sampling: Sampling,
}

impl AxisRange {
    #[inline]
    pub fn linear(start: f64, stop: f64) -> Self {
        Self {
            start,
            stop,
            sampling: Sampling::Linear,
        }
    }
    #[inline]
    pub fn sample(&self, count: usize) -> Vec<f64> {
        self.sampling.sample(self.start, self.stop, count)
    }
}

/// Two-axis parametrization config of a polytope.
///
/// `steps` is the sample count of the second axis (layers used when a flat
/// curve is inflated into 3D).
#[derive(Clone, Copy, Debug)]
pub struct RangeCfg {
    pub gamma: AxisRange,
    pub layers: AxisRange,
    pub steps: usize,
}

impl Default for RangeCfg {
    fn default() -> Self {
        Self {
            gamma: AxisRange::linear(0.0, QI),
            layers: AxisRange::linear(0.0, QI),
            steps: 3,
        }
    }
}

impl RangeCfg {
    /// Default layers with a custom first axis.
    pub fn with_gamma(start: f64, stop: f64) -> Self {
        Self {
            gamma: AxisRange::linear(start, stop),
            ..Self::default()
        }
    }
}

/// Runtime parameters pushed by the viewer; read by parametrized points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Params {
    pub omega: f64,
    pub psi: f64,
}

impl Params {
    #[inline]
    pub fn new(omega: f64, psi: f64) -> Self {
        Self { omega, psi }
    }
}
