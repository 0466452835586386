//! Adaptive Gauss-Kronrod quadrature for definite integrals
//!
//! A 15-point Kronrod rule with its embedded 7-point Gauss rule is applied to
//! each interval, with the difference between the two used as the error
//! estimate. The interval with the largest error is bisected until the global
//! error is within tolerance.
//!
//! Failure to converge is always an error. A partial estimate is never
//! returned in place of the integral. A first pass that sees only zeros is
//! also an error, as a narrow peak between the nodes would go unnoticed.

// standard library
use std::cmp::Ordering;
use std::collections::BinaryHeap;

// crate modules
use crate::error::{Error, Result};

// external crates
use log::trace;
use serde::{Deserialize, Serialize};

/// Kronrod abscissae on [0, 1], descending, with the centre last
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

/// Kronrod weights matching [XGK]
const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Gauss weights for the odd Kronrod abscissae XGK[1], XGK[3], XGK[5], XGK[7]
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Tolerances and limits for adaptive quadrature
///
/// Convergence is reached once the global error estimate is below
/// `max(abs_tol, rel_tol * |integral|)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadratureSettings {
    /// Relative tolerance on the integral
    pub rel_tol: f64,
    /// Absolute tolerance on the integral
    pub abs_tol: f64,
    /// Maximum number of interval bisections
    pub max_subdivisions: usize,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            rel_tol: 1e-10,
            abs_tol: 0.0,
            max_subdivisions: 1000,
        }
    }
}

/// Result of a converged integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integral {
    /// Estimate of the definite integral
    pub value: f64,
    /// Estimate of the absolute error
    pub error: f64,
    /// Number of bisections performed
    pub subdivisions: usize,
    /// Number of integrand evaluations
    pub evaluations: usize,
}

/// Adaptive integrator over bounded intervals
///
/// ```rust
/// # use nflux_spectrum::Quadrature;
/// let quadrature = Quadrature::default();
/// let integral = quadrature.integrate(|x| x * x, 0.0, 3.0).unwrap();
/// assert!((integral.value - 9.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quadrature {
    settings: QuadratureSettings,
}

impl Quadrature {
    /// Integrator using the provided tolerances
    pub fn new(settings: QuadratureSettings) -> Self {
        Self { settings }
    }

    /// Tolerances in use
    pub fn settings(&self) -> &QuadratureSettings {
        &self.settings
    }

    /// Integrate `f` over `[lower, upper]`
    ///
    /// Bounds must be finite with `lower <= upper`. Any undefined integrand
    /// value fails with [Error::NonFiniteIntegrand], and running out of
    /// subdivisions fails with [Error::IntegrationFailed]. An integrand that is
    /// zero at all 15 nodes of the first pass fails with
    /// [Error::UnresolvedIntegrand].
    pub fn integrate<F>(&self, f: F, lower: f64, upper: f64) -> Result<Integral>
    where
        F: Fn(f64) -> f64,
    {
        if !(lower.is_finite() && upper.is_finite() && lower <= upper) {
            return Err(Error::InvalidConfig(format!(
                "integration bounds [{lower:e}, {upper:e}] must be finite and ordered"
            )));
        }

        if lower == upper {
            return Ok(Integral {
                value: 0.0,
                error: 0.0,
                subdivisions: 0,
                evaluations: 0,
            });
        }

        let first = Segment::kronrod(&f, lower, upper)?;
        if first.all_zero {
            return Err(Error::UnresolvedIntegrand { lower, upper });
        }

        let mut total_value = first.value;
        let mut total_error = first.error;
        let mut evaluations = 15;
        let mut subdivisions = 0;

        let mut heap = BinaryHeap::new();
        heap.push(first);

        loop {
            let tolerance = self
                .settings
                .abs_tol
                .max(self.settings.rel_tol * total_value.abs());

            if total_error <= tolerance {
                break;
            }

            let fail = Error::IntegrationFailed {
                lower,
                upper,
                estimate: total_value,
                error: total_error,
                subdivisions,
            };

            if subdivisions >= self.settings.max_subdivisions {
                return Err(fail);
            }

            // always Some, the heap is never emptied without refilling
            let Some(worst) = heap.pop() else {
                return Err(fail);
            };

            let mid = 0.5 * (worst.lower + worst.upper);
            if mid <= worst.lower || mid >= worst.upper {
                // interval can no longer be split in floating point
                return Err(fail);
            }

            let left = Segment::kronrod(&f, worst.lower, mid)?;
            let right = Segment::kronrod(&f, mid, worst.upper)?;

            total_value += left.value + right.value - worst.value;
            total_error += left.error + right.error - worst.error;
            evaluations += 30;
            subdivisions += 1;

            heap.push(left);
            heap.push(right);
        }

        // re-sum to avoid drift from the running updates
        let value = heap.iter().map(|s| s.value).sum();
        let error = heap.iter().map(|s| s.error).sum();

        trace!(
            "Integral on [{lower:e}, {upper:e}] = {value:e} +/- {error:e} ({subdivisions} subdivisions)"
        );

        Ok(Integral {
            value,
            error,
            subdivisions,
            evaluations,
        })
    }
}

/// One interval with its local estimate, ordered by error
#[derive(Debug, Clone, Copy)]
struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64,
    all_zero: bool,
}

impl Segment {
    /// Apply the 7/15 point Gauss-Kronrod pair to a single interval
    fn kronrod<F>(f: &F, lower: f64, upper: f64) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        let centre = 0.5 * (lower + upper);
        let half = 0.5 * (upper - lower);

        let eval = |x: f64| -> Result<f64> {
            let y = f(x);
            if y.is_finite() {
                Ok(y)
            } else {
                Err(Error::NonFiniteIntegrand { energy: x })
            }
        };

        let fc = eval(centre)?;
        let mut kronrod = fc * WGK[7];
        let mut gauss = fc * WG[3];
        let mut all_zero = fc == 0.0;

        for (k, (x, w)) in XGK.iter().zip(WGK.iter()).take(7).enumerate() {
            let dx = half * x;
            let (left, right) = (eval(centre - dx)?, eval(centre + dx)?);
            all_zero &= left == 0.0 && right == 0.0;

            let pair = left + right;
            kronrod += w * pair;
            // odd abscissae are shared with the Gauss rule
            if k % 2 == 1 {
                gauss += WG[k / 2] * pair;
            }
        }

        Ok(Self {
            lower,
            upper,
            value: kronrod * half,
            error: ((kronrod - gauss) * half).abs(),
            all_zero,
        })
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}
