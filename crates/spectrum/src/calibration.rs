//! Calibration of the thermal cutoff against a target flux ratio
//!
//! The ratio is tabulated on a log-spaced grid of trial cutoffs and the
//! inverse mapping (ratio to cutoff) is linearly interpolated in log-log
//! space at the target. The tabulated ratios must be strictly increasing for
//! the inverse to exist, and this is checked on every table.

// crate modules
use crate::balance::Balance;
use crate::error::{Error, Result};

// neutronics toolbox
use nflux_utils::{interpolate, logspace, SliceExt};

// external crates
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Policy for targets outside of the tabulated ratio range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRange {
    /// Fail with [Error::UnreachableRatio]
    #[default]
    Reject,
    /// Snap to the cutoff at the nearest end of the table
    Clamp,
}

/// Grid and policy used to build the calibration table
///
/// The table spans `[cutoff_min, min(cutoff_max_kt * kT, fast_boundary / 10)]`
/// with `grid_points` log-spaced cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    /// Number of tabulated cutoffs
    pub grid_points: usize,
    /// Lowest tabulated cutoff (eV)
    pub cutoff_min: f64,
    /// Highest tabulated cutoff as a multiple of kT
    pub cutoff_max_kt: f64,
    /// What to do with unreachable targets
    pub out_of_range: OutOfRange,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            grid_points: 1000,
            cutoff_min: 1e-5,
            cutoff_max_kt: 40.0,
            out_of_range: OutOfRange::Reject,
        }
    }
}

/// Calibrated cutoff and continuity scale factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Thermal cutoff e1 (eV)
    pub cutoff: f64,
    /// Epithermal scale factor c2
    pub scale_epithermal: f64,
    /// Fast scale factor c3
    pub scale_fast: f64,
}

/// Tabulated ratio against trial cutoff
///
/// Both columns are strictly increasing. This is also the calibration curve
/// data for anything that wants to plot cutoff against ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioTable {
    cutoffs: Vec<f64>,
    ratios: Vec<f64>,
}

impl RatioTable {
    /// Evaluate the ratio at every cutoff provided
    ///
    /// At least two cutoffs are needed, in strictly increasing order. The
    /// resulting ratios must be strictly increasing too, else this fails with
    /// [Error::NonMonotonicRatio] at the first offending cutoff.
    pub fn tabulate(balance: &Balance, cutoffs: Vec<f64>) -> Result<Self> {
        if cutoffs.len() < 2 {
            return Err(Error::InvalidConfig(format!(
                "at least 2 cutoffs are needed for a ratio table (found {})",
                cutoffs.len()
            )));
        }

        if let Some(i) = cutoffs.first_unordered() {
            return Err(Error::InvalidConfig(format!(
                "tabulated cutoffs must be strictly increasing (index {i})"
            )));
        }

        let ratios = cutoffs
            .iter()
            .map(|e1| balance.ratio(*e1))
            .collect::<Result<Vec<f64>>>()?;

        if let Some(i) = ratios.first_unordered() {
            return Err(Error::NonMonotonicRatio { cutoff: cutoffs[i] });
        }

        Ok(Self { cutoffs, ratios })
    }

    /// Default calibration grid for a balance
    pub fn for_balance(balance: &Balance, settings: &CalibrationSettings) -> Result<Self> {
        let upper = (settings.cutoff_max_kt * balance.maxwellian().kt())
            .min(balance.fast_boundary() / 10.0);

        if settings.cutoff_min >= upper {
            return Err(Error::InvalidConfig(format!(
                "cutoff_min {:e} eV must be below the grid upper limit {upper:e} eV",
                settings.cutoff_min
            )));
        }

        let cutoffs = logspace(settings.cutoff_min, upper, settings.grid_points)?;
        debug!(
            "Tabulating ratio for {} cutoffs in [{:e}, {upper:e}] eV",
            cutoffs.len(),
            settings.cutoff_min
        );

        let table = Self::tabulate(balance, cutoffs)?;
        let (min, max) = table.range()?;
        debug!("Achievable ratios in [{min:e}, {max:e}]");

        Ok(table)
    }

    /// Trial cutoffs (eV)
    pub fn cutoffs(&self) -> &[f64] {
        &self.cutoffs
    }

    /// Ratio at each trial cutoff
    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    /// Number of tabulated points
    pub fn len(&self) -> usize {
        self.cutoffs.len()
    }

    /// Check whether the table has no points
    pub fn is_empty(&self) -> bool {
        self.cutoffs.is_empty()
    }

    /// Lowest and highest tabulated ratio
    pub fn range(&self) -> Result<(f64, f64)> {
        Ok((self.ratios.try_min()?, self.ratios.try_max()?))
    }

    /// Cutoff corresponding to a target ratio
    ///
    /// Interpolation is linear in `ln(ratio)` against `ln(cutoff)`. Targets
    /// outside of the tabulated range are handled according to `policy`.
    pub fn invert(&self, target: f64, policy: OutOfRange) -> Result<f64> {
        if !(target.is_finite() && target > 0.0) {
            return Err(Error::NonPositiveRatio(target));
        }

        let (min, max) = self.range()?;
        if target < min || target > max {
            return match policy {
                OutOfRange::Reject => Err(Error::UnreachableRatio { target, min, max }),
                OutOfRange::Clamp => {
                    let (ratio, cutoff) = if target < min {
                        (min, self.cutoffs[0])
                    } else {
                        (max, self.cutoffs[self.len() - 1])
                    };
                    warn!("Target ratio {target:e} unreachable, clamped to {ratio:e} at {cutoff:e} eV");
                    Ok(cutoff)
                }
            };
        }

        let log_ratios: Vec<f64> = self.ratios.iter().map(|r| r.ln()).collect();
        let log_cutoffs: Vec<f64> = self.cutoffs.iter().map(|e| e.ln()).collect();

        // rounding may push an end point out of range after taking logs
        let x = target
            .ln()
            .clamp(log_ratios[0], log_ratios[log_ratios.len() - 1]);

        Ok(interpolate(x, &log_ratios, &log_cutoffs)?.exp())
    }
}

/// Find the cutoff matching `target_ratio` and its scale factors
///
/// Returns the calibration along with the table used to find it.
pub fn calibrate(
    balance: &Balance,
    target_ratio: f64,
    settings: &CalibrationSettings,
) -> Result<(Calibration, RatioTable)> {
    if !(target_ratio.is_finite() && target_ratio > 0.0) {
        return Err(Error::NonPositiveRatio(target_ratio));
    }

    let table = RatioTable::for_balance(balance, settings)?;
    let cutoff = table.invert(target_ratio, settings.out_of_range)?;
    let (scale_epithermal, scale_fast) = balance.scale_factors(cutoff)?;

    info!("Thermal cutoff is {cutoff:e} eV (c2 = {scale_epithermal:e}, c3 = {scale_fast:e})");

    let calibration = Calibration {
        cutoff,
        scale_epithermal,
        scale_fast,
    };

    Ok((calibration, table))
}
