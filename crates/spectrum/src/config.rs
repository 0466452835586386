//! Tunable constants for building a spectrum model

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::calibration::CalibrationSettings;
use crate::constants::{FAST_BOUNDARY, UPPER_FAST_BOUND};
use crate::error::{Error, Result};
use crate::quadrature::QuadratureSettings;

// external crates
use serde::{Deserialize, Serialize};

/// Loosest relative tolerance accepted for the region integrals
const MAX_REL_TOL: f64 = 1e-8;

/// Configuration shared by every [SpectrumModel](crate::SpectrumModel)
///
/// Defaults are a fast boundary of 1 MeV and a fast integral truncated at
/// 20 MeV. Any field missing from a JSON file takes its default value.
///
/// ```rust
/// # use nflux_spectrum::{SpectrumConfig, OutOfRange};
/// let config: SpectrumConfig = serde_json::from_str(r#"{
///     "fast_boundary": 1.0e5,
///     "calibration": { "out_of_range": "clamp" }
/// }"#).unwrap();
///
/// assert_eq!(config.fast_boundary, 1.0e5);
/// assert_eq!(config.upper_fast_bound, 2.0e7);
/// assert_eq!(config.calibration.out_of_range, OutOfRange::Clamp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// Lower edge of the fast region e2 (eV)
    pub fast_boundary: f64,
    /// Upper limit of the fast region integral (eV)
    pub upper_fast_bound: f64,
    /// Tolerances for the region integrals
    pub quadrature: QuadratureSettings,
    /// Calibration table grid and range policy
    pub calibration: CalibrationSettings,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            fast_boundary: FAST_BOUNDARY,
            upper_fast_bound: UPPER_FAST_BOUND,
            quadrature: QuadratureSettings::default(),
            calibration: CalibrationSettings::default(),
        }
    }
}

impl SpectrumConfig {
    /// Read a configuration from a JSON file
    ///
    /// The configuration is validated before being returned.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.fast_boundary) {
            return invalid(format!(
                "fast_boundary must be positive (found {:?})",
                self.fast_boundary
            ));
        }

        if !(self.upper_fast_bound.is_finite() && self.upper_fast_bound > self.fast_boundary) {
            return invalid(format!(
                "upper_fast_bound {:e} must be above fast_boundary {:e}",
                self.upper_fast_bound, self.fast_boundary
            ));
        }

        let q = &self.quadrature;
        if !(positive(q.rel_tol) && q.rel_tol <= MAX_REL_TOL) {
            return invalid(format!(
                "quadrature rel_tol must be in (0, {MAX_REL_TOL:e}] (found {:?})",
                q.rel_tol
            ));
        }

        if !(q.abs_tol.is_finite() && q.abs_tol >= 0.0) {
            return invalid(format!(
                "quadrature abs_tol must be non-negative (found {:?})",
                q.abs_tol
            ));
        }

        if q.max_subdivisions == 0 {
            return invalid("quadrature max_subdivisions must be at least 1".to_string());
        }

        let c = &self.calibration;
        if c.grid_points < 2 {
            return invalid(format!(
                "calibration grid_points must be at least 2 (found {})",
                c.grid_points
            ));
        }

        if !(positive(c.cutoff_min) && c.cutoff_min < self.fast_boundary) {
            return invalid(format!(
                "calibration cutoff_min must be in (0, fast_boundary) (found {:?})",
                c.cutoff_min
            ));
        }

        if !positive(c.cutoff_max_kt) {
            return invalid(format!(
                "calibration cutoff_max_kt must be positive (found {:?})",
                c.cutoff_max_kt
            ));
        }

        Ok(())
    }
}

fn invalid(message: String) -> Result<()> {
    Err(Error::InvalidConfig(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SpectrumConfig::default().validate().is_ok());
    }

    #[test]
    fn loose_tolerance_rejected() {
        let mut config = SpectrumConfig::default();
        config.quadrature.rel_tol = 1e-6;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn fast_bounds_must_be_ordered() {
        let config = SpectrumConfig {
            fast_boundary: 3e7,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn empty_json_is_default() {
        let config: SpectrumConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SpectrumConfig::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = SpectrumConfig::from_json_file("./does/not/exist.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
