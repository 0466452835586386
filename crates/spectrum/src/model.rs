//! Calibrated piecewise flux spectrum

// crate modules
use crate::balance::Balance;
use crate::calibration::{calibrate, Calibration, RatioTable};
use crate::config::SpectrumConfig;
use crate::error::{Error, Result};
use crate::shape::Shape;

// neutronics toolbox
use nflux_utils::{f, ValueExt};

/// Energy region of the composite spectrum
///
/// Each boundary energy belongs to the region below it.
///
/// | Region     | Energy range              | Flux              |
/// | ---------- | ------------------------- | ----------------- |
/// | Thermal    | `0 < E <= e1`             | `M(E)`            |
/// | Epithermal | `e1 < E <= e2`            | `c2 / E`          |
/// | Fast       | `E > e2`                  | `c3 * Chi(E)`     |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Maxwellian region below the thermal cutoff
    Thermal,
    /// 1/E region between the cutoff and the fast boundary
    Epithermal,
    /// Chi spectrum region above the fast boundary
    Fast,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::Thermal => "thermal",
            Self::Epithermal => "epithermal",
            Self::Fast => "fast",
        };
        write!(f, "{name}")
    }
}

/// Composite thermal, epithermal, and fast neutron flux spectrum
///
/// The thermal cutoff is calibrated on construction so that the ratio of
/// thermal to non-thermal flux matches the target. The model is immutable
/// afterwards and every evaluation is a pure function of energy.
///
/// Absolute flux magnitude is arbitrary. The thermal region has a scale of
/// exactly 1 and the other two are chosen for continuity at the boundaries.
///
/// ```rust, no_run
/// # use nflux_spectrum::{SpectrumModel, Region};
/// // Thermal to non-thermal ratio of 1 at 600 K
/// let model = SpectrumModel::new(1.0, 600.0).unwrap();
///
/// // Evaluate anywhere above zero
/// let flux = model.flux(1.0e4).unwrap();
/// assert_eq!(flux, model.scale_epithermal() / 1.0e4);
/// assert_eq!(model.region(1.0e7).unwrap(), Region::Fast);
/// ```
#[derive(Debug, Clone)]
pub struct SpectrumModel {
    thermal_temperature: f64,
    target_ratio: f64,
    balance: Balance,
    calibration: Calibration,
    table: RatioTable,
}

impl SpectrumModel {
    /// Calibrate a model with the default [SpectrumConfig]
    ///
    /// - `target_ratio` - thermal to non-thermal flux ratio
    /// - `thermal_temperature` - neutron temperature (K)
    pub fn new(target_ratio: f64, thermal_temperature: f64) -> Result<Self> {
        Self::with_config(target_ratio, thermal_temperature, &SpectrumConfig::default())
    }

    /// Calibrate a model with a custom configuration
    pub fn with_config(
        target_ratio: f64,
        thermal_temperature: f64,
        config: &SpectrumConfig,
    ) -> Result<Self> {
        if !(thermal_temperature.is_finite() && thermal_temperature > 0.0) {
            return Err(Error::NonPositiveTemperature(thermal_temperature));
        }

        if !(target_ratio.is_finite() && target_ratio > 0.0) {
            return Err(Error::NonPositiveRatio(target_ratio));
        }

        let balance = Balance::new(thermal_temperature, config)?;
        let (calibration, table) = calibrate(&balance, target_ratio, &config.calibration)?;

        Ok(Self {
            thermal_temperature,
            target_ratio,
            balance,
            calibration,
            table,
        })
    }

    /// Neutron temperature (K)
    pub fn thermal_temperature(&self) -> f64 {
        self.thermal_temperature
    }

    /// Requested thermal to non-thermal ratio
    pub fn target_ratio(&self) -> f64 {
        self.target_ratio
    }

    /// Boundary between thermal and epithermal regions e1 (eV)
    pub fn thermal_cutoff(&self) -> f64 {
        self.calibration.cutoff
    }

    /// Boundary between epithermal and fast regions e2 (eV)
    pub fn fast_boundary(&self) -> f64 {
        self.balance.fast_boundary()
    }

    /// Epithermal scale factor c2
    pub fn scale_epithermal(&self) -> f64 {
        self.calibration.scale_epithermal
    }

    /// Fast scale factor c3
    pub fn scale_fast(&self) -> f64 {
        self.calibration.scale_fast
    }

    /// Calibrated cutoff and scale factors together
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Shapes, bounds and integrator behind the calibration
    pub fn balance(&self) -> &Balance {
        &self.balance
    }

    /// Table of ratio against cutoff used for the calibration
    pub fn ratio_table(&self) -> &RatioTable {
        &self.table
    }

    /// Region that an energy (eV) falls in
    pub fn region(&self, energy: f64) -> Result<Region> {
        if energy.is_nan() || energy <= 0.0 {
            return Err(Error::NonPositiveEnergy(energy));
        }

        Ok(if energy <= self.thermal_cutoff() {
            Region::Thermal
        } else if energy <= self.fast_boundary() {
            Region::Epithermal
        } else {
            Region::Fast
        })
    }

    /// Flux at an energy (eV)
    ///
    /// Energies at or below zero fail with [Error::NonPositiveEnergy].
    pub fn flux(&self, energy: f64) -> Result<f64> {
        let b = &self.balance;
        Ok(match self.region(energy)? {
            Region::Thermal => b.maxwellian().value(energy),
            Region::Epithermal => self.scale_epithermal() * b.epithermal().value(energy),
            Region::Fast => self.scale_fast() * b.chi().value(energy),
        })
    }

    /// Flux at every energy, failing on the first invalid energy
    pub fn flux_many(&self, energies: &[f64]) -> Result<Vec<f64>> {
        energies.iter().map(|e| self.flux(*e)).collect()
    }

    /// Flux per unit lethargy, `E * flux(E)`
    pub fn lethargy(&self, energy: f64) -> Result<f64> {
        Ok(energy * self.flux(energy)?)
    }

    /// Thermal to non-thermal ratio implied by any trial cutoff (eV)
    pub fn ratio(&self, cutoff: f64) -> Result<f64> {
        self.balance.ratio(cutoff)
    }

    /// Ratio for every trial cutoff, i.e. the calibration curve
    pub fn ratio_curve(&self, cutoffs: &[f64]) -> Result<Vec<f64>> {
        cutoffs.iter().map(|e1| self.ratio(*e1)).collect()
    }
}

impl std::fmt::Display for SpectrumModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "SpectrumModel {\n".to_string();
        s += &f!("    temperature: {} K\n", self.thermal_temperature);
        s += &f!("    target ratio: {}\n", self.target_ratio.sci(5, 2));
        s += &f!("    thermal cutoff: {} eV\n", self.thermal_cutoff().sci(5, 2));
        s += &f!("    fast boundary: {} eV\n", self.fast_boundary().sci(5, 2));
        s += &f!("    c2: {}\n", self.scale_epithermal().sci(5, 2));
        s += &f!("    c3: {}\n}}", self.scale_fast().sci(5, 2));
        write!(f, "{s}")
    }
}
