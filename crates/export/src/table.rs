//! Sampled spectrum data for external consumers

// neutronics toolbox
use nflux_spectrum::SpectrumModel;

// crate modules
use crate::error::{Error, Result};

// external crates
use itertools::izip;
use serde::Serialize;

/// Anything that can be written out as named columns of numbers
pub trait Tabular: Serialize {
    /// Column headings, in row order
    fn headers(&self) -> &'static [&'static str];

    /// Every row of values, one entry per heading
    fn rows(&self) -> Vec<Vec<f64>>;
}

/// Flux spectrum sampled onto an energy grid
///
/// Each row is (energy, flux, lethargy) where lethargy is `E * flux(E)`. The
/// calibration values are carried along as metadata.
///
/// ```rust, no_run
/// # use nflux_spectrum::SpectrumModel;
/// # use nflux_export::SpectrumTable;
/// # use nflux_utils::logspace;
/// let model = SpectrumModel::new(2.0, 600.0).unwrap();
/// let energies = logspace(1e-5, 1e7, 1000).unwrap();
/// let table = SpectrumTable::sample(&model, &energies).unwrap();
/// assert_eq!(table.flux.len(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumTable {
    /// Neutron temperature (K)
    pub temperature: f64,
    /// Target thermal to non-thermal ratio
    pub target_ratio: f64,
    /// Calibrated thermal cutoff (eV)
    pub thermal_cutoff: f64,
    /// Fast region boundary (eV)
    pub fast_boundary: f64,
    /// Energies (eV)
    pub energy: Vec<f64>,
    /// Flux at each energy
    pub flux: Vec<f64>,
    /// Flux per unit lethargy at each energy
    pub lethargy: Vec<f64>,
}

impl SpectrumTable {
    /// Evaluate the model at every energy
    pub fn sample(model: &SpectrumModel, energies: &[f64]) -> Result<Self> {
        let flux = model.flux_many(energies)?;
        let lethargy = energies.iter().zip(&flux).map(|(e, f)| e * f).collect();

        Ok(Self {
            temperature: model.thermal_temperature(),
            target_ratio: model.target_ratio(),
            thermal_cutoff: model.thermal_cutoff(),
            fast_boundary: model.fast_boundary(),
            energy: energies.to_vec(),
            flux,
            lethargy,
        })
    }

    /// Number of sampled energies
    pub fn len(&self) -> usize {
        self.energy.len()
    }

    /// Check whether no energies were sampled
    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }
}

impl Tabular for SpectrumTable {
    fn headers(&self) -> &'static [&'static str] {
        &["energy", "flux", "lethargy"]
    }

    fn rows(&self) -> Vec<Vec<f64>> {
        izip!(&self.energy, &self.flux, &self.lethargy)
            .map(|(e, f, l)| vec![*e, *f, *l])
            .collect()
    }
}

/// Thermal to non-thermal ratio against trial thermal cutoff
///
/// This is the calibration curve that relates a target ratio to a cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioCurve {
    /// Neutron temperature (K)
    pub temperature: f64,
    /// Trial cutoffs (eV)
    pub cutoff: Vec<f64>,
    /// Ratio implied by each cutoff
    pub ratio: Vec<f64>,
}

impl RatioCurve {
    /// Evaluate the ratio at every trial cutoff
    pub fn sample(model: &SpectrumModel, cutoffs: &[f64]) -> Result<Self> {
        Ok(Self {
            temperature: model.thermal_temperature(),
            cutoff: cutoffs.to_vec(),
            ratio: model.ratio_curve(cutoffs)?,
        })
    }

    /// The table already used to calibrate the model
    ///
    /// Costs nothing extra as no new integrals are evaluated.
    pub fn from_calibration(model: &SpectrumModel) -> Self {
        let table = model.ratio_table();
        Self {
            temperature: model.thermal_temperature(),
            cutoff: table.cutoffs().to_vec(),
            ratio: table.ratios().to_vec(),
        }
    }

    /// Build from existing columns, which must be the same length
    pub fn from_columns(temperature: f64, cutoff: Vec<f64>, ratio: Vec<f64>) -> Result<Self> {
        if cutoff.len() != ratio.len() {
            return Err(Error::UnexpectedColumnLength {
                expected: cutoff.len(),
                found: ratio.len(),
            });
        }

        Ok(Self {
            temperature,
            cutoff,
            ratio,
        })
    }
}

impl Tabular for RatioCurve {
    fn headers(&self) -> &'static [&'static str] {
        &["cutoff", "ratio"]
    }

    fn rows(&self) -> Vec<Vec<f64>> {
        self.cutoff
            .iter()
            .zip(&self.ratio)
            .map(|(e, r)| vec![*e, *r])
            .collect()
    }
}
