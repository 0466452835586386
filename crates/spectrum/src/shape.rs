//! Closed-form spectral shapes for each energy region

// crate modules
use crate::constants::{BOLTZMANN_EV_PER_K, CHI_A, CHI_B};
use crate::error::{Error, Result};

/// Common interface for the unnormalised spectral shapes
///
/// Energies are always in eV. Implementations are pure functions of energy
/// and hold nothing but their physical constants.
pub trait Shape {
    /// Shape value at a single energy
    fn value(&self, energy: f64) -> f64;

    /// Shape values for a batch of energies
    fn values(&self, energies: &[f64]) -> Vec<f64> {
        energies.iter().map(|e| self.value(*e)).collect()
    }
}

/// Maxwell-Boltzmann flux shape of the thermal region
///
/// `M(E) = sqrt(E) * exp(-E / kT)`, defined for `E >= 0` with `M(0) = 0`.
///
/// ```rust
/// # use nflux_spectrum::{Maxwellian, Shape};
/// let m = Maxwellian::new(600.0).unwrap();
/// assert_eq!(m.value(0.0), 0.0);
/// assert!(m.value(0.025) > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Maxwellian {
    kt: f64,
}

impl Maxwellian {
    /// Maxwellian at a neutron temperature (K)
    pub fn new(temperature: f64) -> Result<Self> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(Error::NonPositiveTemperature(temperature));
        }

        Ok(Self {
            kt: BOLTZMANN_EV_PER_K * temperature,
        })
    }

    /// Thermal energy kT (eV)
    pub fn kt(&self) -> f64 {
        self.kt
    }
}

impl Shape for Maxwellian {
    #[inline]
    fn value(&self, energy: f64) -> f64 {
        energy.sqrt() * (-energy / self.kt).exp()
    }
}

/// Slowing-down 1/E shape of the epithermal region
///
/// Undefined at zero. The epithermal region always starts above a positive
/// cutoff so this is never evaluated there.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Epithermal;

impl Shape for Epithermal {
    #[inline]
    fn value(&self, energy: f64) -> f64 {
        1.0 / energy
    }
}

/// U-235 fission chi spectrum of the fast region
///
/// `Chi(E) = exp(-a E) * sinh(sqrt(b E))` with the default constants taken
/// from [CHI_A] and [CHI_B].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSpectrum {
    /// Exponential coefficient (1/eV)
    pub a: f64,
    /// Sinh coefficient (1/eV)
    pub b: f64,
}

impl Default for ChiSpectrum {
    fn default() -> Self {
        Self { a: CHI_A, b: CHI_B }
    }
}

impl Shape for ChiSpectrum {
    #[inline]
    fn value(&self, energy: f64) -> f64 {
        (-self.a * energy).exp() * (self.b * energy).sqrt().sinh()
    }
}
