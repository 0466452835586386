//! Calibrated composite neutron flux spectrum
#![doc = include_str!("../readme.md")]
//!
//! ## Quickstart example
//!
//! ```rust, no_run
//! # use nflux_spectrum::SpectrumModel;
//! // Calibrate for a thermal to non-thermal ratio of 2 at 600 K
//! let model = SpectrumModel::new(2.0, 600.0).unwrap();
//! println!("Thermal cutoff is {} eV", model.thermal_cutoff());
//!
//! // Evaluate the flux at 1 keV
//! let flux = model.flux(1.0e3).unwrap();
//! ```
//!
//! ## Core concepts
//!
//! A [SpectrumModel] is built from three closed-form [Shape]s: a
//! [Maxwellian], the [Epithermal] 1/E shape, and the U-235 [ChiSpectrum].
//!
//! The [Balance] gives the thermal to non-thermal ratio for any trial cutoff,
//! integrating each region with adaptive [Quadrature]. Calibration tabulates
//! this ratio into a [RatioTable] and inverts it at the target.
//!
//! Every tunable constant lives in a [SpectrumConfig], which may be read from
//! JSON.

// Split into subfiles for development, but anything important is re-exported
mod balance;
mod calibration;
mod config;
mod error;
mod model;
mod quadrature;
mod shape;

pub mod constants;

// Inline anything important for a nice public API
#[doc(inline)]
pub use balance::{Balance, BalanceTerms};

#[doc(inline)]
pub use calibration::{calibrate, Calibration, CalibrationSettings, OutOfRange, RatioTable};

#[doc(inline)]
pub use config::SpectrumConfig;

#[doc(inline)]
pub use model::{Region, SpectrumModel};

#[doc(inline)]
pub use quadrature::{Integral, Quadrature, QuadratureSettings};

#[doc(inline)]
pub use shape::{ChiSpectrum, Epithermal, Maxwellian, Shape};

#[doc(inline)]
pub use error::{Error, ErrorKind, Result};
