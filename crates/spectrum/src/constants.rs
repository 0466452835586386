//! Physical constants and fixed energy bounds

/// Boltzmann constant (eV/K), CODATA 2018
pub const BOLTZMANN_EV_PER_K: f64 = 8.617_333_262e-5;

/// Exponential term of the U-235 chi spectrum (1/eV)
pub const CHI_A: f64 = 1.036e-6;

/// Sinh term of the U-235 chi spectrum (1/eV)
pub const CHI_B: f64 = 2.29e-6;

/// Default lower edge of the fast region (eV)
pub const FAST_BOUNDARY: f64 = 1.0e6;

/// Upper limit used for the fast region integral (eV)
///
/// The chi spectrum is integrated to here rather than to infinity. The tail
/// above 20 MeV is negligible for the balance.
pub const UPPER_FAST_BOUND: f64 = 2.0e7;

/// Multiple of kT beyond which the Maxwellian is exactly zero in f64
///
/// `exp(-x)` underflows past the smallest subnormal at `x` of about 745.
pub const MAXWELLIAN_UNDERFLOW_KT: f64 = 750.0;
