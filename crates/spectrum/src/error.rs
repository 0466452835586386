//! Result and Error types for the spectrum module

/// Type alias for `Result<T, spectrum::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `nflux-spectrum`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Failure reading a configuration file
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure to deserialise a JSON configuration
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    /// Neutron temperature must be positive and finite
    #[error("thermal temperature must be positive (found {0:?} K)")]
    NonPositiveTemperature(f64),

    /// Thermal to non-thermal ratio must be positive and finite
    #[error("target ratio must be positive (found {0:?})")]
    NonPositiveRatio(f64),

    /// Target ratio cannot be reached by any tabulated cutoff
    #[error(
        "target ratio {target:e} outside the range [{min:e}, {max:e}] covered by the calibration table (see cutoff_min and cutoff_max_kt)"
    )]
    UnreachableRatio { target: f64, min: f64, max: f64 },

    /// Inconsistent or out of range configuration values
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Spectrum evaluated at or below zero energy
    #[error("energy must be positive (found {0:?} eV)")]
    NonPositiveEnergy(f64),

    /// Trial cutoff outside of (0, fast boundary)
    #[error("cutoff {cutoff:e} eV outside admissible domain (0, {fast_boundary:e})")]
    CutoffOutsideDomain { cutoff: f64, fast_boundary: f64 },

    /// Adaptive quadrature ran out of subdivisions before converging
    #[error(
        "quadrature on [{lower:e}, {upper:e}] did not converge (estimate {estimate:e}, error {error:e} after {subdivisions} subdivisions)"
    )]
    IntegrationFailed {
        lower: f64,
        upper: f64,
        estimate: f64,
        error: f64,
        subdivisions: usize,
    },

    /// Every node of the first pass was zero, so nothing was resolved
    #[error("integrand is zero at every node on [{lower:e}, {upper:e}], any peak is unresolved")]
    UnresolvedIntegrand { lower: f64, upper: f64 },

    /// Integrand returned NAN or INFINITY
    #[error("integrand is undefined at {energy:e} eV")]
    NonFiniteIntegrand { energy: f64 },

    /// Tabulated ratios must increase strictly with the cutoff
    #[error("ratio is not strictly increasing at cutoff {cutoff:e} eV")]
    NonMonotonicRatio { cutoff: f64 },

    /// Non-thermal flux vanishes or overflows, so no ratio exists
    #[error("ratio is undefined at cutoff {cutoff:e} eV")]
    UndefinedRatio { cutoff: f64 },

    /// Failure in a table operation
    #[error("table lookup failed")]
    Table(#[from] nflux_utils::Error),
}

/// Broad classification of an [Error]
///
/// Useful for callers that only care whether the configuration was bad, an
/// evaluation was out of domain, or the numerics failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad temperature, ratio, or configuration values
    Configuration,
    /// Energy or cutoff outside of the valid domain
    Domain,
    /// Quadrature failed to converge
    Integration,
    /// No cutoff could be found consistent with the target
    Calibration,
}

impl Error {
    /// Classify the error into one of the broad [ErrorKind]s
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_)
            | Self::Json(_)
            | Self::NonPositiveTemperature(_)
            | Self::NonPositiveRatio(_)
            | Self::UnreachableRatio { .. }
            | Self::InvalidConfig(_) => ErrorKind::Configuration,
            Self::NonPositiveEnergy(_) | Self::CutoffOutsideDomain { .. } => ErrorKind::Domain,
            Self::IntegrationFailed { .. }
            | Self::UnresolvedIntegrand { .. }
            | Self::NonFiniteIntegrand { .. } => ErrorKind::Integration,
            Self::NonMonotonicRatio { .. } | Self::UndefinedRatio { .. } | Self::Table(_) => {
                ErrorKind::Calibration
            }
        }
    }
}
