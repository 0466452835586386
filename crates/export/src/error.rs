//! Result and Error types for the export module

/// Type alias for `Result<T, export::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `nflux-export`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure writing CSV records
    #[error("failed CSV operation")]
    Csv(#[from] csv::Error),

    /// Failure to serialise to a JSON string
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    /// Failure evaluating the spectrum model
    #[error("failed to evaluate spectrum")]
    Spectrum(#[from] nflux_spectrum::Error),

    /// Columns of a table must all be the same length
    #[error("inconsistent column lengths (expected {expected:?}, found {found:?})")]
    UnexpectedColumnLength { expected: usize, found: usize },

    /// Unrecognised output format name
    #[error("unknown output format \"{0}\"")]
    UnknownFormat(String),
}
