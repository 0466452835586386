//! Result and Error types for the utils module

/// Type alias for `Result<T, utils::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `nflux_utils`
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// An empty slice of floats for SliceExt
    #[error("slice contains no values")]
    SliceContainsNoValues,

    /// The slice of float values contains things like NAN or INFINITY
    #[error("slice contains undefined values")]
    SliceContainsUndefinedValues,

    /// Value that is searched for outside of the min/max of the array
    #[error("value {value:e} outside of bounds [{lower_bound:e}, {upper_bound:e}]")]
    ValueOutsideOfBounds {
        value: f64,
        lower_bound: f64,
        upper_bound: f64,
    },

    /// For when a slice has fewer than the minimum required values
    #[error("slice length {length} below the minimum of {minimum_required}")]
    BelowMinimumSliceLength {
        length: usize,
        minimum_required: usize,
    },

    /// Paired slices must be the same length
    #[error("mismatched slice lengths ({left} and {right})")]
    MismatchedLengths { left: usize, right: usize },

    /// Log-spaced grids need strictly positive, ordered bounds
    #[error("invalid grid bounds [{lower:e}, {upper:e}]")]
    InvalidGridBounds { lower: f64, upper: f64 },
}
