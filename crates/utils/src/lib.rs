//! Common utility for extended `std` types and tabulated data
//!
//! These are left public for convenience.
//!
//! For example, log-spaced grids, checked lookups into ascending tables, and
//! prettier formatting for scientific numbers are useful everywhere.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod error;
mod grid;
mod slice_ext;
mod value_ext;

// Flatten
pub use error::{Error, Result};
pub use grid::{interpolate, logspace};
pub use slice_ext::SliceExt;
pub use value_ext::ValueExt;
