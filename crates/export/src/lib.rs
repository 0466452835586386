//! Tabulated spectrum data for external plotting and reporting tools
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod table;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use table::{RatioCurve, SpectrumTable, Tabular};

#[doc(inline)]
pub use writer::{write_ascii, write_csv, write_file, write_json, write_table, Format};

#[doc(inline)]
pub use error::{Error, Result};
