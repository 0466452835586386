//! `nflux` is a small toolkit for calibrated composite neutron flux spectra
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use nflux_spectrum as spectrum;

#[doc(inline)]
pub use nflux_utils as utils;

#[cfg(feature = "export")]
#[cfg_attr(docsrs, doc(cfg(feature = "export")))]
#[doc(inline)]
pub use nflux_export as export;
