//! The `utils` module collects the pieces shared by every layer of
//! `pricewatch`: the crate-level error type and logging setup.

pub mod error;
pub mod logging;

pub use error::TrackerError;
