//! Crate-level errors raised by the `PriceTracker` facade.
//!
//! Store failures keep their own type (`StoreError`) and price-update
//! failures are `UpdateError`; this enum wraps what registration and
//! startup can hit.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("product name must not be empty")]
    InvalidProduct,

    #[error("price must be a finite, non-negative number (got {0})")]
    InvalidPrice(f64),

    #[error("no free subscription identity left in range {low}..={high}")]
    IdentitiesExhausted { low: u32, high: u32 },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Prices are stored as JSON numbers, so NaN and infinities cannot round-trip.
pub(crate) fn valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}
