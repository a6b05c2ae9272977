//! The `store` module owns the durable product records.
//!
//! Records are kept in a single pretty-printed JSON document keyed by
//! subscription identity, so the file stays readable and hand-editable:
//!
//! ```json
//! {
//!   "412": {
//!     "Widget": 100.0
//!   }
//! }
//! ```
//!
//! The store is the only writer of that file. Every mutation is flushed
//! immediately through an atomic temp-file-and-rename.

pub mod json_store;

use std::collections::BTreeMap;

pub use json_store::{ProductStore, StoreError};

/// Identity of one subscription; the primary key of the store.
pub type SubscriptionId = u32;

/// Product name → price for one subscription identity.
pub type ProductMap = BTreeMap<String, f64>;

/// Full store contents, ordered so the file output is deterministic.
pub type Records = BTreeMap<SubscriptionId, ProductMap>;
