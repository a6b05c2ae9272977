//! # PriceWatch
//!
//! `pricewatch` is the engine behind a small price-tracking tool. Users
//! register products they want to buy together with the price they saw; a
//! single administrator later pushes new prices, each of which is delivered
//! to the user who registered the product and then dropped from the
//! administrator's queue.
//!
//! ## Core Modules
//!
//! - `store`: the durable JSON product store, keyed by subscription identity.
//! - `tracker`: subscriptions, per-product registries and the `PriceTracker` facade.
//! - `pipeline`: the validate → persist → notify → purge price update.
//! - `config`: loading settings from file and environment.
//! - `utils`: shared error type and logging setup.
//!
//! ## Example
//!
//! ```no_run
//! use pricewatch::config::Settings;
//! use pricewatch::tracker::PriceTracker;
//!
//! let mut tracker = PriceTracker::open(&Settings::default())?;
//! let mut reg = tracker.register_product("Widget", 100.0)?;
//!
//! let outcome = tracker.apply_price_update(reg.id, "Widget", 80.0);
//! assert!(outcome.success);
//! assert_eq!(reg.receiver.try_recv().unwrap().price, 80.0);
//! # Ok::<(), pricewatch::utils::TrackerError>(())
//! ```

pub mod config;
pub mod pipeline;
pub mod store;
pub mod tracker;
pub mod utils;
