//! The `pipeline` module applies an administrator's price update.
//!
//! One update runs four steps in order: validate the record exists, persist
//! the new price, notify the live subscription, purge the satisfied record.
//! A failure in the first two steps leaves the store untouched.

pub mod update;

pub use update::{UpdateError, UpdateOutcome, UpdateReport, apply_update};

#[cfg(test)]
mod tests;
