//! Price-change event definitions
//!
//! `PriceNotification` is what a subscriber receives when the administrator
//! applies a new price to one of its tracked products.
//!
//! Notes on fields:
//! - `event_id`: unique id of this delivery, useful for de-duplicating when a
//!   subscription was attached more than once
//! - `subscription_id`: identity the update was addressed to
//! - `product`: product name the price belongs to
//! - `price`: the newly applied price
//! - `timestamp`: milliseconds since UNIX epoch, set when the event is built

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::SubscriptionId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceNotification {
    pub event_id: Uuid,
    pub subscription_id: SubscriptionId,
    pub product: String,
    pub price: f64,
    pub timestamp: i64,
}

impl PriceNotification {
    pub fn new(subscription_id: SubscriptionId, product: &str, price: f64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            subscription_id,
            product: product.to_string(),
            price,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}
