//! Subscription representation
//!
//! A `Subscription` is one user's watch on one product. It holds the sending
//! side of a channel; whoever owns the matching receiver (the UI layer) gets
//! a [`PriceNotification`] each time the subscription is notified.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::identity::IdentityAllocator;
use super::notification::PriceNotification;
use crate::store::SubscriptionId;

#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    product: String,
    target_price: f64,
    sender: UnboundedSender<PriceNotification>,
}

impl Subscription {
    /// Create a subscription that draws its own identity from the default
    /// range. Nothing checks the draw for collisions; the tracker allocates
    /// through [`IdentityAllocator::allocate`] and uses [`Subscription::with_id`].
    pub fn new(product: &str, target_price: f64, sender: UnboundedSender<PriceNotification>) -> Self {
        let id = IdentityAllocator::default().draw();
        Self::with_id(id, product, target_price, sender)
    }

    pub fn with_id(
        id: SubscriptionId,
        product: &str,
        target_price: f64,
        sender: UnboundedSender<PriceNotification>,
    ) -> Self {
        Self {
            id,
            product: product.to_string(),
            target_price,
            sender,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    /// Price the user registered the product at.
    pub fn target_price(&self) -> f64 {
        self.target_price
    }

    /// Deliver `price` to the subscriber. Returns `false` if the receiving
    /// side has gone away.
    pub fn notify(&self, price: f64) -> bool {
        let event = PriceNotification::new(self.id, &self.product, price);
        match self.sender.send(event) {
            Ok(()) => {
                debug!("{}: price for {} updated: {}", self.id, self.product, price);
                true
            }
            Err(e) => {
                warn!(
                    "Failed to notify subscription {} about {}: {}",
                    self.id, self.product, e
                );
                false
            }
        }
    }
}
