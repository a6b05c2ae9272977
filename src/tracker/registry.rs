//! Per-product subscription registry
//!
//! A `SubscriptionRegistry` holds the live subscriptions for one product
//! name, in attachment order. Attaching the same identity twice is allowed
//! and results in two deliveries per dispatch.
//!
//! The registry is in memory only; it is rebuilt as users register products
//! during the current process lifetime.

use super::subscription::Subscription;
use crate::store::SubscriptionId;

#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    product: String,
    subscriptions: Vec<Subscription>,
}

impl SubscriptionRegistry {
    pub fn new(product: &str) -> Self {
        Self {
            product: product.to_string(),
            subscriptions: Vec::new(),
        }
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    /// Add a subscription. No uniqueness check.
    pub fn attach(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Remove the first subscription with identity `id`.
    pub fn detach(&mut self, id: SubscriptionId) -> Option<Subscription> {
        let pos = self.subscriptions.iter().position(|s| s.id() == id)?;
        Some(self.subscriptions.remove(pos))
    }

    /// Remove every subscription with identity `id`, returning how many went.
    pub fn detach_all(&mut self, id: SubscriptionId) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id() != id);
        before - self.subscriptions.len()
    }

    /// Notify every subscription attached under `id`, in attachment order.
    /// Returns the number of successful deliveries.
    pub fn dispatch(&self, id: SubscriptionId, price: f64) -> usize {
        self.subscriptions
            .iter()
            .filter(|s| s.id() == id)
            .map(|s| s.notify(price))
            .filter(|&delivered| delivered)
            .count()
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.subscriptions.iter().any(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
