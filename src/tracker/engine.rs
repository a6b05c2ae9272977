//! Tracker engine
//!
//! `PriceTracker` is the entry point the UI/auth layer talks to. It owns:
//! - the `ProductStore` (the only copy of it in the process)
//! - one `SubscriptionRegistry` per product name, created on first use
//! - the `IdentityAllocator` that keys new subscriptions
//!
//! All mutating calls take `&mut self`. A front end serving several users at
//! once holds the tracker behind a lock (for example `Arc<Mutex<PriceTracker>>`)
//! so store read-modify-write sequences stay exclusive.

use std::collections::HashMap;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

use super::identity::IdentityAllocator;
use super::notification::PriceNotification;
use super::registry::SubscriptionRegistry;
use super::subscription::Subscription;
use crate::config::Settings;
use crate::pipeline::{self, UpdateError, UpdateOutcome, UpdateReport};
use crate::store::{ProductMap, ProductStore, Records, SubscriptionId};
use crate::utils::TrackerError;
use crate::utils::error::valid_price;

/// One flattened entry of the administrator's queue.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub subscription_id: SubscriptionId,
    pub product: String,
    pub price: f64,
}

/// Handed back to the user who registered a product.
#[derive(Debug)]
pub struct Registration {
    pub id: SubscriptionId,
    pub product: String,
    /// Receives a [`PriceNotification`] when the administrator updates the price.
    pub receiver: UnboundedReceiver<PriceNotification>,
}

#[derive(Debug)]
pub struct PriceTracker {
    store: ProductStore,
    registries: HashMap<String, SubscriptionRegistry>,
    ids: IdentityAllocator,
}

impl PriceTracker {
    /// Open the store named in `settings` and build an empty tracker around it.
    pub fn open(settings: &Settings) -> Result<Self, TrackerError> {
        let store = ProductStore::open(&settings.store.path)?;
        Ok(Self::with_store(
            store,
            IdentityAllocator::from(&settings.tracker),
        ))
    }

    pub fn with_store(store: ProductStore, ids: IdentityAllocator) -> Self {
        Self {
            store,
            registries: HashMap::new(),
            ids,
        }
    }

    /// Start tracking `product` at `price` under a fresh identity.
    pub fn register_product(
        &mut self,
        product: &str,
        price: f64,
    ) -> Result<Registration, TrackerError> {
        let product = validate(product, price)?;
        let id = self.ids.allocate(|id| self.is_taken(id))?;

        let (tx, rx) = mpsc::unbounded_channel();
        self.track_product(id, product, price, tx)?;

        Ok(Registration {
            id,
            product: product.to_string(),
            receiver: rx,
        })
    }

    /// Track another product under an identity the caller already holds.
    pub fn track_product(
        &mut self,
        id: SubscriptionId,
        product: &str,
        price: f64,
        sender: UnboundedSender<PriceNotification>,
    ) -> Result<(), TrackerError> {
        let product = validate(product, price)?;

        self.store.add_product(id, product, price)?;
        self.registries
            .entry(product.to_string())
            .or_insert_with(|| SubscriptionRegistry::new(product))
            .attach(Subscription::with_id(id, product, price, sender));

        info!("Subscription {id} now tracking {product} at {price}");
        Ok(())
    }

    /// Detach the live subscription for (`id`, `product`). The stored record
    /// is left alone.
    pub fn unsubscribe(&mut self, id: SubscriptionId, product: &str) -> bool {
        let product = product.trim();
        let Some(registry) = self.registries.get_mut(product) else {
            return false;
        };
        let removed = registry.detach(id).is_some();
        if registry.is_empty() {
            self.registries.remove(product);
        }
        removed
    }

    /// Every stored record, grouped by identity. Source of the admin view.
    pub fn list_all_records(&self) -> Records {
        self.store.records().clone()
    }

    /// The admin queue as a flat list, ordered by identity then product.
    pub fn pending_records(&self) -> Vec<ProductRecord> {
        self.store
            .records()
            .iter()
            .flat_map(|(id, products)| {
                products.iter().map(move |(product, price)| ProductRecord {
                    subscription_id: *id,
                    product: product.clone(),
                    price: *price,
                })
            })
            .collect()
    }

    pub fn products_for(&self, id: SubscriptionId) -> ProductMap {
        self.store.get_products(id)
    }

    /// Apply an administrator's price update; never fails outright.
    pub fn apply_price_update(
        &mut self,
        id: SubscriptionId,
        product: &str,
        new_price: f64,
    ) -> UpdateOutcome {
        self.try_apply_price_update(id, product, new_price).into()
    }

    pub fn try_apply_price_update(
        &mut self,
        id: SubscriptionId,
        product: &str,
        new_price: f64,
    ) -> Result<UpdateReport, UpdateError> {
        // names are stored trimmed
        let product = product.trim();
        let report = pipeline::apply_update(
            &mut self.store,
            self.registries.get_mut(product),
            id,
            product,
            new_price,
        )?;

        if self.registries.get(product).is_some_and(|r| r.is_empty()) {
            self.registries.remove(product);
        }
        Ok(report)
    }

    pub fn registry(&self, product: &str) -> Option<&SubscriptionRegistry> {
        self.registries.get(product)
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    fn is_taken(&self, id: SubscriptionId) -> bool {
        self.store.contains_id(id) || self.registries.values().any(|r| r.contains(id))
    }
}

fn validate(product: &str, price: f64) -> Result<&str, TrackerError> {
    let product = product.trim();
    if product.is_empty() {
        return Err(TrackerError::InvalidProduct);
    }
    if !valid_price(price) {
        return Err(TrackerError::InvalidPrice(price));
    }
    Ok(product)
}
