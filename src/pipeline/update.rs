use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::store::{ProductStore, StoreError, SubscriptionId};
use crate::tracker::SubscriptionRegistry;
use crate::utils::error::valid_price;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("product {product} for subscription {id} not found")]
    NotFound { id: SubscriptionId, product: String },

    #[error("failed to update the price of {product} for subscription {id}")]
    UpdateFailed { id: SubscriptionId, product: String },

    #[error("price must be a finite, non-negative number (got {0})")]
    InvalidPrice(f64),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// What a successful update did.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub subscription_id: SubscriptionId,
    pub product: String,
    pub price: f64,
    /// Notifications actually handed to a live subscriber; 0 when nobody from
    /// this process lifetime is listening.
    pub delivered: usize,
}

/// Flattened result handed to the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub success: bool,
    pub reason: Option<String>,
}

impl From<Result<UpdateReport, UpdateError>> for UpdateOutcome {
    fn from(result: Result<UpdateReport, UpdateError>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                reason: None,
            },
            Err(e) => Self {
                success: false,
                reason: Some(e.to_string()),
            },
        }
    }
}

/// Apply `new_price` to the record (`id`, `product`).
///
/// `registry` is the product's live registry, if one exists in this process.
/// On success the record is gone from `store` and the matching subscriptions
/// are detached from `registry`.
pub fn apply_update(
    store: &mut ProductStore,
    registry: Option<&mut SubscriptionRegistry>,
    id: SubscriptionId,
    product: &str,
    new_price: f64,
) -> Result<UpdateReport, UpdateError> {
    if !valid_price(new_price) {
        return Err(UpdateError::InvalidPrice(new_price));
    }

    if !store.contains(id, product) {
        warn!("Product {product} not found for subscription {id}");
        return Err(UpdateError::NotFound {
            id,
            product: product.to_string(),
        });
    }

    if !store.update_price(id, product, new_price)? {
        error!("Failed to update price of {product} for subscription {id}");
        return Err(UpdateError::UpdateFailed {
            id,
            product: product.to_string(),
        });
    }

    let delivered = registry
        .as_deref()
        .map_or(0, |r| r.dispatch(id, new_price));
    if delivered == 0 {
        debug!("No live subscription {id} for {product}, notification dropped");
    }

    purge_record(store, registry, id, product)?;

    info!("Price for {product} (subscription {id}) updated to {new_price}, record removed");
    Ok(UpdateReport {
        subscription_id: id,
        product: product.to_string(),
        price: new_price,
        delivered,
    })
}

/// Step 4: drop the satisfied record, then detach its subscriptions.
///
/// If the store cannot be saved the record keeps its new price in the queue
/// and the subscriptions stay attached, so a retry re-notifies.
pub(crate) fn purge_record(
    store: &mut ProductStore,
    registry: Option<&mut SubscriptionRegistry>,
    id: SubscriptionId,
    product: &str,
) -> Result<(), UpdateError> {
    if let Err(e) = store.remove_product(id, product) {
        error!("Price of {product} for {id} updated but record not purged: {e}");
        return Err(e.into());
    }

    if let Some(registry) = registry {
        registry.detach_all(id);
    }
    Ok(())
}
