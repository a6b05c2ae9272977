//! The `tracker` module holds the observer side of the system: subscriptions,
//! the per-product registries that dispatch price changes to them, and the
//! `PriceTracker` facade that ties them to the product store.

pub mod engine;
pub mod identity;
pub mod notification;
pub mod registry;
pub mod subscription;

pub use engine::{PriceTracker, ProductRecord, Registration};
pub use identity::IdentityAllocator;
pub use notification::PriceNotification;
pub use registry::SubscriptionRegistry;
pub use subscription::Subscription;
