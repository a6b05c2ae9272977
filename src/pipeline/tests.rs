use super::update::purge_record;
use super::{UpdateError, UpdateOutcome, apply_update};
use crate::store::ProductStore;
use crate::tracker::{Subscription, SubscriptionRegistry};

use std::fs;
use tempfile::{TempDir, tempdir};
use tokio::sync::mpsc;

fn create_test_store() -> (ProductStore, TempDir) {
    let dir = tempdir().unwrap();
    let store = ProductStore::open(dir.path().join("products.json")).unwrap();
    (store, dir)
}

#[test]
fn test_update_notifies_then_purges() {
    let (mut store, _dir) = create_test_store();
    store.add_product(4, "Widget", 100.0).unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut registry = SubscriptionRegistry::new("Widget");
    registry.attach(Subscription::with_id(4, "Widget", 100.0, tx));

    let report = apply_update(&mut store, Some(&mut registry), 4, "Widget", 80.0).unwrap();

    assert_eq!(report.delivered, 1);
    assert_eq!(report.price, 80.0);
    assert!(!store.contains(4, "Widget"));
    assert!(registry.is_empty());
    assert_eq!(rx.try_recv().unwrap().price, 80.0);
}

#[test]
fn test_update_missing_record_is_not_found() {
    let (mut store, _dir) = create_test_store();
    store.add_product(4, "Widget", 100.0).unwrap();
    let before = store.records().clone();

    let err = apply_update(&mut store, None, 4, "Gadget", 1.0).unwrap_err();

    assert!(matches!(err, UpdateError::NotFound { id: 4, .. }));
    assert_eq!(store.records(), &before);
}

#[test]
fn test_update_rejects_invalid_price() {
    let (mut store, _dir) = create_test_store();
    store.add_product(4, "Widget", 100.0).unwrap();

    let err = apply_update(&mut store, None, 4, "Widget", f64::INFINITY).unwrap_err();

    assert!(matches!(err, UpdateError::InvalidPrice(_)));
    assert_eq!(store.get_products(4)["Widget"], 100.0);
}

#[test]
fn test_update_without_registry_is_silent() {
    let (mut store, _dir) = create_test_store();
    store.add_product(4, "Widget", 100.0).unwrap();

    let report = apply_update(&mut store, None, 4, "Widget", 50.0).unwrap();

    assert_eq!(report.delivered, 0);
    assert!(store.is_empty());
}

#[test]
fn test_update_only_notifies_matching_identity() {
    let (mut store, _dir) = create_test_store();
    store.add_product(4, "Widget", 100.0).unwrap();
    store.add_product(5, "Widget", 100.0).unwrap();

    let (tx4, mut rx4) = mpsc::unbounded_channel();
    let (tx5, mut rx5) = mpsc::unbounded_channel();
    let mut registry = SubscriptionRegistry::new("Widget");
    registry.attach(Subscription::with_id(4, "Widget", 100.0, tx4));
    registry.attach(Subscription::with_id(5, "Widget", 100.0, tx5));

    apply_update(&mut store, Some(&mut registry), 5, "Widget", 60.0).unwrap();

    assert!(rx4.try_recv().is_err());
    assert_eq!(rx5.try_recv().unwrap().subscription_id, 5);
    assert!(registry.contains(4));
    assert!(!registry.contains(5));
    assert!(store.contains(4, "Widget"));
}

#[test]
fn test_storage_failure_is_distinct_and_nothing_notified() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    let mut store = ProductStore::open(sub.join("products.json")).unwrap();
    store.add_product(4, "Widget", 100.0).unwrap();
    fs::remove_dir_all(&sub).unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut registry = SubscriptionRegistry::new("Widget");
    registry.attach(Subscription::with_id(4, "Widget", 100.0, tx));

    let err = apply_update(&mut store, Some(&mut registry), 4, "Widget", 80.0).unwrap_err();

    assert!(matches!(err, UpdateError::Storage(_)));
    assert_eq!(store.get_products(4)["Widget"], 100.0);
    assert!(rx.try_recv().is_err());
    assert!(registry.contains(4));
}

#[test]
fn test_failed_purge_keeps_new_price_queued_and_subscription_attached() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    let mut store = ProductStore::open(sub.join("products.json")).unwrap();
    store.add_product(4, "Widget", 100.0).unwrap();
    assert!(store.update_price(4, "Widget", 80.0).unwrap());

    let (tx, _rx) = mpsc::unbounded_channel();
    let mut registry = SubscriptionRegistry::new("Widget");
    registry.attach(Subscription::with_id(4, "Widget", 100.0, tx));

    // price is on disk, now make the removal's save fail
    fs::remove_dir_all(&sub).unwrap();

    let err = purge_record(&mut store, Some(&mut registry), 4, "Widget").unwrap_err();

    assert!(matches!(err, UpdateError::Storage(_)));
    assert_eq!(store.get_products(4)["Widget"], 80.0);
    assert!(registry.contains(4));
}

#[test]
fn test_purge_detaches_every_duplicate() {
    let (mut store, _dir) = create_test_store();
    store.add_product(4, "Widget", 100.0).unwrap();

    let (tx, _rx) = mpsc::unbounded_channel();
    let mut registry = SubscriptionRegistry::new("Widget");
    registry.attach(Subscription::with_id(4, "Widget", 100.0, tx.clone()));
    registry.attach(Subscription::with_id(4, "Widget", 100.0, tx));

    purge_record(&mut store, Some(&mut registry), 4, "Widget").unwrap();

    assert!(store.is_empty());
    assert!(registry.is_empty());
}

#[test]
fn test_outcome_from_result() {
    let ok: UpdateOutcome = Ok(super::UpdateReport {
        subscription_id: 1,
        product: "Widget".into(),
        price: 1.0,
        delivered: 1,
    })
    .into();
    assert!(ok.success);
    assert!(ok.reason.is_none());

    let failed: UpdateOutcome = Err(UpdateError::UpdateFailed {
        id: 1,
        product: "Widget".into(),
    })
    .into();
    assert!(!failed.success);
    assert_eq!(
        failed.reason.as_deref(),
        Some("failed to update the price of Widget for subscription 1")
    );
}
