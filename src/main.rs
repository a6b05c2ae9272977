use pricewatch::config::{LogSettings, load_config};
use pricewatch::tracker::PriceTracker;
use pricewatch::utils::{TrackerError, logging};
use tracing::{error, info};

fn main() {
    let _ = dotenvy::dotenv();

    if let Err(e) = run() {
        // config may have failed before logging was set up
        logging::init(&LogSettings {
            level: "error".to_string(),
        });
        error!("pricewatch failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), TrackerError> {
    let config = load_config()?;
    logging::init(&config.log);

    let tracker = PriceTracker::open(&config)?;
    let pending = tracker.pending_records();

    info!(
        "Product store {} opened, {} record(s) awaiting a price update",
        tracker.store().path().display(),
        pending.len()
    );
    for record in &pending {
        info!(
            "Subscription {}: {} at {}",
            record.subscription_id, record.product, record.price
        );
    }

    Ok(())
}
