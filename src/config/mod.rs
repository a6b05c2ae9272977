//! Configuration loading.
//!
//! Settings come from an optional `config/default.{toml,json,...}` file and
//! from `PRICEWATCH__*` environment variables (for example
//! `PRICEWATCH__STORE__PATH=/var/lib/pricewatch/products.json`). Anything
//! left unspecified falls back to `Settings::default()`.

mod settings;

use config::{Config, ConfigError, Environment, File};

use settings::PartialSettings;

pub use settings::{LogSettings, Settings, StoreSettings, TrackerSettings};

const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Loads the configuration from the default file and environment variables,
/// merged over the default values.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(DEFAULT_CONFIG_FILE)
}

/// Same as [`load_config`] but reads the optional file source from `file`
/// (extension is inferred by the `config` crate).
pub fn load_config_from(file: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix("PRICEWATCH")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let settings = partial.merge_over(Settings::default());

    if settings.tracker.id_min > settings.tracker.id_max {
        return Err(ConfigError::Message(format!(
            "tracker.id_min ({}) must not exceed tracker.id_max ({})",
            settings.tracker.id_min, settings.tracker.id_max
        )));
    }

    Ok(settings)
}

#[cfg(test)]
mod tests;
