use super::{Settings, load_config_from};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.store.path, "products.json");
    assert_eq!(settings.tracker.id_min, 1);
    assert_eq!(settings.tracker.id_max, 1000);
    assert_eq!(settings.log.level, "info");
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let file = tmp.path().join("absent");

    let cfg = load_config_from(file.to_str().unwrap()).expect("load_config failed");
    assert_eq!(cfg, Settings::default());
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let toml = r#"
        [store]
        path = "/tmp/elsewhere.json"

        [tracker]
        id_max = 50
    "#;
    fs::write(tmp.path().join("default.toml"), toml).expect("write config file");
    let base = tmp.path().join("default");

    let cfg = load_config_from(base.to_str().unwrap()).expect("load_config failed");
    assert_eq!(cfg.store.path, "/tmp/elsewhere.json");
    assert_eq!(cfg.tracker.id_min, 1);
    assert_eq!(cfg.tracker.id_max, 50);
    assert_eq!(cfg.log.level, "info");
}

#[test]
#[serial]
fn environment_overrides_file() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(
        tmp.path().join("default.toml"),
        "[store]\npath = \"from_file.json\"\n",
    )
    .expect("write config file");
    let base = tmp.path().join("default");

    temp_env::with_vars(
        [
            ("PRICEWATCH__STORE__PATH", Some("from_env.json")),
            ("PRICEWATCH__LOG__LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config_from(base.to_str().unwrap()).expect("load_config failed");
            assert_eq!(cfg.store.path, "from_env.json");
            assert_eq!(cfg.log.level, "debug");
        },
    );
}

#[test]
#[serial]
fn inverted_identity_range_is_rejected() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(
        tmp.path().join("default.toml"),
        "[tracker]\nid_min = 10\nid_max = 5\n",
    )
    .expect("write config file");
    let base = tmp.path().join("default");

    assert!(load_config_from(base.to_str().unwrap()).is_err());
}
