//! Config loading and validation.

use std::path::PathBuf;

use rusty_bench::config::DashboardConfig;
use rusty_bench::data::model::Selection;
use rusty_bench::data::synthetic::GeneratorBounds;
use rusty_bench::pipeline::{derive_section, Section};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rusty-bench-{}-{name}.json", std::process::id()));
    std::fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn defaults_are_valid() {
    let config = DashboardConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.seed, 42);
    assert_eq!(
        config.secondary,
        GeneratorBounds::new((80, 130), (250_000, 500_000), (0.4, 0.8))
    );
}

#[test]
fn partial_file_keeps_defaults_for_missing_keys() {
    let path = write_temp("partial", r#"{ "seed": 7 }"#);
    let config = DashboardConfig::load(&path).expect("load");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.seed, 7);
    assert_eq!(config.production, DashboardConfig::default().production);
}

#[test]
fn inverted_bounds_in_file_are_rejected() {
    let path = write_temp(
        "inverted",
        r#"{ "production": { "units": [120, 40], "price": [150000, 450000], "ratio": [0.4, 0.7] } }"#,
    );
    let result = DashboardConfig::load(&path);
    std::fs::remove_file(&path).ok();

    let err = result.expect_err("inverted bounds must fail");
    assert!(format!("{err:#}").contains("inverted"));
}

#[test]
fn missing_file_is_an_error() {
    let path = std::env::temp_dir().join("rusty-bench-does-not-exist.json");
    assert!(DashboardConfig::load(&path).is_err());
}

#[test]
fn overflowing_price_bounds_fail_to_load() {
    let path = write_temp(
        "overflow",
        r#"{ "production": { "units": [40, 120], "price": [100000000000000000, 200000000000000000], "ratio": [0.4, 0.7] } }"#,
    );
    let result = DashboardConfig::load(&path);
    std::fs::remove_file(&path).ok();

    let err = result.expect_err("overflowing bounds must fail");
    assert!(format!("{err:#}").contains("does not fit"));
}

#[test]
fn overflowing_bounds_fail_views_without_panicking() {
    let mut config = DashboardConfig::default();
    config.production.price = (100_000_000_000_000_000, 200_000_000_000_000_000);

    let outcomes = derive_section(Section::Production, &Selection::new(), &config);
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| o.result.is_err())
        .map(|o| o.view.id)
        .collect();
    assert_eq!(failed, vec!["production-monthly", "production-quarterly"]);
}
