//! Seeded production-table generator.

use rusty_bench::data::dimensions::{LOAN_TYPE, LOAN_TYPES, MONTH, MONTHS};
use rusty_bench::data::synthetic::{
    generate, GeneratorBounds, MY_UNITS, MY_VOLUME, PEER_UNITS, PEER_VOLUME,
};
use rusty_bench::error::DashError;

fn secondary_bounds() -> GeneratorBounds {
    GeneratorBounds::new((80, 130), (250_000, 500_000), (0.4, 0.8))
}

#[test]
fn same_seed_produces_byte_identical_tables() {
    let a = generate(&LOAN_TYPES, &MONTHS, &secondary_bounds(), 42).expect("generate a");
    let b = generate(&LOAN_TYPES, &MONTHS, &secondary_bounds(), 42).expect("generate b");

    let bytes_a = serde_json::to_vec(&a).expect("serialize a");
    let bytes_b = serde_json::to_vec(&b).expect("serialize b");
    assert_eq!(bytes_a, bytes_b);
}

#[test]
fn different_seeds_produce_different_tables() {
    let a = generate(&LOAN_TYPES, &MONTHS, &secondary_bounds(), 42).expect("generate a");
    let b = generate(&LOAN_TYPES, &MONTHS, &secondary_bounds(), 99).expect("generate b");
    assert_ne!(a.rows, b.rows, "seed is not being used");
}

#[test]
fn rows_run_months_outer_loan_types_inner() {
    let table = generate(&LOAN_TYPES, &MONTHS, &secondary_bounds(), 42).expect("generate");
    assert_eq!(table.len(), MONTHS.len() * LOAN_TYPES.len());

    for (i, row) in table.rows.iter().enumerate() {
        assert_eq!(row.text(MONTH), Some(MONTHS[i / LOAN_TYPES.len()]));
        assert_eq!(row.text(LOAN_TYPE), Some(LOAN_TYPES[i % LOAN_TYPES.len()]));
    }
}

#[test]
fn draws_stay_inside_their_bounds() {
    let bounds = secondary_bounds();
    let table = generate(&LOAN_TYPES, &MONTHS, &bounds, 7).expect("generate");

    for row in &table.rows {
        let peer_units = row.number(PEER_UNITS).expect("peer units");
        let peer_volume = row.number(PEER_VOLUME).expect("peer volume");
        let my_units = row.number(MY_UNITS).expect("my units");
        let my_volume = row.number(MY_VOLUME).expect("my volume");

        assert!((80.0..=130.0).contains(&peer_units));
        assert!(peer_volume >= peer_units * 250_000.0 && peer_volume <= peer_units * 500_000.0);
        assert!(my_units >= (peer_units * 0.4).floor() && my_units <= (peer_units * 0.8).floor());
        assert!(my_volume >= my_units * 250_000.0 && my_volume <= my_units * 500_000.0);
    }
}

#[test]
fn degenerate_bounds_are_exact() {
    let bounds = GeneratorBounds::new((100, 100), (1_000, 1_000), (0.55, 0.55));
    let table = generate(&["FHA"], &["March"], &bounds, 1).expect("generate");

    let row = &table.rows[0];
    assert_eq!(row.number(PEER_UNITS), Some(100.0));
    assert_eq!(row.number(PEER_VOLUME), Some(100_000.0));
    assert_eq!(row.number(MY_UNITS), Some(55.0));
    assert_eq!(row.number(MY_VOLUME), Some(55_000.0));
}

#[test]
fn inverted_bounds_are_rejected() {
    let cases = [
        GeneratorBounds::new((130, 80), (250_000, 500_000), (0.4, 0.8)),
        GeneratorBounds::new((80, 130), (500_000, 250_000), (0.4, 0.8)),
        GeneratorBounds::new((80, 130), (250_000, 500_000), (0.8, 0.4)),
        GeneratorBounds::new((80, 130), (250_000, 500_000), (f64::NAN, 0.8)),
    ];
    for bounds in cases {
        let result = generate(&LOAN_TYPES, &MONTHS, &bounds, 42);
        assert!(
            matches!(result, Err(DashError::InvalidConfiguration(_))),
            "{bounds:?} should be rejected"
        );
    }
}

#[test]
fn bounds_whose_volume_overflows_are_rejected() {
    let cases = [
        GeneratorBounds::new((40, 120), (100_000_000_000_000_000, 200_000_000_000_000_000), (0.4, 0.7)),
        GeneratorBounds::new((i64::MIN, 0), (2, 3), (0.4, 0.7)),
        GeneratorBounds::new((40, 120), (150_000, 450_000), (f64::MIN, f64::MAX)),
    ];
    for bounds in cases {
        assert!(
            matches!(bounds.validate(), Err(DashError::InvalidConfiguration(_))),
            "{bounds:?} should be rejected"
        );
        assert!(generate(&LOAN_TYPES, &MONTHS, &bounds, 42).is_err());
    }
}

#[test]
fn ratio_driven_overflow_is_an_error_not_a_panic() {
    // Peer volume fits, but a huge ratio inflates my units past it.
    let bounds = GeneratorBounds::new((1_000, 1_000), (1_000_000_000_000, 1_000_000_000_000), (1e9, 1e9));
    assert!(bounds.validate().is_ok());
    let result = generate(&["FHA"], &["March"], &bounds, 42);
    assert!(matches!(result, Err(DashError::InvalidConfiguration(_))));
}
