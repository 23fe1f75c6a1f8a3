//! Literal fact tables.

use rusty_bench::data::dimensions::{self, PERIOD};
use rusty_bench::data::store::{get_table, TableName};

#[test]
fn every_table_is_populated_and_uses_declared_domains() {
    for name in TableName::ALL {
        let table = get_table(name);
        assert!(!table.is_empty(), "{name:?} is empty");

        for dim in &table.dimensions {
            let declared = dimensions::domain(&dim.name)
                .unwrap_or_else(|| panic!("{name:?}: undeclared dimension {}", dim.name));
            assert_eq!(dim.values, declared.values, "{name:?}: {} order", dim.name);

            for row in &table.rows {
                let value = row.text(&dim.name).unwrap_or_default();
                assert!(dim.contains(value), "{name:?}: '{value}' not in {}", dim.name);
            }
        }
        for measure in &table.measures {
            assert!(
                table.rows.iter().all(|r| r.number(&measure.column).is_some()),
                "{name:?}: missing {}",
                measure.column
            );
        }
    }
}

#[test]
fn dimension_combinations_are_unique() {
    for name in TableName::ALL {
        let table = get_table(name);
        let mut keys: Vec<Vec<&str>> = table
            .rows
            .iter()
            .map(|r| {
                table
                    .dimensions
                    .iter()
                    .map(|d| r.text(&d.name).unwrap_or_default())
                    .collect()
            })
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total, "{name:?} has duplicate keys");
    }
}

#[test]
fn tables_are_rebuilt_identically_on_each_access() {
    for name in TableName::ALL {
        assert_eq!(get_table(name), get_table(name));
    }
}

#[test]
fn ctc_timeline_matches_the_published_series() {
    let table = get_table(TableName::CtcTimeline);
    let periods: Vec<&str> = table.rows.iter().filter_map(|r| r.text(PERIOD)).collect();
    assert_eq!(periods.first(), Some(&"Feb '24"));
    assert_eq!(periods.last(), Some(&"Feb '25"));
    let days: Vec<f64> = table.rows.iter().filter_map(|r| r.number("Days")).collect();
    assert_eq!(
        days,
        vec![33.0, 31.0, 33.0, 33.0, 36.0, 36.0, 34.0, 34.0, 34.0, 34.0, 34.0, 37.0, 34.0]
    );
}
