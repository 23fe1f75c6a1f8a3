//! Mean-baseline classification.

use rusty_bench::data::classify::{classify, label_for, Classification, BASELINE_TOLERANCE};
use rusty_bench::data::dimensions::{CHANNEL, MONTH};
use rusty_bench::data::filter::filter;
use rusty_bench::data::model::{MetricSeries, Selection, Unit};
use rusty_bench::data::store::{get_table, TableName};

fn series(values: &[f64]) -> MetricSeries {
    MetricSeries::from_values(
        "test",
        Unit::Days,
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("p{i}"), *v))
            .collect(),
    )
}

fn retail_ctc_series() -> MetricSeries {
    let table = filter(
        &get_table(TableName::CtcByChannel),
        &Selection::new().with(CHANNEL, "Retail"),
    );
    MetricSeries::along("CTC Days", &table, MONTH, "CTC Days")
}

#[test]
fn ctc_days_classify_against_their_mean() {
    let s = retail_ctc_series();
    assert_eq!(
        s.values(),
        vec![34.0, 33.0, 32.0, 31.0, 34.0, 35.0, 36.0, 37.0, 36.0, 34.0, 33.0, 32.0]
    );

    let classified = classify(&s);
    let baseline = classified.baseline.unwrap_or_default();
    assert!((baseline - 407.0 / 12.0).abs() < 1e-9);

    let label_of = |month: &str| {
        classified
            .points
            .iter()
            .find(|p| p.category == month)
            .map(|p| p.label)
    };
    assert_eq!(label_of("August"), Some(Classification::Strong));
    assert_eq!(label_of("April"), Some(Classification::Weak));
    assert_eq!(label_of("January"), Some(Classification::Neutral));
    assert_eq!(label_of("October"), Some(Classification::Neutral));
}

#[test]
fn constant_series_is_all_neutral() {
    for value in [0.0, 34.0, 1234.5] {
        let classified = classify(&series(&[value; 6]));
        assert!(classified
            .points
            .iter()
            .all(|p| p.label == Classification::Neutral));
    }
}

#[test]
fn band_edges_are_neutral() {
    let classified = classify(&series(&[10.0, 11.0, 12.0]));
    assert_eq!(classified.baseline, Some(11.0));
    assert!(classified
        .points
        .iter()
        .all(|p| p.label == Classification::Neutral));

    assert_eq!(label_for(11.0 + BASELINE_TOLERANCE, 11.0), Classification::Neutral);
    assert_eq!(label_for(12.5, 11.0), Classification::Strong);
    assert_eq!(label_for(9.5, 11.0), Classification::Weak);
}

#[test]
fn classify_is_idempotent() {
    let s = retail_ctc_series();
    let once = classify(&s);
    let twice = classify(&once.series());
    assert_eq!(once, twice);
}

#[test]
fn baseline_belongs_to_the_series_passed_in() {
    // 230 is well above the mean of a low view, and average in a high one.
    let low = classify(&series(&[200.0, 230.0]));
    let high = classify(&series(&[230.0, 230.0, 231.0]));

    assert_eq!(low.points[1].label, Classification::Strong);
    assert_eq!(high.points[0].label, Classification::Neutral);
}

#[test]
fn classification_keeps_order_and_values() {
    let s = series(&[5.0, 1.0, 9.0]);
    let classified = classify(&s);
    let categories: Vec<&str> = classified.points.iter().map(|p| p.category.as_str()).collect();
    assert_eq!(categories, vec!["p0", "p1", "p2"]);
    assert_eq!(classified.series(), s);
}

#[test]
fn empty_series_has_no_baseline() {
    let classified = classify(&series(&[]));
    assert_eq!(classified.baseline, None);
    assert!(classified.points.is_empty());
}
