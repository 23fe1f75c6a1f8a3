//! Selection filter and rollup behaviour on the literal tables.

use rusty_bench::data::dimensions::{
    CHANNEL, CHANNELS, INSTITUTION_TYPE, LOAN_PURPOSE, MONTH, PRODUCT, QUARTER,
};
use rusty_bench::data::filter::{aggregate, filter, filtered_indices, AggOp, GroupBy};
use rusty_bench::data::model::{Cell, Dimension, FactTable, Measure, Selection, Unit};
use rusty_bench::error::DashError;
use rusty_bench::data::store::{get_table, TableName};

fn retail_ctc() -> rusty_bench::data::model::FactTable {
    let table = get_table(TableName::CtcByChannel);
    filter(&table, &Selection::new().with(CHANNEL, "Retail"))
}

fn labels(table: &rusty_bench::data::model::FactTable, column: &str) -> Vec<String> {
    table
        .rows
        .iter()
        .map(|r| r.text(column).unwrap_or_default().to_string())
        .collect()
}

#[test]
fn government_selects_a_single_row() {
    let table = get_table(TableName::ProductMargins);
    let subset = filter(&table, &Selection::new().with(PRODUCT, "Government"));

    assert_eq!(subset.len(), 1);
    assert_eq!(subset.rows[0].number("January (bps)"), Some(234.0));
    assert_eq!(subset.rows[0].number("February (bps)"), Some(275.0));
    assert_eq!(subset.dimensions, table.dimensions, "schema must survive filtering");
}

#[test]
fn values_missing_from_the_table_give_an_empty_subset() {
    let table = get_table(TableName::ProductMargins);
    for value in ["Reverse", "", "government", "Government "] {
        let subset = filter(&table, &Selection::new().with(PRODUCT, value));
        assert!(subset.is_empty(), "'{value}' should match nothing");
    }
}

#[test]
fn columns_missing_from_the_table_give_an_empty_subset() {
    let table = get_table(TableName::ProductMargins);
    let subset = filter(&table, &Selection::new().with("Region", "West"));
    assert!(subset.is_empty());
}

#[test]
fn empty_selection_keeps_every_row_in_order() {
    let table = get_table(TableName::Salaries);
    assert_eq!(filtered_indices(&table, &Selection::new()), (0..table.len()).collect::<Vec<_>>());
}

#[test]
fn selections_on_two_dimensions_intersect() {
    let table = get_table(TableName::MarginsByInstitution);
    let subset = filter(
        &table,
        &Selection::new()
            .with(INSTITUTION_TYPE, "Bank")
            .with(PRODUCT, "Jumbo"),
    );
    assert_eq!(subset.len(), 1);
    assert_eq!(subset.rows[0].get("Margin (bps)"), Some(&Cell::Integer(139)));
}

#[test]
fn filtering_preserves_row_order() {
    let subset = retail_ctc();
    assert_eq!(subset.len(), 12);
    assert_eq!(labels(&subset, MONTH)[0], "January");
    assert_eq!(labels(&subset, MONTH)[11], "December");
}

#[test]
fn quarter_rollup_is_ordered_whatever_the_input_order() {
    let subset = retail_ctc();
    let mut reversed = subset.clone();
    reversed.rows.reverse();
    let mut rotated = subset.clone();
    rotated.rows.rotate_left(5);

    for table in [&subset, &reversed, &rotated] {
        let rolled = aggregate(table, &GroupBy::quarter(), &["CTC Days"], AggOp::Sum).expect("aggregate");
        assert_eq!(labels(&rolled, QUARTER), vec!["Q1", "Q2", "Q3", "Q4"]);
        let sums: Vec<Option<&Cell>> = rolled.rows.iter().map(|r| r.get("CTC Days")).collect();
        assert_eq!(
            sums,
            vec![
                Some(&Cell::Integer(99)),
                Some(&Cell::Integer(100)),
                Some(&Cell::Integer(109)),
                Some(&Cell::Integer(99)),
            ]
        );
    }
}

#[test]
fn quarter_rollup_skips_quarters_without_rows() {
    let mut subset = retail_ctc();
    subset
        .rows
        .retain(|r| matches!(r.text(MONTH), Some("February") | Some("November")));

    let rolled = aggregate(&subset, &GroupBy::quarter(), &["CTC Days"], AggOp::Sum).expect("aggregate");
    assert_eq!(labels(&rolled, QUARTER), vec!["Q1", "Q4"]);
}

#[test]
fn mean_rollup_averages_each_quarter() {
    let rolled = aggregate(&retail_ctc(), &GroupBy::quarter(), &["CTC Days"], AggOp::Mean).expect("aggregate");
    assert_eq!(rolled.rows[0].get("CTC Days"), Some(&Cell::Float(33.0)));
    assert_eq!(rolled.rows[2].number("CTC Days"), Some(109.0 / 3.0));
}

#[test]
fn grouping_by_a_dimension_follows_its_declared_order() {
    let mut table = get_table(TableName::CtcByChannel);
    table.rows.reverse();

    let by_channel = aggregate(
        &table,
        &GroupBy::dimension(Dimension::new(CHANNEL, &CHANNELS)),
        &["CTC Days"],
        AggOp::Sum,
    )
    .expect("aggregate");
    assert_eq!(labels(&by_channel, CHANNEL), vec!["Retail", "Wholesale", "Correspondent"]);
    assert_eq!(by_channel.rows[0].get("CTC Days"), Some(&Cell::Integer(407)));
    assert_eq!(by_channel.rows[1].get("CTC Days"), Some(&Cell::Integer(352)));
    assert_eq!(by_channel.rows[2].get("CTC Days"), Some(&Cell::Integer(293)));
}

#[test]
fn float_measures_sum_to_floats() {
    let table = get_table(TableName::PullThrough);
    let subset = filter(&table, &Selection::new().with(LOAN_PURPOSE, "Purchase"));
    let rolled = aggregate(
        &subset,
        &GroupBy::dimension(Dimension::new(LOAN_PURPOSE, &["Purchase"])),
        &["Pull-Through"],
        AggOp::Sum,
    )
    .expect("aggregate");
    let total = rolled.rows[0].number("Pull-Through").unwrap_or_default();
    assert!((total - (78.4 + 81.2 + 83.0 + 79.6)).abs() < 1e-9);
    assert!(matches!(rolled.rows[0].get("Pull-Through"), Some(Cell::Float(_))));
}

#[test]
fn integer_sum_overflow_is_an_error() {
    let table = FactTable::new(
        "Overflow",
        vec![Dimension::new(MONTH, &["January", "February"])],
        vec![Measure::new("Volume", "Volume", Unit::Dollars)],
    )
    .row(vec![(MONTH, Cell::period("January")), ("Volume", Cell::Integer(i64::MAX))])
    .row(vec![(MONTH, Cell::period("February")), ("Volume", Cell::Integer(1))]);

    let result = aggregate(&table, &GroupBy::quarter(), &["Volume"], AggOp::Sum);
    assert!(matches!(result, Err(DashError::InvalidConfiguration(_))));
}
