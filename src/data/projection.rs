use serde::{Deserialize, Serialize};

use super::classify::{Classification, ClassifiedSeries};
use super::model::{MetricSeries, Unit};

// ---------------------------------------------------------------------------
// Display rules
// ---------------------------------------------------------------------------

/// How a value becomes its on-chart text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayRule {
    /// Bare number: basis points, day counts.
    Plain,
    /// Number followed by `%`.
    Percent,
    /// `$` and thousands separators.
    Currency,
    /// Thousands separators only.
    Grouped,
}

impl DisplayRule {
    pub fn for_unit(unit: Unit) -> Self {
        match unit {
            Unit::BasisPoints | Unit::Days => DisplayRule::Plain,
            Unit::Percent => DisplayRule::Percent,
            Unit::Dollars => DisplayRule::Currency,
            Unit::Count => DisplayRule::Grouped,
        }
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            DisplayRule::Plain => format_number(value),
            DisplayRule::Percent => format!("{}%", format_number(value)),
            DisplayRule::Currency => {
                let text = group_thousands(&format_number(value.abs()));
                if value < 0.0 {
                    format!("-${text}")
                } else {
                    format!("${text}")
                }
            }
            DisplayRule::Grouped => group_thousands(&format_number(value)),
        }
    }
}

/// Integral values without decimals, everything else to one decimal.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

fn group_thousands(number: &str) -> String {
    let (sign, rest) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}{frac_part}")
}

// ---------------------------------------------------------------------------
// Chart-ready points
// ---------------------------------------------------------------------------

/// One bar or line vertex as handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub display_text: String,
    pub category: Option<Classification>,
}

/// Anything that can be laid out as ordered chart points.
pub trait Projectable {
    fn chart_points(&self, rule: DisplayRule) -> Vec<ChartPoint>;
}

impl Projectable for MetricSeries {
    fn chart_points(&self, rule: DisplayRule) -> Vec<ChartPoint> {
        self.points
            .iter()
            .map(|p| ChartPoint {
                label: p.category.clone(),
                value: p.value,
                display_text: rule.format(p.value),
                category: None,
            })
            .collect()
    }
}

impl Projectable for ClassifiedSeries {
    fn chart_points(&self, rule: DisplayRule) -> Vec<ChartPoint> {
        self.points
            .iter()
            .map(|p| ChartPoint {
                label: p.category.clone(),
                value: p.value,
                display_text: rule.format(p.value),
                category: Some(p.label),
            })
            .collect()
    }
}

/// Project a series into chart points, keeping the upstream order.
pub fn project<P: Projectable + ?Sized>(input: &P, rule: DisplayRule) -> Vec<ChartPoint> {
    input.chart_points(rule)
}
