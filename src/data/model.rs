use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cell – a single value in a fact table column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Dimension columns hold `Label` or `Period`,
/// measure columns hold `Integer` or `Float`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    Label(String),
    Integer(i64),
    Float(f64),
    /// Month or reporting period label, e.g. `"Jan '25"`.
    Period(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Label(s) | Cell::Period(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v:.2}"),
        }
    }
}

impl Cell {
    pub fn label(s: &str) -> Self {
        Cell::Label(s.to_string())
    }

    pub fn period(s: &str) -> Self {
        Cell::Period(s.to_string())
    }

    /// Text of a categorical cell, `None` for measures.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Label(s) | Cell::Period(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value of a measure cell, `None` for categories.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Schema: dimensions and measures
// ---------------------------------------------------------------------------

/// A categorical axis with a fixed, ordered domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub name: String,
    pub values: Vec<String>,
}

impl Dimension {
    pub fn new(name: &str, values: &[&str]) -> Self {
        Dimension {
            name: name.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Position of `value` in the declared order.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

/// Unit of a measure column; drives display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    BasisPoints,
    Days,
    Percent,
    Dollars,
    Count,
}

impl Unit {
    /// Axis caption for charts.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Unit::BasisPoints => "Basis Points (bps)",
            Unit::Days => "Days",
            Unit::Percent => "Percent (%)",
            Unit::Dollars => "Dollars ($)",
            Unit::Count => "Units",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Measure {
    /// Column name in the rows.
    pub column: String,
    /// Short label used as a category when a row is read across its measures.
    pub label: String,
    pub unit: Unit,
}

impl Measure {
    pub fn new(column: &str, label: &str, unit: Unit) -> Self {
        Measure {
            column: column.to_string(),
            label: label.to_string(),
            unit,
        }
    }
}

// ---------------------------------------------------------------------------
// Row / FactTable
// ---------------------------------------------------------------------------

/// One row of a fact table: column name → cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub cells: BTreeMap<String, Cell>,
}

impl Row {
    pub fn new(cells: Vec<(&str, Cell)>) -> Self {
        Row {
            cells: cells
                .into_iter()
                .map(|(col, cell)| (col.to_string(), cell))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Cell::as_str)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Cell::as_f64)
    }
}

/// An immutable in-memory table with its declared schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactTable {
    pub name: String,
    pub dimensions: Vec<Dimension>,
    pub measures: Vec<Measure>,
    pub rows: Vec<Row>,
}

impl FactTable {
    pub fn new(name: &str, dimensions: Vec<Dimension>, measures: Vec<Measure>) -> Self {
        FactTable {
            name: name.to_string(),
            dimensions,
            measures,
            rows: Vec::new(),
        }
    }

    /// Append a row (builder style, used by the literal tables).
    pub fn row(mut self, cells: Vec<(&str, Cell)>) -> Self {
        self.rows.push(Row::new(cells));
        self
    }

    /// Same schema, different rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> FactTable {
        FactTable {
            name: self.name.clone(),
            dimensions: self.dimensions.clone(),
            measures: self.measures.clone(),
            rows,
        }
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    pub fn measure(&self, column: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.column == column)
    }

    /// Column names in schema order (dimensions first).
    pub fn column_names(&self) -> Vec<&str> {
        self.dimensions
            .iter()
            .map(|d| d.name.as_str())
            .chain(self.measures.iter().map(|m| m.column.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Dimension name → chosen value. Built per interaction and passed explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    choices: BTreeMap<String, String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dimension: &str, value: &str) -> Self {
        self.set(dimension, value);
        self
    }

    pub fn set(&mut self, dimension: &str, value: &str) {
        self.choices.insert(dimension.to_string(), value.to_string());
    }

    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.choices.get(dimension).map(String::as_str)
    }

    /// Restrict to the given dimensions.
    pub fn only(&self, dimensions: &[&str]) -> Selection {
        Selection {
            choices: self
                .choices
                .iter()
                .filter(|(k, _)| dimensions.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.choices.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// MetricSeries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub category: String,
    pub value: f64,
}

/// Ordered (category, value) pairs for a single measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub name: String,
    pub unit: Unit,
    pub points: Vec<SeriesPoint>,
}

impl MetricSeries {
    pub fn from_values(name: &str, unit: Unit, values: Vec<(String, f64)>) -> Self {
        MetricSeries {
            name: name.to_string(),
            unit,
            points: values
                .into_iter()
                .map(|(category, value)| SeriesPoint { category, value })
                .collect(),
        }
    }

    /// Read one row across several measure columns (wide tables).
    /// Categories are the measures' labels, in the order given.
    pub fn across_row(name: &str, table: &FactTable, row: &Row, columns: &[&str]) -> Self {
        let mut unit = Unit::Count;
        let mut points = Vec::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            let Some(measure) = table.measure(col) else {
                log::debug!("table '{}' has no measure '{col}'", table.name);
                continue;
            };
            if i == 0 {
                unit = measure.unit;
            }
            if let Some(value) = row.number(col) {
                points.push(SeriesPoint {
                    category: measure.label.clone(),
                    value,
                });
            }
        }
        MetricSeries {
            name: name.to_string(),
            unit,
            points,
        }
    }

    /// Read one measure along a dimension (long tables). Points follow the
    /// dimension's declared order whatever the row order.
    pub fn along(name: &str, table: &FactTable, dimension: &str, column: &str) -> Self {
        let unit = table.measure(column).map(|m| m.unit).unwrap_or(Unit::Count);
        let mut points = Vec::new();
        if let Some(dim) = table.dimension(dimension) {
            for value in &dim.values {
                for row in table.rows.iter().filter(|r| r.text(dimension) == Some(value.as_str())) {
                    if let Some(v) = row.number(column) {
                        points.push(SeriesPoint {
                            category: value.clone(),
                            value: v,
                        });
                    }
                }
            }
        } else {
            log::debug!("table '{}' has no dimension '{dimension}'", table.name);
        }
        MetricSeries {
            name: name.to_string(),
            unit,
            points,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
