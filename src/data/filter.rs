use super::dimensions::{month_to_quarter, QUARTER, QUARTERS, MONTH};
use super::model::{Cell, Dimension, FactTable, Row, Selection};
use crate::error::{DashError, DashResult};

// ---------------------------------------------------------------------------
// Selection filter
// ---------------------------------------------------------------------------

fn cell_matches(cell: &Cell, value: &str) -> bool {
    match cell.as_str() {
        Some(s) => s == value,
        None => cell.to_string() == value,
    }
}

/// Return indices of rows that pass every selected dimension.
///
/// A row passes a selection entry when its cell for that column equals the
/// chosen value. A row without the column never passes, so selecting on a
/// column the table does not have yields nothing.
pub fn filtered_indices(table: &FactTable, selection: &Selection) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            selection.iter().all(|(col, value)| match row.get(col) {
                Some(cell) => cell_matches(cell, value),
                None => false,
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Rows of `table` matching `selection`, in their original order.
/// Unmatched values give an empty table, never an error.
pub fn filter(table: &FactTable, selection: &Selection) -> FactTable {
    let rows: Vec<Row> = filtered_indices(table, selection)
        .into_iter()
        .map(|i| table.rows[i].clone())
        .collect();
    log::debug!(
        "filter '{}' by {:?}: {} of {} rows",
        table.name,
        selection,
        rows.len(),
        table.len()
    );
    table.with_rows(rows)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggOp {
    Sum,
    Mean,
}

/// How rows are bucketed for [`aggregate`].
#[derive(Debug, Clone)]
pub struct GroupBy {
    /// Source column read from each row.
    pub column: String,
    /// Output dimension; its declared order is the output row order.
    pub output: Dimension,
    /// Maps a source value to its bucket. `None` groups by the value itself.
    pub bucket: Option<fn(&str) -> Option<&'static str>>,
}

impl GroupBy {
    /// Group by an existing dimension's values.
    pub fn dimension(dimension: Dimension) -> Self {
        GroupBy {
            column: dimension.name.clone(),
            output: dimension,
            bucket: None,
        }
    }

    /// Month → Quarter rollup.
    pub fn quarter() -> Self {
        GroupBy {
            column: MONTH.to_string(),
            output: Dimension::new(QUARTER, &QUARTERS),
            bucket: Some(month_to_quarter as fn(&str) -> Option<&'static str>),
        }
    }

    fn key(&self, row: &Row) -> Option<String> {
        let cell = row.get(&self.column)?;
        let raw = match cell.as_str() {
            Some(s) => s.to_string(),
            None => cell.to_string(),
        };
        match self.bucket {
            Some(bucket) => bucket(&raw).map(str::to_string),
            None => Some(raw),
        }
    }
}

/// Roll `table` up along `group_by`, combining `measures` with `op`.
///
/// The result has a single dimension (the group-by output) and its rows
/// follow that dimension's declared order, whatever the input order.
/// Groups with no rows are omitted. An integer sum that overflows `i64`
/// is an `InvalidConfiguration` error.
pub fn aggregate(
    table: &FactTable,
    group_by: &GroupBy,
    measures: &[&str],
    op: AggOp,
) -> DashResult<FactTable> {
    let mut groups: Vec<Vec<&Row>> = vec![Vec::new(); group_by.output.values.len()];
    for row in &table.rows {
        let Some(key) = group_by.key(row) else {
            log::debug!(
                "aggregate '{}': row has no bucket for column '{}'",
                table.name,
                group_by.column
            );
            continue;
        };
        match group_by.output.position(&key) {
            Some(pos) => groups[pos].push(row),
            None => log::debug!("aggregate '{}': '{key}' is outside the output domain", table.name),
        }
    }

    let kept_measures = table
        .measures
        .iter()
        .filter(|m| measures.contains(&m.column.as_str()))
        .cloned()
        .collect();

    let mut out = FactTable::new(&table.name, vec![group_by.output.clone()], kept_measures);
    for (value, rows) in group_by.output.values.iter().zip(&groups) {
        if rows.is_empty() {
            continue;
        }
        let mut cells = vec![(group_by.output.name.as_str(), Cell::Label(value.clone()))];
        for col in measures {
            if let Some(cell) = combine(rows, col, op)? {
                cells.push((*col, cell));
            }
        }
        out = out.row(cells);
    }
    Ok(out)
}

fn combine(rows: &[&Row], column: &str, op: AggOp) -> DashResult<Option<Cell>> {
    let cells: Vec<&Cell> = rows.iter().filter_map(|r| r.get(column)).collect();
    if cells.is_empty() {
        return Ok(None);
    }
    let all_integer = cells.iter().all(|c| matches!(c, Cell::Integer(_)));
    let cell = match op {
        AggOp::Sum if all_integer => {
            let mut total: i64 = 0;
            for c in &cells {
                if let Cell::Integer(i) = c {
                    total = total.checked_add(*i).ok_or_else(|| {
                        DashError::InvalidConfiguration(format!(
                            "sum of '{column}' overflows 64 bits"
                        ))
                    })?;
                }
            }
            Cell::Integer(total)
        }
        AggOp::Sum => Cell::Float(cells.iter().filter_map(|c| c.as_f64()).sum()),
        AggOp::Mean => {
            let values: Vec<f64> = cells.iter().filter_map(|c| c.as_f64()).collect();
            if values.is_empty() {
                return Ok(None);
            }
            Cell::Float(values.iter().sum::<f64>() / values.len() as f64)
        }
    };
    Ok(Some(cell))
}
