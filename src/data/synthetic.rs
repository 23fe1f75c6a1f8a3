use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use super::dimensions::{LOAN_TYPE, MONTH};
use super::model::{Cell, Dimension, FactTable, Measure, Unit};
use crate::error::{DashError, DashResult};

pub const PEER_UNITS: &str = "Peer Units";
pub const PEER_VOLUME: &str = "Peer Volume";
pub const MY_UNITS: &str = "My Units";
pub const MY_VOLUME: &str = "My Volume";

// ---------------------------------------------------------------------------
// Generator bounds
// ---------------------------------------------------------------------------

/// Draw ranges for one section's production table. All ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorBounds {
    /// Peer units per (month, loan type).
    pub units: (i64, i64),
    /// Average loan amount, in dollars.
    pub price: (i64, i64),
    /// My-company units as a fraction of peer units.
    pub ratio: (f64, f64),
}

impl GeneratorBounds {
    pub fn new(units: (i64, i64), price: (i64, i64), ratio: (f64, f64)) -> Self {
        GeneratorBounds {
            units,
            price,
            ratio,
        }
    }

    pub fn validate(&self) -> DashResult<()> {
        let (a, b) = self.units;
        if a > b {
            return Err(DashError::InvalidConfiguration(format!(
                "unit bounds are inverted: {a} > {b}"
            )));
        }
        let (c, d) = self.price;
        if c > d {
            return Err(DashError::InvalidConfiguration(format!(
                "price bounds are inverted: {c} > {d}"
            )));
        }
        let (r1, r2) = self.ratio;
        if !r1.is_finite() || !r2.is_finite() {
            return Err(DashError::InvalidConfiguration(format!(
                "ratio bounds must be finite, got ({r1}, {r2})"
            )));
        }
        if r1 > r2 {
            return Err(DashError::InvalidConfiguration(format!(
                "ratio bounds are inverted: {r1} > {r2}"
            )));
        }
        if !(r2 - r1).is_finite() {
            return Err(DashError::InvalidConfiguration(format!(
                "ratio range ({r1}, {r2}) is too wide to sample"
            )));
        }
        for units in [a, b] {
            for price in [c, d] {
                volume(units, price)?;
            }
        }
        Ok(())
    }
}

/// Units times average price, rejecting products that overflow `i64`.
fn volume(units: i64, price: i64) -> DashResult<i64> {
    units.checked_mul(price).ok_or_else(|| {
        DashError::InvalidConfiguration(format!(
            "volume {units} x {price} does not fit in 64 bits"
        ))
    })
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a production-volume table.
///
/// Draw order is fixed: months outer, loan types inner, and per row
/// peer units, peer price, my ratio, my price. Same arguments, same table.
pub fn generate(
    loan_types: &[&str],
    months: &[&str],
    bounds: &GeneratorBounds,
    seed: u64,
) -> DashResult<FactTable> {
    bounds.validate()?;

    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let mut table = FactTable::new(
        "Production Volume",
        vec![
            Dimension::new(MONTH, months),
            Dimension::new(LOAN_TYPE, loan_types),
        ],
        vec![
            Measure::new(PEER_UNITS, "Peer Group", Unit::Count),
            Measure::new(PEER_VOLUME, "Peer Group", Unit::Dollars),
            Measure::new(MY_UNITS, "My Company", Unit::Count),
            Measure::new(MY_VOLUME, "My Company", Unit::Dollars),
        ],
    );

    for month in months {
        for loan_type in loan_types {
            let peer_units: i64 = rng.gen_range(bounds.units.0..=bounds.units.1);
            let peer_volume = volume(peer_units, rng.gen_range(bounds.price.0..=bounds.price.1))?;
            let ratio: f64 = rng.gen_range(bounds.ratio.0..=bounds.ratio.1);
            let my_units = (peer_units as f64 * ratio).floor() as i64;
            let my_volume = volume(my_units, rng.gen_range(bounds.price.0..=bounds.price.1))?;

            table = table.row(vec![
                (MONTH, Cell::period(month)),
                (LOAN_TYPE, Cell::label(loan_type)),
                (PEER_UNITS, Cell::Integer(peer_units)),
                (PEER_VOLUME, Cell::Integer(peer_volume)),
                (MY_UNITS, Cell::Integer(my_units)),
                (MY_VOLUME, Cell::Integer(my_volume)),
            ]);
        }
    }

    log::info!(
        "Generated {} production rows (seed {seed}, units {:?}, price {:?}, ratio {:?})",
        table.len(),
        bounds.units,
        bounds.price,
        bounds.ratio
    );
    Ok(table)
}
