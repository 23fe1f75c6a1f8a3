use super::dimensions::*;
use super::model::{Cell, Dimension, FactTable, Measure, Unit};

// ---------------------------------------------------------------------------
// Fact table store
// ---------------------------------------------------------------------------

/// Names of the literal benchmark tables. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    ProductMargins,
    VolumeChange,
    CtcTimeline,
    CtcByChannel,
    MarginsByInstitution,
    Salaries,
    PullThrough,
}

impl TableName {
    pub const ALL: [TableName; 7] = [
        TableName::ProductMargins,
        TableName::VolumeChange,
        TableName::CtcTimeline,
        TableName::CtcByChannel,
        TableName::MarginsByInstitution,
        TableName::Salaries,
        TableName::PullThrough,
    ];
}

/// Build a literal table. Tables are rebuilt on every call; callers never
/// share or mutate them.
pub fn get_table(name: TableName) -> FactTable {
    match name {
        TableName::ProductMargins => product_margins(),
        TableName::VolumeChange => volume_change(),
        TableName::CtcTimeline => ctc_timeline(),
        TableName::CtcByChannel => ctc_by_channel(),
        TableName::MarginsByInstitution => margins_by_institution(),
        TableName::Salaries => salaries(),
        TableName::PullThrough => pull_through(),
    }
}

fn product_margins() -> FactTable {
    let data: [(&str, i64, i64); 4] = [
        ("Conventional", 208, 230),
        ("Government", 234, 275),
        ("Jumbo", 164, 204),
        ("Other", 230, 214),
    ];
    let mut table = FactTable::new(
        "Product Margins",
        vec![Dimension::new(PRODUCT, &PRODUCTS)],
        vec![
            Measure::new("January (bps)", "January", Unit::BasisPoints),
            Measure::new("February (bps)", "February", Unit::BasisPoints),
        ],
    );
    for (product, jan, feb) in data {
        table = table.row(vec![
            (PRODUCT, Cell::label(product)),
            ("January (bps)", Cell::Integer(jan)),
            ("February (bps)", Cell::Integer(feb)),
        ]);
    }
    table
}

fn volume_change() -> FactTable {
    FactTable::new(
        "Volume Change",
        vec![Dimension::new(CATEGORY, &CATEGORIES)],
        vec![Measure::new("Percent Change", "MoM Change", Unit::Percent)],
    )
    .row(vec![
        (CATEGORY, Cell::label("Application Volume")),
        ("Percent Change", Cell::Integer(6)),
    ])
    .row(vec![
        (CATEGORY, Cell::label("Sold Loan Volume")),
        ("Percent Change", Cell::Integer(7)),
    ])
}

fn ctc_timeline() -> FactTable {
    let days: [i64; 13] = [33, 31, 33, 33, 36, 36, 34, 34, 34, 34, 34, 37, 34];
    let mut table = FactTable::new(
        "App to CTC Timeline",
        vec![Dimension::new(PERIOD, &PERIODS)],
        vec![Measure::new("Days", "Days", Unit::Days)],
    );
    for (period, d) in PERIODS.iter().zip(days) {
        table = table.row(vec![(PERIOD, Cell::period(period)), ("Days", Cell::Integer(d))]);
    }
    table
}

fn ctc_by_channel() -> FactTable {
    let series: [(&str, [i64; 12]); 3] = [
        ("Retail", [34, 33, 32, 31, 34, 35, 36, 37, 36, 34, 33, 32]),
        ("Wholesale", [29, 28, 28, 27, 29, 30, 31, 32, 31, 30, 29, 28]),
        ("Correspondent", [24, 24, 23, 22, 24, 25, 26, 27, 26, 25, 24, 23]),
    ];
    let mut table = FactTable::new(
        "CTC Days by Channel",
        vec![
            Dimension::new(CHANNEL, &CHANNELS),
            Dimension::new(MONTH, &MONTHS),
        ],
        vec![Measure::new("CTC Days", "CTC Days", Unit::Days)],
    );
    for (channel, days) in series {
        for (month, d) in MONTHS.iter().zip(days) {
            table = table.row(vec![
                (CHANNEL, Cell::label(channel)),
                (MONTH, Cell::period(month)),
                ("CTC Days", Cell::Integer(d)),
            ]);
        }
    }
    table
}

fn margins_by_institution() -> FactTable {
    let data: [(&str, [i64; 4]); 3] = [
        ("IMB", [215, 248, 171, 222]),
        ("Bank", [182, 205, 139, 196]),
        ("Credit Union", [164, 188, 126, 175]),
    ];
    let mut table = FactTable::new(
        "Margins by Institution Type",
        vec![
            Dimension::new(INSTITUTION_TYPE, &INSTITUTION_TYPES),
            Dimension::new(PRODUCT, &PRODUCTS),
        ],
        vec![Measure::new("Margin (bps)", "Margin", Unit::BasisPoints)],
    );
    for (institution, margins) in data {
        for (product, m) in PRODUCTS.iter().zip(margins) {
            table = table.row(vec![
                (INSTITUTION_TYPE, Cell::label(institution)),
                (PRODUCT, Cell::label(product)),
                ("Margin (bps)", Cell::Integer(m)),
            ]);
        }
    }
    table
}

fn salaries() -> FactTable {
    let data: [(&str, [i64; 4]); 3] = [
        ("IMB", [98_000, 58_000, 82_000, 54_000]),
        ("Bank", [91_000, 55_000, 79_000, 52_000]),
        ("Credit Union", [84_000, 51_000, 74_000, 49_000]),
    ];
    let mut table = FactTable::new(
        "Salaries",
        vec![
            Dimension::new(INSTITUTION_TYPE, &INSTITUTION_TYPES),
            Dimension::new(ROLE, &ROLES),
        ],
        vec![Measure::new("Base Salary", "Base Salary", Unit::Dollars)],
    );
    for (institution, pay) in data {
        for (role, p) in ROLES.iter().zip(pay) {
            table = table.row(vec![
                (INSTITUTION_TYPE, Cell::label(institution)),
                (ROLE, Cell::label(role)),
                ("Base Salary", Cell::Integer(p)),
            ]);
        }
    }
    table
}

fn pull_through() -> FactTable {
    let data: [(&str, [f64; 4]); 3] = [
        ("Purchase", [78.4, 81.2, 83.0, 79.6]),
        ("Rate/Term Refinance", [66.1, 70.3, 72.5, 68.9]),
        ("Cash-Out Refinance", [71.0, 73.4, 75.2, 72.1]),
    ];
    let mut table = FactTable::new(
        "Pull-Through by Loan Purpose",
        vec![
            Dimension::new(LOAN_PURPOSE, &LOAN_PURPOSES),
            Dimension::new(QUARTER, &QUARTERS),
        ],
        vec![Measure::new("Pull-Through", "Pull-Through", Unit::Percent)],
    );
    for (purpose, rates) in data {
        for (quarter, r) in QUARTERS.iter().zip(rates) {
            table = table.row(vec![
                (LOAN_PURPOSE, Cell::label(purpose)),
                (QUARTER, Cell::period(quarter)),
                ("Pull-Through", Cell::Float(r)),
            ]);
        }
    }
    table
}
