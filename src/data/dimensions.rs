//! Declared dimension domains. Order here is the order on chart axes.

use super::model::Dimension;

pub const PRODUCT: &str = "Product";
pub const MONTH: &str = "Month";
pub const PERIOD: &str = "Period";
pub const QUARTER: &str = "Quarter";
pub const CHANNEL: &str = "Channel";
pub const LOAN_TYPE: &str = "Loan Type";
pub const LOAN_PURPOSE: &str = "Loan Purpose";
pub const INSTITUTION_TYPE: &str = "Institution Type";
pub const ROLE: &str = "Role";
pub const CATEGORY: &str = "Category";
pub const VIEW: &str = "View";

pub const PRODUCTS: [&str; 4] = ["Conventional", "Government", "Jumbo", "Other"];

pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Trailing thirteen reporting periods of the turn-time chart.
pub const PERIODS: [&str; 13] = [
    "Feb '24", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec", "Jan '25",
    "Feb '25",
];

pub const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];
pub const CHANNELS: [&str; 3] = ["Retail", "Wholesale", "Correspondent"];
pub const LOAN_TYPES: [&str; 4] = ["Conventional", "FHA", "VA", "Jumbo"];
pub const LOAN_PURPOSES: [&str; 3] = ["Purchase", "Rate/Term Refinance", "Cash-Out Refinance"];
pub const INSTITUTION_TYPES: [&str; 3] = ["IMB", "Bank", "Credit Union"];
pub const ROLES: [&str; 4] = ["Loan Officer", "Processor", "Underwriter", "Closer"];
pub const CATEGORIES: [&str; 2] = ["Application Volume", "Sold Loan Volume"];
pub const VIEWS: [&str; 2] = ["Units", "Volume"];

/// Look up the declared domain of a dimension by name.
pub fn domain(name: &str) -> Option<Dimension> {
    let values: &[&str] = match name {
        PRODUCT => &PRODUCTS,
        MONTH => &MONTHS,
        PERIOD => &PERIODS,
        QUARTER => &QUARTERS,
        CHANNEL => &CHANNELS,
        LOAN_TYPE => &LOAN_TYPES,
        LOAN_PURPOSE => &LOAN_PURPOSES,
        INSTITUTION_TYPE => &INSTITUTION_TYPES,
        ROLE => &ROLES,
        CATEGORY => &CATEGORIES,
        VIEW => &VIEWS,
        _ => return None,
    };
    Some(Dimension::new(name, values))
}

/// Calendar quarter of a full month name.
pub fn month_to_quarter(month: &str) -> Option<&'static str> {
    let idx = MONTHS.iter().position(|m| *m == month)?;
    QUARTERS.get(idx / 3).copied()
}
