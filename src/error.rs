use thiserror::Error;

// ---------------------------------------------------------------------------
// Library error taxonomy
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The selection matched no rows. Renderers show a placeholder.
    #[error("No data for the current selection")]
    EmptySelection,

    #[error("'{value}' is not a value of dimension '{dimension}'")]
    UnknownDimensionValue { dimension: String, value: String },

    #[error("section '{section}' has no '{dimension}' selector")]
    UnknownDimension { section: String, dimension: String },
}

impl DashError {
    /// Whether the UI should draw an empty chart instead of an error banner.
    pub fn is_placeholder(&self) -> bool {
        matches!(
            self,
            DashError::EmptySelection | DashError::UnknownDimensionValue { .. }
        )
    }
}

pub type DashResult<T> = Result<T, DashError>;
