use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::synthetic::GeneratorBounds;
use crate::error::DashResult;

/// Environment variable holding an optional JSON config path.
pub const CONFIG_ENV: &str = "RUST_BENCH_CONFIG";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Generator settings. Every field has a default, so a config file only
/// needs the keys it overrides:
///
/// ```json
/// { "seed": 7, "secondary": { "units": [80, 130], "price": [250000, 500000], "ratio": [0.4, 0.8] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub seed: u64,
    /// Bounds for the Production section's table.
    pub production: GeneratorBounds,
    /// Bounds for the Secondary section's sold-loan table.
    pub secondary: GeneratorBounds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            production: GeneratorBounds::new((40, 120), (150_000, 450_000), (0.4, 0.7)),
            secondary: GeneratorBounds::new((80, 130), (250_000, 500_000), (0.4, 0.8)),
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `RUST_BENCH_CONFIG` if set, defaults otherwise.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> DashResult<()> {
        self.production.validate()?;
        self.secondary.validate()
    }
}
