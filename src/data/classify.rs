use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{MetricSeries, SeriesPoint, Unit};

/// Half-width of the Neutral band around the series mean, in measure units.
pub const BASELINE_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Strong,
    Neutral,
    Weak,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Strong => "Strong",
            Classification::Neutral => "Neutral",
            Classification::Weak => "Weak",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPoint {
    pub category: String,
    pub value: f64,
    pub label: Classification,
}

/// A series annotated against its own mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSeries {
    pub name: String,
    pub unit: Unit,
    /// Mean of the classified values; `None` for an empty series.
    pub baseline: Option<f64>,
    pub points: Vec<ClassifiedPoint>,
}

impl ClassifiedSeries {
    /// The underlying values, without labels.
    pub fn series(&self) -> MetricSeries {
        MetricSeries {
            name: self.name.clone(),
            unit: self.unit,
            points: self
                .points
                .iter()
                .map(|p| SeriesPoint {
                    category: p.category.clone(),
                    value: p.value,
                })
                .collect(),
        }
    }
}

/// Label a single value against a baseline. The band edges are Neutral.
pub fn label_for(value: f64, baseline: f64) -> Classification {
    if value > baseline + BASELINE_TOLERANCE {
        Classification::Strong
    } else if value < baseline - BASELINE_TOLERANCE {
        Classification::Weak
    } else {
        Classification::Neutral
    }
}

/// Classify every point against the mean of exactly these points.
///
/// The baseline belongs to the series passed in: a filtered view gets its
/// own mean, so one value can be Strong in one view and Neutral in another.
pub fn classify(series: &MetricSeries) -> ClassifiedSeries {
    let baseline = if series.is_empty() {
        None
    } else {
        Some(series.values().iter().sum::<f64>() / series.len() as f64)
    };

    let points = match baseline {
        Some(mean) => series
            .points
            .iter()
            .map(|p| ClassifiedPoint {
                category: p.category.clone(),
                value: p.value,
                label: label_for(p.value, mean),
            })
            .collect(),
        None => Vec::new(),
    };

    ClassifiedSeries {
        name: series.name.clone(),
        unit: series.unit,
        baseline,
        points,
    }
}
