//! Section catalogue and the one Selection → Filter → Classify → Project
//! pipeline every view goes through.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::data::classify::classify;
use crate::data::dimensions::{self, *};
use crate::data::filter::{aggregate, filter, AggOp, GroupBy};
use crate::data::model::{FactTable, MetricSeries, Selection, Unit};
use crate::data::projection::{project, ChartPoint, DisplayRule};
use crate::data::store::{get_table, TableName};
use crate::data::synthetic::{generate, MY_UNITS, MY_VOLUME, PEER_UNITS, PEER_VOLUME};
use crate::error::{DashError, DashResult};

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Summary,
    Production,
    Operations,
    Secondary,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Summary,
        Section::Production,
        Section::Operations,
        Section::Secondary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Summary => "Summary",
            Section::Production => "Production",
            Section::Operations => "Operations",
            Section::Secondary => "Secondary",
        }
    }

    pub fn from_name(name: &str) -> Option<Section> {
        Section::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn views(&self) -> Vec<ViewSpec> {
        match self {
            Section::Summary => summary_views(),
            Section::Production => production_views(),
            Section::Operations => operations_views(),
            Section::Secondary => secondary_views(),
        }
    }

    pub fn has_selector(&self, dimension: &str) -> bool {
        self.selectors().iter().any(|s| s.dimension == dimension)
    }

    /// Distinct selectors across the section's views, first occurrence wins.
    pub fn selectors(&self) -> Vec<Selector> {
        let mut out: Vec<Selector> = Vec::new();
        for view in self.views() {
            for sel in view.selectors {
                if !out.iter().any(|s| s.dimension == sel.dimension) {
                    out.push(sel);
                }
            }
        }
        out
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// View specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Dropdown,
    Radio,
}

/// A user control bound to one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    pub dimension: &'static str,
    pub control: Control,
}

impl Selector {
    pub const fn dropdown(dimension: &'static str) -> Self {
        Selector {
            dimension,
            control: Control::Dropdown,
        }
    }

    pub const fn radio(dimension: &'static str) -> Self {
        Selector {
            dimension,
            control: Control::Radio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    Literal(TableName),
    /// Seeded production table using the given section's bounds.
    Synthetic(Section),
}

/// Which measure column a series reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureRef {
    Fixed(&'static str),
    /// Chosen by the Units/Volume toggle.
    ByView {
        units: &'static str,
        volume: &'static str,
    },
}

impl MeasureRef {
    fn resolve(&self, selection: &Selection) -> &'static str {
        match *self {
            MeasureRef::Fixed(col) => col,
            MeasureRef::ByView { units, volume } => match selection.get(VIEW) {
                Some("Volume") => volume,
                _ => units,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSpec {
    pub name: &'static str,
    pub measure: MeasureRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Each remaining row read across these measure columns; one series per row.
    AcrossRow(&'static [&'static str]),
    /// Each series reads one measure along a dimension.
    Along {
        dimension: &'static str,
        series: Vec<SeriesSpec>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub caption: &'static str,
    pub source: TableSource,
    pub selectors: Vec<Selector>,
    /// Month → Quarter rollup applied after filtering.
    pub rollup: Option<AggOp>,
    pub shape: Shape,
    pub classify: bool,
    pub chart: ChartKind,
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

const MARGIN_MONTHS: &[&str] = &["January (bps)", "February (bps)"];

fn summary_views() -> Vec<ViewSpec> {
    vec![
        ViewSpec {
            id: "margin-by-product",
            title: "Gross Margin by Product Type",
            caption: "Are my margins in line with peers? Compare against percentile rankings.",
            source: TableSource::Literal(TableName::ProductMargins),
            selectors: vec![Selector::dropdown(PRODUCT)],
            rollup: None,
            shape: Shape::AcrossRow(MARGIN_MONTHS),
            classify: false,
            chart: ChartKind::Bar,
        },
        ViewSpec {
            id: "volume-change",
            title: "Application and Loan Volume - MoM % Change",
            caption: "How does this compare to others in my region and volume tier?",
            source: TableSource::Literal(TableName::VolumeChange),
            selectors: vec![],
            rollup: None,
            shape: Shape::Along {
                dimension: CATEGORY,
                series: vec![SeriesSpec {
                    name: "Percent Change",
                    measure: MeasureRef::Fixed("Percent Change"),
                }],
            },
            classify: false,
            chart: ChartKind::Bar,
        },
        ViewSpec {
            id: "margin-by-institution",
            title: "Gross Margin by Institution Type",
            caption: "Products above the institution's average margin are Strong, below are Weak.",
            source: TableSource::Literal(TableName::MarginsByInstitution),
            selectors: vec![Selector::dropdown(INSTITUTION_TYPE)],
            rollup: None,
            shape: Shape::Along {
                dimension: PRODUCT,
                series: vec![SeriesSpec {
                    name: "Margin",
                    measure: MeasureRef::Fixed("Margin (bps)"),
                }],
            },
            classify: true,
            chart: ChartKind::Bar,
        },
    ]
}

fn production_series() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec {
            name: "My Company",
            measure: MeasureRef::ByView {
                units: MY_UNITS,
                volume: MY_VOLUME,
            },
        },
        SeriesSpec {
            name: "Peer Group",
            measure: MeasureRef::ByView {
                units: PEER_UNITS,
                volume: PEER_VOLUME,
            },
        },
    ]
}

fn production_views() -> Vec<ViewSpec> {
    vec![
        ViewSpec {
            id: "production-monthly",
            title: "Monthly Loan Production",
            caption: "My Company against the Peer Group, by month.",
            source: TableSource::Synthetic(Section::Production),
            selectors: vec![Selector::dropdown(LOAN_TYPE), Selector::radio(VIEW)],
            rollup: None,
            shape: Shape::Along {
                dimension: MONTH,
                series: production_series(),
            },
            classify: false,
            chart: ChartKind::Bar,
        },
        ViewSpec {
            id: "production-quarterly",
            title: "Quarterly Loan Production",
            caption: "Monthly production summed by calendar quarter.",
            source: TableSource::Synthetic(Section::Production),
            selectors: vec![Selector::dropdown(LOAN_TYPE), Selector::radio(VIEW)],
            rollup: Some(AggOp::Sum),
            shape: Shape::Along {
                dimension: QUARTER,
                series: production_series(),
            },
            classify: false,
            chart: ChartKind::Bar,
        },
        ViewSpec {
            id: "pull-through",
            title: "Pull-Through by Loan Purpose",
            caption: "Share of initiated applications that funded, by quarter.",
            source: TableSource::Literal(TableName::PullThrough),
            selectors: vec![Selector::dropdown(LOAN_PURPOSE)],
            rollup: None,
            shape: Shape::Along {
                dimension: QUARTER,
                series: vec![SeriesSpec {
                    name: "Pull-Through",
                    measure: MeasureRef::Fixed("Pull-Through"),
                }],
            },
            classify: true,
            chart: ChartKind::Line,
        },
    ]
}

fn operations_views() -> Vec<ViewSpec> {
    vec![
        ViewSpec {
            id: "ctc-by-channel",
            title: "Clear-to-Close Days by Channel",
            caption: "Months slower than the channel's average turn-time are Strong, faster are Weak.",
            source: TableSource::Literal(TableName::CtcByChannel),
            selectors: vec![Selector::dropdown(CHANNEL)],
            rollup: None,
            shape: Shape::Along {
                dimension: MONTH,
                series: vec![SeriesSpec {
                    name: "CTC Days",
                    measure: MeasureRef::Fixed("CTC Days"),
                }],
            },
            classify: true,
            chart: ChartKind::Line,
        },
        ViewSpec {
            id: "ctc-quarterly",
            title: "Quarterly Clear-to-Close Days by Channel",
            caption: "The channel's monthly turn-times averaged by calendar quarter.",
            source: TableSource::Literal(TableName::CtcByChannel),
            selectors: vec![Selector::dropdown(CHANNEL)],
            rollup: Some(AggOp::Mean),
            shape: Shape::Along {
                dimension: QUARTER,
                series: vec![SeriesSpec {
                    name: "CTC Days",
                    measure: MeasureRef::Fixed("CTC Days"),
                }],
            },
            classify: true,
            chart: ChartKind::Line,
        },
        ViewSpec {
            id: "ctc-timeline",
            title: "Average Time from Application to Clear-to-Close",
            caption: "What is my average app to CTC turn-time?",
            source: TableSource::Literal(TableName::CtcTimeline),
            selectors: vec![],
            rollup: None,
            shape: Shape::Along {
                dimension: PERIOD,
                series: vec![SeriesSpec {
                    name: "Days",
                    measure: MeasureRef::Fixed("Days"),
                }],
            },
            classify: false,
            chart: ChartKind::Line,
        },
        ViewSpec {
            id: "salaries",
            title: "Base Salary by Role",
            caption: "Median base salary for operations and sales roles.",
            source: TableSource::Literal(TableName::Salaries),
            selectors: vec![Selector::dropdown(INSTITUTION_TYPE)],
            rollup: None,
            shape: Shape::Along {
                dimension: ROLE,
                series: vec![SeriesSpec {
                    name: "Base Salary",
                    measure: MeasureRef::Fixed("Base Salary"),
                }],
            },
            classify: false,
            chart: ChartKind::Bar,
        },
    ]
}

fn secondary_views() -> Vec<ViewSpec> {
    vec![
        ViewSpec {
            id: "sold-monthly",
            title: "Monthly Sold Loans",
            caption: "Loans sold to investors, My Company against the Peer Group.",
            source: TableSource::Synthetic(Section::Secondary),
            selectors: vec![Selector::dropdown(LOAN_TYPE), Selector::radio(VIEW)],
            rollup: None,
            shape: Shape::Along {
                dimension: MONTH,
                series: production_series(),
            },
            classify: false,
            chart: ChartKind::Bar,
        },
        ViewSpec {
            id: "sold-quarterly",
            title: "Quarterly Sold Loans",
            caption: "Sold loans summed by calendar quarter.",
            source: TableSource::Synthetic(Section::Secondary),
            selectors: vec![Selector::dropdown(LOAN_TYPE), Selector::radio(VIEW)],
            rollup: Some(AggOp::Sum),
            shape: Shape::Along {
                dimension: QUARTER,
                series: production_series(),
            },
            classify: false,
            chart: ChartKind::Bar,
        },
    ]
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// One named, projected series of a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSeries {
    pub name: String,
    pub baseline: Option<f64>,
    pub points: Vec<ChartPoint>,
}

/// Everything a renderer needs for one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedView {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub chart: ChartKind,
    pub unit: Unit,
    pub series: Vec<ProjectedSeries>,
    /// The filtered (and rolled up) rows behind the chart.
    pub table: FactTable,
}

#[derive(Debug, Clone)]
pub struct ViewOutcome {
    pub view: ViewSpec,
    pub result: DashResult<RenderedView>,
}

/// First domain value for every selector of the section.
pub fn default_selection(section: Section) -> Selection {
    let mut selection = Selection::new();
    for sel in section.selectors() {
        if let Some(first) = dimensions::domain(sel.dimension).and_then(|d| d.values.first().cloned()) {
            selection.set(sel.dimension, &first);
        }
    }
    selection
}

/// Strict check for selections built outside the UI controls: every entry
/// must name one of the section's selectors and a value from its domain.
pub fn check_selection(section: Section, selection: &Selection) -> DashResult<()> {
    for (dimension, value) in selection.iter() {
        if !section.has_selector(dimension) {
            return Err(DashError::UnknownDimension {
                section: section.name().to_string(),
                dimension: dimension.to_string(),
            });
        }
        check_domain(dimension, value)?;
    }
    Ok(())
}

fn check_domain(dimension: &str, value: &str) -> DashResult<()> {
    match dimensions::domain(dimension) {
        Some(dim) if dim.contains(value) => Ok(()),
        _ => Err(DashError::UnknownDimensionValue {
            dimension: dimension.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Fill missing selector values with their domain default and reject
/// values outside the declared domains.
fn resolve_selection(view: &ViewSpec, selection: &Selection) -> DashResult<Selection> {
    let mut resolved = Selection::new();
    for sel in &view.selectors {
        match selection.get(sel.dimension) {
            Some(value) => {
                check_domain(sel.dimension, value)?;
                resolved.set(sel.dimension, value);
            }
            None => {
                if let Some(first) = dimensions::domain(sel.dimension).and_then(|d| d.values.first().cloned()) {
                    log::debug!("view '{}': defaulting {} to '{first}'", view.id, sel.dimension);
                    resolved.set(sel.dimension, &first);
                }
            }
        }
    }
    Ok(resolved)
}

fn source_table(source: TableSource, config: &DashboardConfig) -> DashResult<FactTable> {
    match source {
        TableSource::Literal(name) => Ok(get_table(name)),
        TableSource::Synthetic(section) => {
            let bounds = match section {
                Section::Secondary => &config.secondary,
                _ => &config.production,
            };
            let mut table = generate(&LOAN_TYPES, &MONTHS, bounds, config.seed)?;
            if section == Section::Secondary {
                table.name = "Sold Loan Volume".to_string();
            }
            Ok(table)
        }
    }
}

fn shape_series(view: &ViewSpec, table: &FactTable, selection: &Selection) -> Vec<MetricSeries> {
    match &view.shape {
        Shape::AcrossRow(columns) => table
            .rows
            .iter()
            .map(|row| {
                let name = table
                    .dimensions
                    .first()
                    .and_then(|d| row.text(&d.name))
                    .unwrap_or(view.title);
                MetricSeries::across_row(name, table, row, columns)
            })
            .collect(),
        Shape::Along { dimension, series } => series
            .iter()
            .map(|spec| {
                MetricSeries::along(spec.name, table, dimension, spec.measure.resolve(selection))
            })
            .collect(),
    }
}

/// Run one view through filter → rollup → shape → classify → project.
///
/// A value outside a dimension's domain degrades to `EmptySelection`.
pub fn derive_view(
    view: &ViewSpec,
    selection: &Selection,
    config: &DashboardConfig,
) -> DashResult<RenderedView> {
    let selection = resolve_selection(view, selection).map_err(|e| {
        log::warn!("view '{}': {e}", view.id);
        DashError::EmptySelection
    })?;

    let table = source_table(view.source, config)?;
    let filter_dims: Vec<&str> = view
        .selectors
        .iter()
        .map(|s| s.dimension)
        .filter(|d| *d != VIEW)
        .collect();
    let mut table = filter(&table, &selection.only(&filter_dims));

    if let Some(op) = view.rollup {
        let measures: Vec<String> = table.measures.iter().map(|m| m.column.clone()).collect();
        let measures: Vec<&str> = measures.iter().map(String::as_str).collect();
        table = aggregate(&table, &GroupBy::quarter(), &measures, op)?;
    }

    if table.is_empty() {
        return Err(DashError::EmptySelection);
    }

    let shaped = shape_series(view, &table, &selection);
    if shaped.iter().all(MetricSeries::is_empty) {
        return Err(DashError::EmptySelection);
    }
    let unit = shaped.first().map(|s| s.unit).unwrap_or(Unit::Count);
    let rule = DisplayRule::for_unit(unit);

    let series = shaped
        .iter()
        .map(|s| {
            if view.classify {
                let classified = classify(s);
                ProjectedSeries {
                    name: s.name.clone(),
                    baseline: classified.baseline,
                    points: project(&classified, rule),
                }
            } else {
                ProjectedSeries {
                    name: s.name.clone(),
                    baseline: None,
                    points: project(s, rule),
                }
            }
        })
        .collect();

    log::debug!("view '{}' derived for {:?}", view.id, selection);
    Ok(RenderedView {
        id: view.id.to_string(),
        title: view.title.to_string(),
        caption: view.caption.to_string(),
        chart: view.chart,
        unit,
        series,
        table,
    })
}

/// Derive every view of a section. A failing view never stops the others.
pub fn derive_section(
    section: Section,
    selection: &Selection,
    config: &DashboardConfig,
) -> Vec<ViewOutcome> {
    section
        .views()
        .into_iter()
        .map(|view| {
            let result = derive_view(&view, selection, config);
            if let Err(e) = &result {
                if !e.is_placeholder() {
                    log::error!("view '{}' failed: {e}", view.id);
                }
            }
            ViewOutcome { view, result }
        })
        .collect()
}
