//! export-series: run the dashboard pipeline headless and write the
//! chart-ready series.
//!
//! Usage:
//!   export-series --section production --select "Loan Type=VA" --select View=Volume
//!   export-series --section all --format csv --out series.csv

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rusty_bench::config::DashboardConfig;
use rusty_bench::pipeline::{
    check_selection, default_selection, derive_section, ProjectedSeries, Section,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "export-series")]
#[command(about = "Write the chart-ready series of dashboard sections as JSON or CSV")]
struct Cli {
    /// Section to export
    #[arg(long, value_enum, default_value = "summary")]
    section: SectionArg,

    /// Selector override as DIM=VALUE, e.g. "Loan Type=VA" (repeatable)
    #[arg(long = "select", value_name = "DIM=VALUE", value_parser = parse_select)]
    selects: Vec<(String, String)>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// JSON config file (default: $RUST_BENCH_CONFIG, then built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SectionArg {
    All,
    Summary,
    Production,
    Operations,
    Secondary,
}

impl SectionArg {
    fn sections(self) -> Vec<Section> {
        match self {
            SectionArg::All => Section::ALL.to_vec(),
            SectionArg::Summary => vec![Section::Summary],
            SectionArg::Production => vec![Section::Production],
            SectionArg::Operations => vec![Section::Operations],
            SectionArg::Secondary => vec![Section::Secondary],
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Serialize)]
struct ExportedView {
    section: String,
    view: String,
    title: String,
    error: Option<String>,
    series: Vec<ProjectedSeries>,
}

#[derive(Serialize)]
struct ExportRow<'a> {
    section: &'a str,
    view: &'a str,
    series: &'a str,
    label: &'a str,
    value: f64,
    display: &'a str,
    category: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::from_env()?,
    };

    let sections = cli.section.sections();
    for (dim, _) in &cli.selects {
        if !sections.iter().any(|s| s.has_selector(dim)) {
            let names: Vec<&str> = sections.iter().map(|s| s.name()).collect();
            bail!("No selector '{dim}' in {}", names.join(", "));
        }
    }

    let mut exported = Vec::new();
    for section in sections {
        let mut selection = default_selection(section);
        for (dim, value) in &cli.selects {
            if section.has_selector(dim) {
                selection.set(dim, value);
            }
        }
        check_selection(section, &selection)
            .with_context(|| format!("invalid selection for {section}"))?;
        log::info!("Exporting {section} with {selection:?}");

        for outcome in derive_section(section, &selection, &config) {
            let (error, series) = match outcome.result {
                Ok(view) => (None, view.series),
                Err(e) => (Some(e.to_string()), Vec::new()),
            };
            exported.push(ExportedView {
                section: section.name().to_string(),
                view: outcome.view.id.to_string(),
                title: outcome.view.title.to_string(),
                error,
                series,
            });
        }
    }

    let out: Box<dyn Write> = match &cli.out {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    match cli.format {
        OutputFormat::Json => write_json(out, &exported),
        OutputFormat::Csv => write_csv(out, &exported),
    }
}

fn write_json(mut out: Box<dyn Write>, views: &[ExportedView]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, views).context("writing JSON")?;
    writeln!(out)?;
    Ok(())
}

fn write_csv(out: Box<dyn Write>, views: &[ExportedView]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for view in views {
        for series in &view.series {
            for point in &series.points {
                writer
                    .serialize(ExportRow {
                        section: &view.section,
                        view: &view.view,
                        series: &series.name,
                        label: &point.label,
                        value: point.value,
                        display: &point.display_text,
                        category: point.category.map(|c| c.to_string()).unwrap_or_default(),
                    })
                    .context("writing CSV row")?;
            }
        }
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn parse_select(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((dim, value)) => Ok((dim.trim().to_string(), value.trim().to_string())),
        None => Err(format!("expected DIM=VALUE, got '{arg}'")),
    }
}
