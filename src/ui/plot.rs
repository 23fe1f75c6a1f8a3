use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::{classification_color, SeriesColors};
use crate::data::model::FactTable;
use crate::pipeline::{ChartKind, RenderedView};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Section charts (central panel)
// ---------------------------------------------------------------------------

/// Render every view of the current section in the central panel.
pub fn section_charts(ui: &mut Ui, state: &AppState) {
    let outcomes = state.derive();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for outcome in &outcomes {
                ui.heading(outcome.view.title);
                match &outcome.result {
                    Ok(view) => {
                        chart(ui, view);
                        if state.show_tables {
                            ui.push_id(view.id.as_str(), |ui: &mut Ui| {
                                egui::CollapsingHeader::new("Data")
                                    .default_open(true)
                                    .show(ui, |ui: &mut Ui| data_table(ui, &view.table));
                            });
                        }
                    }
                    Err(e) if e.is_placeholder() => {
                        ui.add_space(24.0);
                        ui.vertical_centered(|ui: &mut Ui| {
                            ui.label(RichText::new(e.to_string()).italics());
                        });
                        ui.add_space(24.0);
                    }
                    Err(e) => {
                        ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
                    }
                }
                ui.label(RichText::new(outcome.view.caption).weak());
                ui.separator();
            }
        });
}

/// Draw one view as a bar or line chart with its display texts.
fn chart(ui: &mut Ui, view: &RenderedView) {
    let axis_labels: Vec<String> = view
        .series
        .first()
        .map(|s| s.points.iter().map(|p| p.label.clone()).collect())
        .unwrap_or_default();
    let colors = SeriesColors::new(view.series.iter().map(|s| s.name.as_str()));
    let n_series = view.series.len().max(1) as f64;
    let bar_width = 0.8 / n_series;
    let chart_kind = view.chart;

    Plot::new(view.id.as_str())
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label(view.unit.axis_label())
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            axis_labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (si, series) in view.series.iter().enumerate() {
                let color = colors.color_for(&series.name);
                let offset = match chart_kind {
                    ChartKind::Bar => (si as f64 - (n_series - 1.0) / 2.0) * bar_width,
                    ChartKind::Line => 0.0,
                };

                match chart_kind {
                    ChartKind::Bar => {
                        let bars: Vec<Bar> = series
                            .points
                            .iter()
                            .enumerate()
                            .map(|(i, p)| {
                                let fill = p.category.map(classification_color).unwrap_or(color);
                                Bar::new(i as f64 + offset, p.value)
                                    .width(bar_width * 0.9)
                                    .name(&p.label)
                                    .fill(fill)
                            })
                            .collect();
                        plot_ui.bar_chart(BarChart::new(bars).name(&series.name).color(color));
                    }
                    ChartKind::Line => {
                        let points: PlotPoints = series
                            .points
                            .iter()
                            .enumerate()
                            .map(|(i, p)| [i as f64, p.value])
                            .collect();
                        plot_ui.line(Line::new(points).name(&series.name).color(color).width(2.0));

                        for (i, p) in series.points.iter().enumerate() {
                            if let Some(label) = p.category {
                                plot_ui.points(
                                    Points::new(vec![[i as f64, p.value]])
                                        .radius(4.0)
                                        .color(classification_color(label)),
                                );
                            }
                        }
                    }
                }

                for (i, p) in series.points.iter().enumerate() {
                    plot_ui.text(Text::new(
                        PlotPoint::new(i as f64 + offset, p.value),
                        RichText::new(&p.display_text).small(),
                    ));
                }

                if let Some(baseline) = series.baseline {
                    let last = series.points.len().saturating_sub(1) as f64;
                    plot_ui.line(
                        Line::new(PlotPoints::from(vec![[-0.5, baseline], [last + 0.5, baseline]]))
                            .name(format!("{} average", series.name))
                            .color(Color32::GRAY)
                            .style(egui_plot::LineStyle::dashed_loose()),
                    );
                }
            }
        });
}

/// Plain grid of the rows behind a chart.
fn data_table(ui: &mut Ui, table: &FactTable) {
    let columns = table.column_names();
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().at_least(80.0), columns.len())
        .header(20.0, |mut header| {
            for col in &columns {
                header.col(|ui| {
                    ui.strong(*col);
                });
            }
        })
        .body(|mut body| {
            for row in &table.rows {
                body.row(18.0, |mut r| {
                    for col in &columns {
                        r.col(|ui| {
                            let text = row.get(col).map(|c| c.to_string()).unwrap_or_default();
                            ui.label(text);
                        });
                    }
                });
            }
        });
}
