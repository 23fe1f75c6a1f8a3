use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::dimensions;
use crate::pipeline::{Control, Section};
use crate::state::AppState;

const REPORT_TITLE: &str = "Benchmark Summary";
/// Month the benchmark figures were published for.
const REPORT_PERIOD: &str = "March 2025";

// ---------------------------------------------------------------------------
// Left side panel – section and filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Section");
    ui.separator();

    let mut section = state.section;
    for s in Section::ALL {
        ui.radio_value(&mut section, s, s.name());
    }
    if section != state.section {
        state.set_section(section);
    }

    ui.add_space(8.0);
    ui.heading("Filters");
    ui.separator();

    let selection = state.selection();
    let selectors = state.section.selectors();
    if selectors.is_empty() {
        ui.label("No filters for this section.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for sel in &selectors {
                let Some(domain) = dimensions::domain(sel.dimension) else {
                    continue;
                };
                let current = selection.get(sel.dimension).unwrap_or_default().to_string();
                let mut chosen = current.clone();

                ui.strong(sel.dimension);
                match sel.control {
                    Control::Dropdown => {
                        egui::ComboBox::from_id_salt(sel.dimension)
                            .selected_text(&current)
                            .show_ui(ui, |ui: &mut Ui| {
                                for value in &domain.values {
                                    ui.selectable_value(&mut chosen, value.clone(), value);
                                }
                            });
                    }
                    Control::Radio => {
                        ui.horizontal(|ui: &mut Ui| {
                            for value in &domain.values {
                                ui.radio_value(&mut chosen, value.clone(), value);
                            }
                        });
                    }
                }
                ui.add_space(4.0);

                if chosen != current {
                    state.select(sel.dimension, &chosen);
                }
            }

            ui.separator();
            if ui.small_button("Reset filters").clicked() {
                state.reset_selection();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new(REPORT_TITLE).strong());
        ui.label(RichText::new(report_period_label()).weak());
        ui.separator();
        ui.label(format!("{} · seed {}", state.section, state.config.seed));
        ui.separator();

        if ui
            .selectable_label(state.show_tables, "Show data")
            .clicked()
        {
            state.show_tables = !state.show_tables;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn report_period_label() -> String {
    format!("Report period: {REPORT_PERIOD}")
}
