use std::collections::HashMap;

use crate::config::DashboardConfig;
use crate::data::model::Selection;
use crate::pipeline::{default_selection, derive_section, Section, ViewOutcome};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Only the user's choices
/// live here; every chart is re-derived from them on each frame.
pub struct AppState {
    /// Section shown in the central panel.
    pub section: Section,

    /// Current selection per section, so switching back keeps the choices.
    pub selections: HashMap<Section, Selection>,

    /// Generator settings.
    pub config: DashboardConfig,

    /// Whether each chart shows its underlying rows.
    pub show_tables: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let selections = Section::ALL
            .into_iter()
            .map(|s| (s, default_selection(s)))
            .collect();
        Self {
            section: Section::Summary,
            selections,
            config,
            show_tables: false,
            status_message: None,
        }
    }

    /// Selection of the current section.
    pub fn selection(&self) -> Selection {
        self.selections
            .get(&self.section)
            .cloned()
            .unwrap_or_else(|| default_selection(self.section))
    }

    pub fn set_section(&mut self, section: Section) {
        log::debug!("section -> {section}");
        self.section = section;
    }

    /// Change one dimension of the current section's selection.
    pub fn select(&mut self, dimension: &str, value: &str) {
        log::debug!("{}: {dimension} = {value}", self.section);
        self.selections
            .entry(self.section)
            .or_insert_with(|| default_selection(self.section))
            .set(dimension, value);
    }

    /// Restore the current section's default selection.
    pub fn reset_selection(&mut self) {
        self.selections
            .insert(self.section, default_selection(self.section));
    }

    /// Derive every view of the current section from the current selection.
    pub fn derive(&self) -> Vec<ViewOutcome> {
        derive_section(self.section, &self.selection(), &self.config)
    }
}
