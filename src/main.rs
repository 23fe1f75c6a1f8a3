use eframe::egui;
use rusty_bench::app::RustyBenchApp;
use rusty_bench::config::DashboardConfig;
use rusty_bench::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let state = match DashboardConfig::from_env() {
        Ok(config) => AppState::new(config),
        Err(e) => {
            log::error!("Failed to load config: {e:#}");
            let mut state = AppState::default();
            state.status_message = Some(format!("Config error, using defaults: {e:#}"));
            state
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Bench – Mortgage Benchmarks",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyBenchApp::new(state)))),
    )
}
