use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use eframe::egui;

use ultra_trends::app::UltraTrendsApp;
use ultra_trends::config::DEFAULT_DATA_PATH;
use ultra_trends::data::loader::load_file;
use ultra_trends::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    // The raw table is only needed until it is cleaned.
    let state = {
        let path = PathBuf::from(DEFAULT_DATA_PATH);
        let table = load_file(&path).with_context(|| format!("loading {}", path.display()))?;
        let mut state = AppState::default();
        state.set_dataset(path, &table)?;
        state
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ultra Trends – Race Results Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(UltraTrendsApp::new(state)))),
    )
    .map_err(|e| anyhow!("running viewer: {e}"))
}
