use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::ChartKind;
use crate::data::loader::load_file;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – chart selector and parameters
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Charts");
    ui.separator();

    let mut chart = state.chart;
    for kind in ChartKind::ALL {
        ui.selectable_value(&mut chart, kind, kind.label());
    }
    state.set_chart(chart);

    ui.add_space(8.0);
    ui.heading("Parameters");
    ui.separator();

    if state.cleaned.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Edit a copy so the summary is rebuilt once per change.
    let mut config = state.config.clone();
    egui::Grid::new("parameters")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Top distances");
            ui.add(egui::DragValue::new(&mut config.top_k).range(1..=10));
            ui.end_row();

            ui.label("After year");
            ui.add(egui::DragValue::new(&mut config.after_year).range(1800..=2100));
            ui.end_row();

            ui.label("Focus distance");
            egui::ComboBox::from_id_salt("focus_distance")
                .selected_text(config.focus_distance.clone())
                .show_ui(ui, |ui: &mut Ui| {
                    for distance in &state.top.distances {
                        ui.selectable_value(
                            &mut config.focus_distance,
                            distance.clone(),
                            distance.as_str(),
                        );
                    }
                });
            ui.end_row();

            ui.label("Min. finishers / year");
            ui.add(egui::DragValue::new(&mut config.min_year_observations).range(0..=10_000));
            ui.end_row();

            ui.label("Ages");
            ui.horizontal(|ui: &mut Ui| {
                let max_age = config.max_age;
                ui.add(egui::DragValue::new(&mut config.min_age).range(0.0..=max_age));
                ui.label("to");
                let min_age = config.min_age;
                ui.add(egui::DragValue::new(&mut config.max_age).range(min_age..=150.0));
            });
            ui.end_row();
        });

    if ui.button("Reset").clicked() {
        config = Default::default();
    }
    state.set_config(config);

    ui.add_space(8.0);
    ui.separator();
    if let Some(cleaned) = &state.cleaned {
        ui.label(format!("{} usable results", cleaned.len()));
        ui.label(format!("{} rows dropped while cleaning", cleaned.dropped));
    }
    ui.label(format!("Distances: {}", state.top.distances.join(", ")));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source {
            ui.label(path.display().to_string());
            ui.separator();
            ui.label(format!("{} results in top distances", state.top.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open race results")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        let loaded = load_file(&path)
            .and_then(|table| Ok(state.set_dataset(path.clone(), &table)?));
        if let Err(e) = loaded {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
