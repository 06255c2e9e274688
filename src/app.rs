use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct UltraTrendsApp {
    pub state: AppState,
}

impl UltraTrendsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for UltraTrendsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: chart selector and parameters ----
        egui::SidePanel::left("chart_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: summary table ----
        egui::TopBottomPanel::bottom("summary_panel")
            .default_height(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::summary_table(ui, &self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_plot(ui, &self.state);
        });
    }
}
