use eframe::egui;

use crate::state::AppState;
use crate::ui::{freq_panel, panels, table_view};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TxnTaggerApp {
    pub state: AppState,
}

impl Default for TxnTaggerApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for TxnTaggerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: search & tagging ----
        egui::SidePanel::left("search_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: keyword discovery (toggleable) ----
        if self.state.show_keywords {
            egui::TopBottomPanel::bottom("keyword_panel")
                .default_height(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    freq_panel::freq_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: row table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table_view::table_view(ui, &self.state);
        });
    }
}
