use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::ingest;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – search & tagging controls
// ---------------------------------------------------------------------------

/// Render the left panel: keyword search over untagged rows, tag inputs,
/// and the legend of categories assigned so far.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter unassigned rows");
    ui.separator();

    // Clone the column list so we can mutate state inside the closures.
    let text_cols = match &state.table {
        Some(table) => table.text_columns(),
        None => {
            ui.label("No file loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Column to search");
            egui::ComboBox::from_id_salt("search_col")
                .selected_text(state.search_column.clone())
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &text_cols {
                        if ui
                            .selectable_label(state.search_column == *col, col)
                            .clicked()
                        {
                            state.search_column = col.clone();
                        }
                    }
                });
            ui.add(
                egui::TextEdit::singleline(&mut state.keyword)
                    .hint_text("keyword (case-insensitive)"),
            );
            if ui.button("Search / Refresh").clicked() {
                state.run_search();
            }
            ui.separator();

            ui.strong("Apply tag to all visible rows");
            ui.add(egui::TextEdit::singleline(&mut state.category).hint_text("Private"));
            ui.add(egui::TextEdit::singleline(&mut state.subcategory).hint_text("entertainment"));
            if ui.button("Tag rows").clicked() {
                state.tag_visible();
            }
            ui.separator();

            let legend = state
                .color_map
                .as_ref()
                .map(|cm| cm.legend_entries())
                .unwrap_or_default();
            if !legend.is_empty() {
                egui::CollapsingHeader::new(RichText::new("Assigned categories").strong())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        for (category, color) in legend {
                            ui.label(RichText::new(category).color(color));
                        }
                    });
            }
        });
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
            if ui
                .add_enabled(state.table.is_some(), egui::Button::new("Export…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} rows loaded, {} untagged shown",
                table.n_rows(),
                state.visible_count()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_keywords, "Keyword discovery")
            .clicked()
        {
            state.show_keywords = !state.show_keywords;
        }

        if let Some(msg) = &state.status_message {
            ui.label(msg);
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open transaction export")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        let parsed = std::fs::read(&path)
            .map_err(anyhow::Error::from)
            .and_then(|raw| ingest::ingest(&raw).map_err(Into::into));
        match parsed {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.n_rows(),
                    table.column_names()
                );
                let n_rows = table.n_rows();
                state.set_table(table);
                state.status_message = Some(format!("Loaded {n_rows} rows"));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export tagged CSV")
        .set_file_name("transactions_tagged.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let written = state
            .export_csv()
            .and_then(|bytes| std::fs::write(&path, bytes).map_err(Into::into));
        match written {
            Ok(()) => {
                log::info!("Exported tagged table to {}", path.display());
                state.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
