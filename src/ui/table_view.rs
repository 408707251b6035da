use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::CellValue;
use crate::data::tag::CATEGORY;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Row table (central panel)
// ---------------------------------------------------------------------------

/// Render the rows selected by the current mask as a striped table.
/// Category cells are tinted with the category's colour.
pub fn table_view(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV to start tagging  (File → Open…)");
        });
        return;
    };

    let visible = state.visible_indices();
    let names = table.column_names();
    let columns: Vec<&[CellValue]> = names
        .iter()
        .filter_map(|name| table.column(name))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0).clip(true), names.len())
        .header(20.0, |mut header| {
            for name in names {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, visible.len(), |mut row| {
                let idx = visible[row.index()];
                for (name, col) in names.iter().zip(&columns) {
                    row.col(|ui: &mut Ui| {
                        let cell = &col[idx];
                        let label = cell.as_text();
                        if name.as_str() == CATEGORY && !label.trim().is_empty() {
                            if let Some(cm) = &state.color_map {
                                ui.label(
                                    RichText::new(label.as_ref())
                                        .color(cm.color_for(label.trim())),
                                );
                                return;
                            }
                        }
                        ui.label(label.as_ref());
                    });
                }
            });
        });
}
