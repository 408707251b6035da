use eframe::egui::{self, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Keyword discovery panel (bottom)
// ---------------------------------------------------------------------------

/// Render the keyword-frequency panel: analysis column, top-k and
/// minimum-length controls, the ranked list and a bar chart of counts.
/// The analysis runs over the entire column, not just untagged rows.
pub fn freq_panel(ui: &mut Ui, state: &mut AppState) {
    let text_cols = match &state.table {
        Some(table) => table.text_columns(),
        None => {
            ui.label("No file loaded.");
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Discover top keywords");
        egui::ComboBox::from_id_salt("freq_col")
            .selected_text(state.freq_column.clone())
            .show_ui(ui, |ui: &mut Ui| {
                for col in &text_cols {
                    if ui
                        .selectable_label(state.freq_column == *col, col)
                        .clicked()
                    {
                        state.freq_column = col.clone();
                    }
                }
            });
        ui.add(
            egui::Slider::new(&mut state.freq_top_k, 10..=100)
                .step_by(10.0)
                .text("keywords"),
        );
        ui.add(egui::Slider::new(&mut state.freq_min_len, 1..=5).text("min length"));
    });
    ui.separator();

    let rows = state.keyword_frequencies();
    if rows.is_empty() {
        ui.label("No keywords in this column.");
        return;
    }

    let chart_name = state.freq_column.clone();
    ui.columns(2, |columns: &mut [Ui]| {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(&mut columns[0], |ui: &mut Ui| {
                egui::Grid::new("freq_grid")
                    .striped(true)
                    .num_columns(3)
                    .show(ui, |ui: &mut Ui| {
                        ui.strong("keyword");
                        ui.strong("count");
                        ui.strong("share");
                        ui.end_row();
                        for row in &rows {
                            ui.label(&row.keyword);
                            ui.label(row.count.to_string());
                            ui.label(format!("{:.1}%", row.share * 100.0));
                            ui.end_row();
                        }
                    });
            });

        let bars: Vec<Bar> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| Bar::new(i as f64, r.count as f64).name(&r.keyword))
            .collect();
        Plot::new("keyword_plot")
            .allow_drag(false)
            .allow_scroll(false)
            .show(&mut columns[1], |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&chart_name));
            });
    });
}
