pub mod chart_utils;
pub mod summary_table;
pub mod trend_panel;
pub mod year_panel;

use eframe::egui;

use crate::config::{CELL_HEIGHT, CELL_WIDTH};
use crate::report::layout::Panel;
use crate::report::Report;

/// Draw the report grid row by row. Hidden cells draw nothing.
pub fn render_grid(ui: &mut egui::Ui, report: &Report) {
    let cell = egui::vec2(CELL_WIDTH, CELL_HEIGHT);

    for row in 0..report.layout.rows {
        ui.horizontal_top(|ui| {
            for panel in report.layout.row(row) {
                if !panel.is_visible() {
                    continue;
                }
                ui.allocate_ui(cell, |ui| {
                    ui.set_min_size(cell);
                    ui.vertical(|ui| match panel {
                        Panel::Year(i) => {
                            if let Some(year) = report.years.get(*i) {
                                year_panel::render(ui, year, CELL_HEIGHT);
                            }
                        }
                        Panel::Trend => trend_panel::render(ui, &report.trend, CELL_HEIGHT),
                        Panel::Summary => summary_table::render(ui, &report.summary),
                        Panel::Hidden => {}
                    });
                });
            }
        });
        ui.add_space(8.0);
    }
}
