use eframe::egui;

use crate::report::{RowRole, SummaryTable};
use crate::ui::chart_utils::panel_frame;

const HEADER_FILL: egui::Color32 = egui::Color32::from_rgb(0xf2, 0xf2, 0xf2);

pub fn render(ui: &mut egui::Ui, table: &SummaryTable) {
    panel_frame(ui, &table.title, |ui| {
        ui.add_space(12.0);
        egui::Grid::new("performance_summary")
            .striped(true)
            .min_col_width(90.0)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for header in &table.headers {
                    egui::Frame::none()
                        .fill(HEADER_FILL)
                        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(header)
                                    .strong()
                                    .size(12.0)
                                    .color(egui::Color32::from_gray(30)),
                            );
                        });
                }
                ui.end_row();

                for row in &table.rows {
                    ui.label(&row.symbol);
                    match row.role {
                        RowRole::Constituent => ui.label(&row.display_name),
                        RowRole::Index => ui.label(egui::RichText::new(&row.display_name).italics()),
                    };
                    let color = match row.annualized_return {
                        Some(r) if r >= 0.0 => egui::Color32::from_rgb(50, 180, 50),
                        Some(_) => egui::Color32::from_rgb(220, 50, 50),
                        None => egui::Color32::from_gray(140),
                    };
                    ui.colored_label(color, row.formatted_return());
                    ui.end_row();
                }
            });
    });
}
