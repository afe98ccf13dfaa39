/// Shared chart utilities for the report panels.

use eframe::egui;
use egui_plot::{PlotPoint, PlotTransform};

pub const BAR_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 179, 179);
pub const BENCHMARK_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 40, 40);
pub const AVERAGE_COLOR: egui::Color32 = egui::Color32::from_rgb(30, 160, 60);
pub const PORTFOLIO_COLOR: egui::Color32 = egui::Color32::from_rgb(40, 80, 230);

/// Vertical room reserved under a bar chart for the rotated category labels.
pub const CATEGORY_LABEL_HEIGHT: f32 = 42.0;

/// Framed cell holding one panel, with its title on top.
pub fn panel_frame(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(80, 120, 200, 10))
        .inner_margin(egui::Margin::symmetric(8.0, 6.0))
        .rounding(egui::Rounding::same(4.0))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.strong(title);
            });
            ui.add_space(4.0);
            add_contents(ui);
        });
}

/// Paint category labels under the plot frame, rotated 45° like tick labels.
pub fn paint_category_labels(ui: &egui::Ui, transform: &PlotTransform, labels: &[(f64, &str)]) {
    let painter = ui.painter();
    let color = ui.visuals().text_color();
    let top = transform.frame().bottom() + 4.0;

    for (x, label) in labels {
        let anchor = transform.position_from_point(&PlotPoint::new(*x, 0.0));
        let galley =
            painter.layout_no_wrap(label.to_string(), egui::FontId::proportional(11.0), color);
        let pos = egui::pos2(anchor.x - 4.0, top);
        painter.add(
            egui::epaint::TextShape::new(pos, galley, color)
                .with_angle(std::f32::consts::FRAC_PI_4),
        );
    }
}

/// Integer years on the x axis, nothing in between.
pub fn year_tick_label(value: f64) -> String {
    if (value - value.round()).abs() < 1e-6 {
        format!("{}", value.round() as i64)
    } else {
        String::new()
    }
}

pub fn format_pct(value: f64) -> String {
    format!("{:.1}%", value)
}
