use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::report::TrendPanel;
use crate::ui::chart_utils::{
    format_pct, panel_frame, year_tick_label, BENCHMARK_COLOR, PORTFOLIO_COLOR,
};

/// Year-over-year constituent average versus benchmark, one marker per year.
pub fn render(ui: &mut egui::Ui, panel: &TrendPanel, height: f32) {
    panel_frame(ui, &panel.title, |ui| {
        let portfolio: Vec<[f64; 2]> = panel
            .points
            .iter()
            .filter_map(|p| p.portfolio.map(|v| [p.year as f64, v]))
            .collect();
        let benchmark: Vec<[f64; 2]> = panel
            .points
            .iter()
            .filter_map(|p| p.benchmark.map(|v| [p.year as f64, v]))
            .collect();

        let first_year = panel.points.first().map(|p| p.year as f64).unwrap_or(0.0);
        let last_year = panel.points.last().map(|p| p.year as f64).unwrap_or(0.0);

        Plot::new("trend_panel")
            .height((height - 60.0).max(120.0))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .include_x(first_year - 0.5)
            .include_x(last_year + 0.5)
            .x_axis_formatter(|mark, _range| year_tick_label(mark.value))
            .x_axis_label(TrendPanel::X_LABEL)
            .y_axis_label(TrendPanel::Y_LABEL)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                // Portfolio labels sit above their markers, benchmark labels below
                series(
                    plot_ui,
                    &portfolio,
                    &panel.portfolio_label,
                    PORTFOLIO_COLOR,
                    egui::Align2::CENTER_BOTTOM,
                );
                series(
                    plot_ui,
                    &benchmark,
                    &panel.benchmark_label,
                    BENCHMARK_COLOR,
                    egui::Align2::CENTER_TOP,
                );
            });
    });
}

/// Connected line with markers and a value label at every point.
fn series(
    plot_ui: &mut egui_plot::PlotUi,
    points: &[[f64; 2]],
    name: &str,
    color: egui::Color32,
    label_anchor: egui::Align2,
) {
    plot_ui.line(
        Line::new(PlotPoints::from(points.to_vec()))
            .name(name)
            .color(color)
            .width(2.0),
    );
    plot_ui.points(
        Points::new(PlotPoints::from(points.to_vec()))
            .name(name)
            .color(color)
            .radius(4.0),
    );
    for [x, y] in points {
        plot_ui.text(
            Text::new(
                PlotPoint::new(*x, *y),
                egui::RichText::new(format_pct(*y)).size(11.0).color(color),
            )
            .anchor(label_anchor),
        );
    }
}
