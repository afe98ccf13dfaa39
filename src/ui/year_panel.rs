use eframe::egui;
use egui_plot::{Bar, BarChart, HLine, Legend, LineStyle, Plot};

use crate::report::YearPanel;
use crate::ui::chart_utils::{
    paint_category_labels, panel_frame, AVERAGE_COLOR, BAR_COLOR, BENCHMARK_COLOR,
    CATEGORY_LABEL_HEIGHT,
};

pub fn render(ui: &mut egui::Ui, panel: &YearPanel, height: f32) {
    panel_frame(ui, &panel.title, |ui| {
        if panel.bars.is_empty() && panel.benchmark.is_none() {
            ui.label(format!("No trading data for {}.", panel.year));
            return;
        }

        let bars: Vec<Bar> = panel
            .bars
            .iter()
            .enumerate()
            .map(|(i, (symbol, value))| Bar::new(i as f64, *value).width(0.6).name(symbol))
            .collect();

        let plot_height = (height - CATEGORY_LABEL_HEIGHT - 40.0).max(120.0);
        let response = Plot::new(("year_panel", panel.year))
            .height(plot_height)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show_axes([false, true])
            .show_grid([false, true])
            .include_y(0.0)
            .y_axis_label(YearPanel::Y_LABEL)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&panel.bar_label).color(BAR_COLOR));
                if let Some(bench) = &panel.benchmark {
                    plot_ui.hline(
                        HLine::new(bench.value)
                            .name(&bench.label)
                            .color(BENCHMARK_COLOR)
                            .width(1.5)
                            .style(LineStyle::dashed_dense()),
                    );
                }
                if let Some(avg) = &panel.average {
                    plot_ui.hline(
                        HLine::new(avg.value)
                            .name(&avg.label)
                            .color(AVERAGE_COLOR)
                            .width(1.5)
                            .style(LineStyle::dashed_dense()),
                    );
                }
            });

        let labels: Vec<(f64, &str)> = panel
            .bars
            .iter()
            .enumerate()
            .map(|(i, (symbol, _))| (i as f64, symbol.as_str()))
            .collect();
        paint_category_labels(ui, &response.transform, &labels);

        ui.add_space(CATEGORY_LABEL_HEIGHT);
        ui.vertical_centered(|ui| {
            ui.small(YearPanel::X_LABEL);
        });
    });
}
