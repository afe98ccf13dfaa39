use eframe::egui;

use crate::config::{CELL_HEIGHT, CELL_WIDTH};
use crate::error::ReportError;
use crate::report::Report;
use crate::ui;

/// Read-only viewer for a fully computed report
pub struct ReportApp {
    report: Report,
    status_message: String,
}

impl ReportApp {
    pub fn new(report: Report) -> Self {
        let status_message = format!(
            "{} year panels, data through {}",
            report.years.len(),
            report.as_of
        );
        Self {
            report,
            status_message,
        }
    }
}

impl eframe::App for ReportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .auto_shrink(false)
                .show(ui, |ui| ui::render_grid(ui, &self.report));
        });
    }
}

/// Window size that fits the whole grid without scrolling.
pub fn window_size(report: &Report) -> [f32; 2] {
    [
        report.layout.cols as f32 * (CELL_WIDTH + 8.0) + 32.0,
        report.layout.rows as f32 * (CELL_HEIGHT + 16.0) + 48.0,
    ]
}

/// Open the report window and block until it is closed.
pub fn show(report: Report) -> Result<(), ReportError> {
    let title = report.trend.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size(window_size(&report))
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    tracing::info!("Opening report window");
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ReportApp::new(report)))),
    )
    .map_err(|e| ReportError::RenderFailed(e.to_string()))
}
