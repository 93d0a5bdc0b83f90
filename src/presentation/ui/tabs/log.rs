use crate::presentation::components::{LogLevel, LogManager};
use eframe::egui;

pub enum LogAction {
    CopyAll,
    Clear,
}

pub struct LogTab;

impl LogTab {
    pub fn show(ui: &mut egui::Ui, log_manager: &mut LogManager) -> Vec<LogAction> {
        let mut actions = Vec::new();

        ui.heading("Activity Log");
        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("📋 Copy All").clicked() {
                actions.push(LogAction::CopyAll);
            }
            if ui.button("🗑 Clear").clicked() {
                actions.push(LogAction::Clear);
            }
            ui.separator();
            for level in LogLevel::ALL {
                let mut visible = log_manager.is_level_visible(level);
                if ui.checkbox(&mut visible, level.label()).changed() {
                    log_manager.set_level_visible(level, visible);
                }
            }
        });

        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let bg_frame = egui::Frame::default()
                    .fill(egui::Color32::BLACK)
                    .inner_margin(8.0);
                bg_frame.show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.set_style({
                        let mut style = (*ui.ctx().style()).clone();
                        style.override_font_id = Some(egui::FontId::monospace(12.0));
                        style
                    });

                    for entry in log_manager.filtered_logs_reversed() {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(format!("[{}]", entry.format_timestamp()))
                                    .color(egui::Color32::GRAY)
                                    .monospace(),
                            );
                            ui.label(
                                egui::RichText::new(&entry.message)
                                    .color(level_color(entry.level))
                                    .monospace(),
                            );
                        });
                    }
                });
            });

        actions
    }
}

fn level_color(level: LogLevel) -> egui::Color32 {
    match level {
        LogLevel::Debug => egui::Color32::from_gray(150),
        LogLevel::Info => egui::Color32::from_rgb(0, 255, 0),
        LogLevel::Warn => egui::Color32::from_rgb(255, 200, 0),
        LogLevel::Error => egui::Color32::from_rgb(255, 90, 90),
    }
}
