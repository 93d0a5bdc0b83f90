use crate::domain::entities::{AppConfig, ExportFormat, ThemeMode};
use eframe::egui;

pub enum SettingsAction {
    SaveConfig,
    ApplyTheme,
}

pub struct SettingsTab;

impl SettingsTab {
    pub fn show(ui: &mut egui::Ui, config: &mut AppConfig) -> Vec<SettingsAction> {
        let mut actions = Vec::new();

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Settings");
            ui.separator();

            ui.columns(2, |columns| {
                columns[0].vertical(|ui| {
                    ui.group(|ui| {
                        ui.heading("General");

                        ui.horizontal(|ui| {
                            ui.label("Theme:");
                            egui::ComboBox::new("theme_combo", "")
                                .selected_text(format!("{:?}", config.theme))
                                .show_ui(ui, |ui| {
                                    for (theme, label) in [
                                        (ThemeMode::System, "System"),
                                        (ThemeMode::Light, "Light"),
                                        (ThemeMode::Dark, "Dark"),
                                    ] {
                                        if ui.selectable_value(&mut config.theme, theme, label).clicked() {
                                            actions.push(SettingsAction::SaveConfig);
                                            actions.push(SettingsAction::ApplyTheme);
                                        }
                                    }
                                });
                        });

                        ui.horizontal(|ui| {
                            ui.label("Default export format:");
                            egui::ComboBox::new("export_format_combo", "")
                                .selected_text(config.export_format.extension().to_uppercase())
                                .show_ui(ui, |ui| {
                                    for format in ExportFormat::ALL {
                                        if ui
                                            .selectable_value(
                                                &mut config.export_format,
                                                format,
                                                format.extension().to_uppercase(),
                                            )
                                            .clicked()
                                        {
                                            actions.push(SettingsAction::SaveConfig);
                                        }
                                    }
                                });
                        });
                    });
                });

                columns[1].vertical(|ui| {
                    ui.group(|ui| {
                        ui.heading("Portal connection");

                        egui::Grid::new("connection_grid").num_columns(2).show(ui, |ui| {
                            ui.label("Base URL:");
                            if ui.text_edit_singleline(&mut config.base_url).lost_focus() {
                                actions.push(SettingsAction::SaveConfig);
                            }
                            ui.end_row();

                            ui.label("Scope:");
                            if ui.text_edit_singleline(&mut config.scope).lost_focus() {
                                actions.push(SettingsAction::SaveConfig);
                            }
                            ui.end_row();

                            ui.label("Timeout (s):");
                            if ui
                                .add(egui::DragValue::new(&mut config.request_timeout_secs).range(1..=120))
                                .changed()
                            {
                                actions.push(SettingsAction::SaveConfig);
                            }
                            ui.end_row();
                        });

                        ui.weak(format!("Requests go to {}", config.api_root()));
                        ui.weak("Connection changes apply on next start.");
                    });
                });
            });
        });

        actions
    }
}
