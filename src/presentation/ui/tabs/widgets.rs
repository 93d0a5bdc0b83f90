use crate::presentation::components::{WidgetAction, WidgetBoard, WidgetLayoutManager};
use eframe::egui;

pub enum WidgetsAction {
    Board(WidgetAction),
    Save,
    Reset,
    Reload,
}

pub struct WidgetsTab;

impl WidgetsTab {
    pub fn show(
        ui: &mut egui::Ui,
        board: &mut WidgetBoard,
        manager: &WidgetLayoutManager,
        busy: bool,
    ) -> Vec<WidgetsAction> {
        let mut actions = Vec::new();

        ui.horizontal(|ui| {
            ui.heading("My Widgets");
            ui.separator();
            if ui
                .add_enabled(manager.is_dirty() && !busy, egui::Button::new("Save layout"))
                .clicked()
            {
                actions.push(WidgetsAction::Save);
            }
            if ui.add_enabled(!busy, egui::Button::new("Reset to defaults")).clicked() {
                actions.push(WidgetsAction::Reset);
            }
            if ui.add_enabled(!busy, egui::Button::new("Reload")).clicked() {
                actions.push(WidgetsAction::Reload);
            }
            if manager.is_dirty() {
                ui.weak("Unsaved changes");
            }
            if busy {
                ui.spinner();
            }
        });
        ui.separator();

        actions.extend(
            board
                .show(ui, manager)
                .into_iter()
                .map(WidgetsAction::Board),
        );
        actions
    }
}
