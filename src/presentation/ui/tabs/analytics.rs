use crate::domain::entities::{
    ExportFormat, FilterChip, FilterKey, LocationLevel, LocationScope, Module, QuickRange,
};
use crate::domain::services::charts_for;
use crate::presentation::components::{
    ActiveFilterChipView, ChartRenderer, ChartViewAction, ChipAction, ExportController,
    FilterSection, FilterStateStore, LocationCascade, ModuleOrchestrator,
};
use eframe::egui;

pub enum AnalyticsAction {
    SwitchModule(Module),
    Apply,
    ClearAll,
    RemoveChip(FilterChip),
    SelectLocation {
        scope: LocationScope,
        level: LocationLevel,
        value: Option<String>,
    },
    Export,
    SetExportFormat(ExportFormat),
    Chart(ChartViewAction),
}

pub struct AnalyticsTab;

impl AnalyticsTab {
    pub fn show(
        ui: &mut egui::Ui,
        orchestrator: &ModuleOrchestrator,
        store: &mut FilterStateStore,
        renderer: &mut ChartRenderer,
        export: &ExportController,
    ) -> Vec<AnalyticsAction> {
        let mut actions = Vec::new();

        egui::SidePanel::left("filter_panel")
            .resizable(true)
            .default_width(280.0)
            .show_inside(ui, |ui| {
                Self::show_filters(ui, orchestrator, store, &mut actions);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.horizontal(|ui| {
                for module in Module::ALL {
                    if ui
                        .selectable_label(orchestrator.is_current(module), module.title())
                        .clicked()
                    {
                        actions.push(AnalyticsAction::SwitchModule(module));
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if export.is_in_flight() { "Exporting…" } else { "Export" };
                    if ui
                        .add_enabled(!export.is_in_flight(), egui::Button::new(label))
                        .clicked()
                    {
                        actions.push(AnalyticsAction::Export);
                    }
                    egui::ComboBox::from_id_salt("export_format")
                        .selected_text(export.format().extension().to_uppercase())
                        .show_ui(ui, |ui| {
                            for format in ExportFormat::ALL {
                                if ui
                                    .selectable_label(
                                        export.format() == format,
                                        format.extension().to_uppercase(),
                                    )
                                    .clicked()
                                {
                                    actions.push(AnalyticsAction::SetExportFormat(format));
                                }
                            }
                        });
                });
            });
            ui.separator();

            match ActiveFilterChipView::show(ui, store.state()) {
                Some(ChipAction::Remove(chip)) => actions.push(AnalyticsAction::RemoveChip(chip)),
                Some(ChipAction::ClearAll) => actions.push(AnalyticsAction::ClearAll),
                None => {}
            }

            if let Some(status) = orchestrator.status_message() {
                let color = if orchestrator.is_degraded() {
                    ui.visuals().warn_fg_color
                } else {
                    ui.visuals().weak_text_color()
                };
                ui.horizontal(|ui| {
                    if orchestrator.is_refreshing(orchestrator.current()) {
                        ui.spinner();
                    }
                    ui.label(egui::RichText::new(status).color(color));
                });
            }
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let module = orchestrator.current();
                    let (summaries, charts): (Vec<_>, Vec<_>) =
                        charts_for(module).iter().partition(|spec| spec.is_summary());

                    for spec in summaries {
                        if let Some(action) = renderer.show_summary(ui, spec) {
                            actions.push(AnalyticsAction::Chart(action));
                        }
                    }
                    ui.add_space(8.0);

                    for pair in charts.chunks(2) {
                        ui.columns(2, |columns| {
                            for (column, spec) in columns.iter_mut().zip(pair) {
                                if let Some(action) = renderer.show_chart(column, *spec) {
                                    actions.push(AnalyticsAction::Chart(action));
                                }
                            }
                        });
                        ui.add_space(8.0);
                    }
                });
        });

        actions
    }

    fn show_filters(
        ui: &mut egui::Ui,
        orchestrator: &ModuleOrchestrator,
        store: &mut FilterStateStore,
        actions: &mut Vec<AnalyticsAction>,
    ) {
        ui.heading("Filters");
        ui.horizontal(|ui| {
            if ui.button("Apply").clicked() {
                actions.push(AnalyticsAction::Apply);
            }
            if ui.button("Clear all").clicked() {
                actions.push(AnalyticsAction::ClearAll);
            }
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for section in orchestrator.visible_sections() {
                egui::CollapsingHeader::new(section.title())
                    .default_open(true)
                    .show(ui, |ui| match section {
                        FilterSection::Time => Self::show_time(ui, store),
                        FilterSection::Categories(module) => {
                            for key in FilterKey::for_module(module) {
                                Self::show_checkbox_group(ui, store, key);
                            }
                        }
                        FilterSection::Locations(scope) => {
                            Self::show_locations(ui, store.cascade(scope), actions);
                        }
                    });
            }
        });
    }

    fn show_time(ui: &mut egui::Ui, store: &mut FilterStateStore) {
        let form = store.form_mut();
        let current = form.quick_range();
        egui::ComboBox::from_label("Quick range")
            .selected_text(current.map(|r| r.label()).unwrap_or("Custom dates"))
            .show_ui(ui, |ui| {
                if ui.selectable_label(current.is_none(), "Custom dates").clicked() {
                    form.set_quick_range(None);
                }
                for range in QuickRange::ALL {
                    if ui
                        .selectable_label(current == Some(range), range.label())
                        .clicked()
                    {
                        form.set_quick_range(Some(range));
                    }
                }
            });

        egui::Grid::new("date_inputs").num_columns(2).show(ui, |ui| {
            ui.label("From");
            ui.add(egui::TextEdit::singleline(form.date_from_mut()).hint_text("YYYY-MM-DD"));
            ui.end_row();
            ui.label("To");
            ui.add(egui::TextEdit::singleline(form.date_to_mut()).hint_text("YYYY-MM-DD"));
            ui.end_row();
        });
    }

    fn show_checkbox_group(ui: &mut egui::Ui, store: &mut FilterStateStore, key: FilterKey) {
        ui.label(egui::RichText::new(key.label()).strong());
        ui.horizontal_wrapped(|ui| {
            for choice in key.choices() {
                let mut checked = store.form().is_checked(key, choice);
                if ui.checkbox(&mut checked, *choice).changed() {
                    store.form_mut().set_checked(key, choice, checked);
                }
            }
        });
        ui.add_space(4.0);
    }

    fn show_locations(
        ui: &mut egui::Ui,
        cascade: &LocationCascade,
        actions: &mut Vec<AnalyticsAction>,
    ) {
        let scope = cascade.scope();
        for level in LocationLevel::ALL {
            let control = cascade.control(level);
            let selected_text = control
                .selected()
                .map(str::to_string)
                .unwrap_or_else(|| control.placeholder().label().to_string());

            ui.add_enabled_ui(control.is_enabled(), |ui| {
                egui::ComboBox::from_id_salt((scope.prefix(), level.as_str()))
                    .selected_text(selected_text)
                    .width(200.0)
                    .show_ui(ui, |ui| {
                        if ui
                            .selectable_label(control.selected().is_none(), control.placeholder().label())
                            .clicked()
                        {
                            actions.push(AnalyticsAction::SelectLocation {
                                scope,
                                level,
                                value: None,
                            });
                        }
                        for option in control.options() {
                            if ui
                                .selectable_label(control.selected() == Some(option.as_str()), option)
                                .clicked()
                            {
                                actions.push(AnalyticsAction::SelectLocation {
                                    scope,
                                    level,
                                    value: Some(option.clone()),
                                });
                            }
                        }
                    });
                if cascade.is_loading(level) {
                    ui.spinner();
                }
            });
            ui.weak(level.label());
        }
    }
}
