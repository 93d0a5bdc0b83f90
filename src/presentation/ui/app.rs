use crate::application::UseCaseContainer;
use crate::domain::entities::{
    AppConfig, FilterChip, LocationLevel, LocationScope, Module, WidgetName,
};
use crate::domain::services::ChartSpec;
use crate::infrastructure::ConfigRepository;
use crate::presentation::components::{
    AlertModal, CapturedEvent, CascadeRequest, ChartRenderer, ChartViewAction, ExportController,
    ExportOutcome, FilterStateStore, LogManager, ModuleOrchestrator, WidgetAction, WidgetBoard,
    WidgetLayoutManager,
};
use crate::presentation::services::{AsyncExecutor, AsyncTaskManager, TaskKind, TaskOutcome};
use crate::presentation::style::configure_style;
use crate::presentation::ui::tabs::{
    AnalyticsAction, AnalyticsTab, LogAction, LogTab, SettingsAction, SettingsTab,
    WidgetsAction, WidgetsTab,
};
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq)]
enum View {
    Analytics,
    Widgets,
    Settings,
    Log,
}

pub struct DashboardApp {
    view: View,
    config: AppConfig,
    config_repository: ConfigRepository,
    system_dark: bool,

    store: FilterStateStore,
    orchestrator: ModuleOrchestrator,
    renderer: ChartRenderer,
    export: ExportController,
    widgets: WidgetLayoutManager,
    board: WidgetBoard,
    alert: AlertModal,

    log_manager: LogManager,
    log_rx: Receiver<CapturedEvent>,

    task_manager: AsyncTaskManager,
    use_cases: Arc<UseCaseContainer>,

    initialized: bool,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        use_cases: Arc<UseCaseContainer>,
        executor: AsyncExecutor,
        config: AppConfig,
        config_repository: ConfigRepository,
        log_rx: Receiver<CapturedEvent>,
    ) -> Self {
        let system_dark = cc.egui_ctx.style().visuals.dark_mode;
        configure_style(&cc.egui_ctx, config.theme, system_dark);

        Self {
            view: View::Analytics,
            store: FilterStateStore::new(),
            orchestrator: ModuleOrchestrator::new(),
            renderer: ChartRenderer::new(),
            export: ExportController::new(config.export_format),
            widgets: WidgetLayoutManager::new(),
            board: WidgetBoard::new(&config.api_root()),
            alert: AlertModal::new(),
            log_manager: LogManager::new(),
            log_rx,
            task_manager: AsyncTaskManager::new(executor),
            use_cases,
            config,
            config_repository,
            system_dark,
            initialized: false,
        }
    }

    fn start(&mut self) {
        tracing::info!("Connecting to {}", self.config.api_root());
        for request in self.store.populate_provinces() {
            self.spawn_lookup(request);
        }
        self.load_widgets();
        self.refresh_module(self.orchestrator.current());
    }

    fn spawn_lookup(&mut self, request: CascadeRequest) {
        let use_case = Arc::clone(&self.use_cases.load_locations);
        self.task_manager.spawn(TaskKind::Locations, async move {
            let result = use_case
                .execute(request.scope, request.level, request.parent.as_deref())
                .await;
            TaskOutcome::Locations { request, result }
        });
    }

    fn refresh_module(&mut self, module: Module) {
        self.orchestrator.begin_refresh(module);
        let state = self.store.state().clone();
        let use_case = Arc::clone(&self.use_cases.refresh_module);
        self.task_manager.spawn(TaskKind::Refresh, async move {
            TaskOutcome::ModuleRefreshed(use_case.execute(module, state).await)
        });
    }

    fn reload_chart(&mut self, spec: &'static ChartSpec) {
        let state = self.store.state().clone();
        let use_case = Arc::clone(&self.use_cases.fetch_analytics);
        self.task_manager.spawn(TaskKind::ChartReload, async move {
            let data = use_case.execute(spec, &state).await;
            TaskOutcome::ChartReloaded { spec, data }
        });
    }

    fn apply_filters(&mut self) {
        self.store.read_from_ui();
        self.refresh_module(self.orchestrator.current());
    }

    fn clear_filters(&mut self) {
        self.store.clear_all();
        self.refresh_module(self.orchestrator.current());
    }

    fn remove_chip(&mut self, chip: FilterChip) {
        for request in self.store.remove_value(&chip) {
            self.spawn_lookup(request);
        }
        self.refresh_module(self.orchestrator.current());
    }

    fn select_location(&mut self, scope: LocationScope, level: LocationLevel, value: Option<String>) {
        if let Some(request) = self.store.cascade_mut(scope).select(level, value) {
            self.spawn_lookup(request);
        }
    }

    fn switch_module(&mut self, module: Module) {
        let target = self.orchestrator.switch_to(module);
        self.refresh_module(target);
    }

    fn start_export(&mut self) {
        let Some(request) = self
            .export
            .begin(self.orchestrator.current(), self.store.state())
        else {
            return;
        };
        let use_case = Arc::clone(&self.use_cases.export);
        self.task_manager.spawn(TaskKind::Export, async move {
            TaskOutcome::ExportFinished(use_case.execute(request).await)
        });
    }

    fn load_widgets(&mut self) {
        let use_case = Arc::clone(&self.use_cases.load_widgets);
        self.task_manager.spawn(TaskKind::WidgetLoad, async move {
            TaskOutcome::WidgetsLoaded(use_case.execute().await)
        });
    }

    fn save_widgets(&mut self) {
        let Some(layout) = self.widgets.save() else {
            return;
        };
        let use_case = Arc::clone(&self.use_cases.save_widgets);
        self.task_manager.spawn(TaskKind::WidgetSave, async move {
            TaskOutcome::WidgetsSaved(use_case.execute(layout).await)
        });
    }

    fn reset_widgets(&mut self) {
        let use_case = Arc::clone(&self.use_cases.reset_widgets);
        self.task_manager.spawn(TaskKind::WidgetReset, async move {
            TaskOutcome::WidgetsReset(use_case.execute().await)
        });
    }

    fn widgets_busy(&self) -> bool {
        [TaskKind::WidgetLoad, TaskKind::WidgetSave, TaskKind::WidgetReset]
            .into_iter()
            .any(|kind| self.task_manager.is_pending(kind))
    }

    fn poll_async_tasks(&mut self) {
        for outcome in self.task_manager.poll() {
            match outcome {
                TaskOutcome::Locations { request, result } => {
                    if let Some(follow_up) = self.store.apply_lookup(&request, result) {
                        self.spawn_lookup(follow_up);
                    }
                }
                TaskOutcome::ModuleRefreshed(report) => {
                    for result in &report.results {
                        self.renderer.render(result.spec, result.data.as_ref());
                    }
                    self.orchestrator.finish_refresh(&report);
                }
                TaskOutcome::ChartReloaded { spec, data } => {
                    self.renderer.render(spec, data.as_ref());
                }
                TaskOutcome::WidgetsLoaded(result) => self.widgets.on_loaded(result),
                TaskOutcome::WidgetsSaved(result) => self.widgets.on_saved(result),
                TaskOutcome::WidgetsReset(result) => {
                    if let Some(message) = self.widgets.on_reset(result) {
                        self.alert.show("Widgets", message);
                    }
                }
                TaskOutcome::ExportFinished(result) => match self.export.finish(result) {
                    ExportOutcome::Ready(file) => match ExportController::save_file(&file) {
                        Ok(_) => {}
                        Err(e) => {
                            tracing::error!("Failed to save export: {:#}", e);
                            self.alert.show("Export", format!("{:#}", e));
                        }
                    },
                    ExportOutcome::Failed { alert } => self.alert.show("Export", alert),
                },
            }
        }
    }

    fn poll_logs(&mut self) {
        while let Ok(event) = self.log_rx.try_recv() {
            self.log_manager.push_captured(event);
        }
    }

    fn handle_analytics_action(&mut self, action: AnalyticsAction) {
        match action {
            AnalyticsAction::SwitchModule(module) => self.switch_module(module),
            AnalyticsAction::Apply => self.apply_filters(),
            AnalyticsAction::ClearAll => self.clear_filters(),
            AnalyticsAction::RemoveChip(chip) => self.remove_chip(chip),
            AnalyticsAction::SelectLocation {
                scope,
                level,
                value,
            } => self.select_location(scope, level, value),
            AnalyticsAction::Export => self.start_export(),
            AnalyticsAction::SetExportFormat(format) => self.export.set_format(format),
            AnalyticsAction::Chart(ChartViewAction::Reload(spec)) => self.reload_chart(spec),
        }
    }

    fn handle_widgets_action(&mut self, action: WidgetsAction) {
        match action {
            WidgetsAction::Board(WidgetAction::Hide(name)) => self.widgets.hide(name),
            WidgetsAction::Board(WidgetAction::Show(name)) => self.widgets.show(name),
            WidgetsAction::Board(WidgetAction::DragStart(name)) => self.widgets.drag_start(name),
            WidgetsAction::Board(WidgetAction::DragOver(name, side)) => {
                self.widgets.drag_over(name, side)
            }
            WidgetsAction::Board(WidgetAction::DragEnd) => self.widgets.drag_end(),
            WidgetsAction::Save => self.save_widgets(),
            WidgetsAction::Reset => self.reset_widgets(),
            WidgetsAction::Reload => self.load_widgets(),
        }
    }

    fn handle_settings_action(&mut self, ctx: &egui::Context, action: SettingsAction) {
        match action {
            SettingsAction::SaveConfig => {
                if let Err(e) = self.config_repository.save(&self.config) {
                    tracing::error!("Failed to save settings: {:#}", e);
                }
                self.export.set_format(self.config.export_format);
            }
            SettingsAction::ApplyTheme => {
                configure_style(ctx, self.config.theme, self.system_dark);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_logs();
        self.poll_async_tasks();

        if !self.initialized {
            self.initialized = true;
            self.start();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Placement Analytics");
                ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
                ui.separator();

                for (view, label) in [
                    (View::Analytics, "Analytics"),
                    (View::Widgets, "Widgets"),
                    (View::Settings, "Settings"),
                    (View::Log, "Log"),
                ] {
                    if ui.selectable_label(self.view == view, label).clicked() {
                        self.view = view;
                    }
                }

                if self.task_manager.has_pending() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.spinner();
                    });
                }
            });
        });

        match self.view {
            View::Analytics => {
                let actions = egui::CentralPanel::default()
                    .show(ctx, |ui| {
                        AnalyticsTab::show(
                            ui,
                            &self.orchestrator,
                            &mut self.store,
                            &mut self.renderer,
                            &self.export,
                        )
                    })
                    .inner;
                for action in actions {
                    self.handle_analytics_action(action);
                }
            }
            View::Widgets => {
                let busy = self.widgets_busy();
                let actions = egui::CentralPanel::default()
                    .show(ctx, |ui| WidgetsTab::show(ui, &mut self.board, &self.widgets, busy))
                    .inner;
                for action in actions {
                    self.handle_widgets_action(action);
                }
            }
            View::Settings => {
                let actions = egui::CentralPanel::default()
                    .show(ctx, |ui| SettingsTab::show(ui, &mut self.config))
                    .inner;
                for action in actions {
                    self.handle_settings_action(ctx, action);
                }
            }
            View::Log => {
                let actions = egui::CentralPanel::default()
                    .show(ctx, |ui| LogTab::show(ui, &mut self.log_manager))
                    .inner;
                for action in actions {
                    match action {
                        LogAction::CopyAll => ctx.copy_text(self.log_manager.export_text()),
                        LogAction::Clear => self.log_manager.clear(),
                    }
                }
            }
        }

        self.alert.render(ctx);

        if self.task_manager.has_pending() || self.widgets.dragging().is_some() {
            ctx.request_repaint();
        } else if self.view == View::Widgets && self.widgets.layout().is_visible(WidgetName::Clock) {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}
