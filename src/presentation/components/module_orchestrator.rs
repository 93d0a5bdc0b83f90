use crate::application::dto::ModuleRefreshReport;
use crate::domain::entities::{LocationScope, Module};
use std::collections::HashMap;

/// Which modules a filter-panel section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTag {
    All,
    Module(Module),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSection {
    Time,
    Categories(Module),
    Locations(LocationScope),
}

impl FilterSection {
    pub const ALL: [FilterSection; 6] = [
        FilterSection::Time,
        FilterSection::Categories(Module::Applicants),
        FilterSection::Locations(LocationScope::Applicant),
        FilterSection::Categories(Module::Employers),
        FilterSection::Locations(LocationScope::Employer),
        FilterSection::Categories(Module::Jobs),
    ];

    pub fn tag(&self) -> SectionTag {
        match self {
            FilterSection::Time => SectionTag::All,
            FilterSection::Categories(module) => SectionTag::Module(*module),
            FilterSection::Locations(scope) => SectionTag::Module(scope.module()),
        }
    }

    pub fn title(&self) -> String {
        match self {
            FilterSection::Time => "Time period".to_string(),
            FilterSection::Categories(module) => format!("{} filters", module.title()),
            FilterSection::Locations(scope) => match scope {
                LocationScope::Applicant => "Applicant location".to_string(),
                LocationScope::Employer => "Employer location".to_string(),
            },
        }
    }
}

pub struct PanelState {
    pub loaded: bool,
    pub refreshing: bool,
}

impl PanelState {
    pub fn new() -> Self {
        Self {
            loaded: false,
            refreshing: false,
        }
    }
}

pub struct ModuleOrchestrator {
    current_module: Module,
    panels: HashMap<Module, PanelState>,
    status_message: Option<String>,
    degraded: bool,
}

impl ModuleOrchestrator {
    pub fn new() -> Self {
        let panels = Module::ALL
            .into_iter()
            .map(|module| (module, PanelState::new()))
            .collect();

        Self {
            current_module: Module::Applicants,
            panels,
            status_message: None,
            degraded: false,
        }
    }

    /// Activates `module` and returns the module whose charts must now be
    /// refreshed.
    pub fn switch_to(&mut self, module: Module) -> Module {
        if self.current_module != module {
            tracing::debug!("Switching analytics module to {}", module);
        }
        self.current_module = module;
        module
    }

    pub fn current(&self) -> Module {
        self.current_module
    }

    pub fn is_current(&self, module: Module) -> bool {
        self.current_module == module
    }

    pub fn is_section_visible(&self, section: FilterSection) -> bool {
        match section.tag() {
            SectionTag::All => true,
            SectionTag::Module(module) => module == self.current_module,
        }
    }

    pub fn visible_sections(&self) -> Vec<FilterSection> {
        FilterSection::ALL
            .into_iter()
            .filter(|section| self.is_section_visible(*section))
            .collect()
    }

    /// Only the active module's content panel is shown.
    pub fn is_panel_visible(&self, module: Module) -> bool {
        self.is_current(module)
    }

    pub fn begin_refresh(&mut self, module: Module) {
        if let Some(panel) = self.panels.get_mut(&module) {
            panel.refreshing = true;
        }
    }

    /// Records a settled refresh. The page status only follows the module
    /// that is still active.
    pub fn finish_refresh(&mut self, report: &ModuleRefreshReport) {
        if let Some(panel) = self.panels.get_mut(&report.module) {
            panel.refreshing = false;
            panel.loaded = true;
        }
        if report.module != self.current_module {
            tracing::debug!("Refresh of {} settled after leaving it", report.module);
            return;
        }
        self.degraded = report.is_degraded();
        self.status_message = Some(report.status_message());
    }

    pub fn is_refreshing(&self, module: Module) -> bool {
        self.panels
            .get(&module)
            .map(|panel| panel.refreshing)
            .unwrap_or(false)
    }

    pub fn is_loaded(&self, module: Module) -> bool {
        self.panels
            .get(&module)
            .map(|panel| panel.loaded)
            .unwrap_or(false)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

impl Default for ModuleOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ChartResult;
    use crate::domain::services::charts_for;
    use chrono::{Local, TimeZone};
    use serde_json::json;

    fn report(module: Module, failed: usize) -> ModuleRefreshReport {
        let results = charts_for(module)
            .iter()
            .enumerate()
            .map(|(i, spec)| ChartResult {
                spec,
                data: (i >= failed).then(|| json!([])),
            })
            .collect();
        ModuleRefreshReport {
            module,
            results,
            completed_at: Local.with_ymd_and_hms(2026, 3, 2, 9, 5, 7).unwrap(),
        }
    }

    #[test]
    fn starts_on_applicants_with_its_sections() {
        let orchestrator = ModuleOrchestrator::new();
        assert_eq!(orchestrator.current(), Module::Applicants);
        assert_eq!(
            orchestrator.visible_sections(),
            vec![
                FilterSection::Time,
                FilterSection::Categories(Module::Applicants),
                FilterSection::Locations(LocationScope::Applicant),
            ]
        );
    }

    #[test]
    fn switching_shows_only_the_active_panel() {
        let mut orchestrator = ModuleOrchestrator::new();
        assert_eq!(orchestrator.switch_to(Module::Jobs), Module::Jobs);

        assert!(orchestrator.is_panel_visible(Module::Jobs));
        assert!(!orchestrator.is_panel_visible(Module::Applicants));
        assert!(orchestrator.is_section_visible(FilterSection::Time));
        assert!(!orchestrator.is_section_visible(FilterSection::Locations(LocationScope::Employer)));
        assert_eq!(orchestrator.visible_sections().len(), 2);
    }

    #[test]
    fn status_reflects_settled_batch() {
        let mut orchestrator = ModuleOrchestrator::new();
        orchestrator.begin_refresh(Module::Applicants);
        assert!(orchestrator.is_refreshing(Module::Applicants));

        orchestrator.finish_refresh(&report(Module::Applicants, 0));
        assert!(!orchestrator.is_refreshing(Module::Applicants));
        assert_eq!(orchestrator.status_message(), Some("Last refreshed at 09:05:07"));
        assert!(!orchestrator.is_degraded());

        orchestrator.finish_refresh(&report(Module::Applicants, 2));
        assert!(orchestrator.is_degraded());
        assert_eq!(
            orchestrator.status_message(),
            Some("Some analytics could not be loaded (2 of 8 failed) at 09:05:07")
        );
    }

    #[test]
    fn late_report_for_previous_module_keeps_status() {
        let mut orchestrator = ModuleOrchestrator::new();
        orchestrator.begin_refresh(Module::Applicants);
        orchestrator.switch_to(Module::Employers);

        orchestrator.finish_refresh(&report(Module::Applicants, 1));
        assert_eq!(orchestrator.status_message(), None);
        assert!(orchestrator.is_loaded(Module::Applicants));
    }
}
