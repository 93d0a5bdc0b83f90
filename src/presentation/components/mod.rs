pub mod alert_modal;
pub mod chart_renderer;
pub mod chip_view;
pub mod export_controller;
pub mod filter_store;
pub mod location_cascade;
pub mod log_manager;
pub mod module_orchestrator;
pub mod widget_board;
pub mod widget_layout_manager;

pub use alert_modal::AlertModal;
pub use chart_renderer::{ChartRenderer, ChartViewAction};
pub use chip_view::{ActiveFilterChipView, ChipAction};
pub use export_controller::{ExportController, ExportOutcome};
pub use filter_store::FilterStateStore;
pub use location_cascade::{CascadeRequest, LocationCascade};
pub use log_manager::{CapturedEvent, LogLevel, LogManager};
pub use module_orchestrator::{FilterSection, ModuleOrchestrator};
pub use widget_board::{WidgetAction, WidgetBoard};
pub use widget_layout_manager::WidgetLayoutManager;
