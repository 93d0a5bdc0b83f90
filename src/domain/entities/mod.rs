pub mod analytics;
pub mod config;
pub mod filter_state;
pub mod module;
pub mod widget_layout;

pub use analytics::{ChartDataset, ChartKind, DataPoint, MetricSummary};
pub use config::{AppConfig, ExportFormat, ThemeMode};
pub use filter_state::{
    FilterChip, FilterKey, FilterState, LocationLevel, LocationScope, LocationSelection,
    QuickRange, TimeWindow,
};
pub use module::Module;
pub use widget_layout::{WidgetLayout, WidgetName};
