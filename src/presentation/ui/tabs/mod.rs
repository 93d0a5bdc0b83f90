pub mod analytics;
pub mod log;
pub mod settings;
pub mod widgets;

pub use analytics::{AnalyticsAction, AnalyticsTab};
pub use log::{LogAction, LogTab};
pub use settings::{SettingsAction, SettingsTab};
pub use widgets::{WidgetsAction, WidgetsTab};
