pub mod analytics_operations;
pub mod export_operations;
pub mod location_operations;
pub mod widget_operations;

#[cfg(test)]
pub mod fakes;

pub use analytics_operations::*;
pub use export_operations::*;
pub use location_operations::*;
pub use widget_operations::*;
