pub mod chart_catalog;
pub mod query_builder;

pub use chart_catalog::{ChartSpec, ParamField, Presentation, charts_for, find_chart};
pub use query_builder::{ParamValue, QueryParams};
