use serde_json::Value;
use std::fmt;

const LABEL_FIELDS: [&str; 8] = [
    "label", "name", "category", "period", "date", "month", "status", "type",
];
const COUNT_FIELDS: [&str; 3] = ["count", "total", "value"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::Doughnut];
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "Bar"),
            ChartKind::Line => write!(f, "Line"),
            ChartKind::Doughnut => write!(f, "Doughnut"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub count: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, count: f64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartDataset {
    pub points: Vec<DataPoint>,
}

impl ChartDataset {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    /// No entries, or every entry counts zero.
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(|point| point.count == 0.0)
    }

    pub fn max_count(&self) -> f64 {
        self.points.iter().map(|p| p.count).fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.count).sum()
    }

    /// Decodes the `data` member of an analytics response. Accepts an array
    /// of records (`[{label, count}]`, with the usual aliases) or a flat
    /// `{label: count}` object. Entries without a usable count are skipped.
    pub fn from_value(data: &Value) -> Self {
        let points = match data {
            Value::Array(entries) => entries.iter().filter_map(point_from_record).collect(),
            Value::Object(map) => map
                .iter()
                .filter_map(|(label, count)| numeric(count).map(|c| DataPoint::new(label, c)))
                .collect(),
            _ => Vec::new(),
        };
        Self { points }
    }
}

fn point_from_record(record: &Value) -> Option<DataPoint> {
    let object = record.as_object()?;
    let count = COUNT_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(numeric))?;
    let label = LABEL_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(label_text))
        .or_else(|| object.values().find_map(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string());
    Some(DataPoint::new(label, count))
}

fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Counts arrive as numbers or numeric strings depending on the endpoint.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Headline figures of a module, taken from the `summary` metric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSummary {
    pub figures: Vec<(String, f64)>,
}

impl MetricSummary {
    pub fn from_value(data: &Value) -> Self {
        let figures = data
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(key, value)| numeric(value).map(|n| (key.clone(), n)))
                    .collect()
            })
            .unwrap_or_default();
        Self { figures }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.figures.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }
}
