use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetName {
    Clock,
    Calendar,
    Notes,
    TodoList,
    QuickLinks,
    Announcements,
}

impl WidgetName {
    /// Default order of the dashboard widgets.
    pub const ALL: [WidgetName; 6] = [
        WidgetName::Clock,
        WidgetName::Calendar,
        WidgetName::Notes,
        WidgetName::TodoList,
        WidgetName::QuickLinks,
        WidgetName::Announcements,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            WidgetName::Clock => "clock",
            WidgetName::Calendar => "calendar",
            WidgetName::Notes => "notes",
            WidgetName::TodoList => "todo_list",
            WidgetName::QuickLinks => "quick_links",
            WidgetName::Announcements => "announcements",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WidgetName::Clock => "Clock",
            WidgetName::Calendar => "Calendar",
            WidgetName::Notes => "Notes",
            WidgetName::TodoList => "To-do list",
            WidgetName::QuickLinks => "Quick links",
            WidgetName::Announcements => "Announcements",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.key() == key)
    }
}

impl fmt::Display for WidgetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Per-admin widget visibility and order.
///
/// Every constructor normalizes, so `order` is always a permutation of
/// [`WidgetName::ALL`] and `visibility` always has an entry per widget.
/// Serializes to the structured `{visibility, order}` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetLayout {
    pub visibility: BTreeMap<WidgetName, bool>,
    pub order: Vec<WidgetName>,
}

impl Default for WidgetLayout {
    fn default() -> Self {
        Self {
            visibility: WidgetName::ALL.into_iter().map(|name| (name, true)).collect(),
            order: WidgetName::ALL.to_vec(),
        }
    }
}

impl WidgetLayout {
    pub fn is_visible(&self, name: WidgetName) -> bool {
        self.visibility.get(&name).copied().unwrap_or(true)
    }

    /// Fills missing visibility entries and repairs `order`: first occurrence
    /// wins, duplicates are dropped, missing widgets are appended in default
    /// order.
    pub fn normalized(mut self) -> Self {
        for name in WidgetName::ALL {
            self.visibility.entry(name).or_insert(true);
        }
        self.order = normalize_order(self.order);
        self
    }

    /// Builds a layout from a preferences payload. Accepts the structured
    /// `{visibility, order}` shape and the legacy flat `{name: bool}` map;
    /// anything else yields the defaults.
    pub fn from_payload(payload: &Value) -> Self {
        let Some(object) = payload.as_object() else {
            return Self::default();
        };

        let structured = object.get("visibility").is_some() || object.get("order").is_some();
        let (visibility_source, order_source) = if structured {
            (
                object.get("visibility").and_then(Value::as_object),
                object.get("order").and_then(Value::as_array),
            )
        } else {
            (Some(object), None)
        };

        let mut visibility = BTreeMap::new();
        if let Some(source) = visibility_source {
            for (key, value) in source {
                if let (Some(name), Some(visible)) = (WidgetName::from_key(key), value.as_bool()) {
                    visibility.insert(name, visible);
                }
            }
        }

        let order = order_source
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(WidgetName::from_key)
                    .collect()
            })
            .unwrap_or_default();

        Self { visibility, order }.normalized()
    }
}

fn normalize_order(order: Vec<WidgetName>) -> Vec<WidgetName> {
    let mut normalized = Vec::with_capacity(WidgetName::ALL.len());
    for name in order {
        if !normalized.contains(&name) {
            normalized.push(name);
        }
    }
    for name in WidgetName::ALL {
        if !normalized.contains(&name) {
            normalized.push(name);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_structured_payload() {
        let mut layout = WidgetLayout::default();
        layout.visibility.insert(WidgetName::TodoList, false);
        layout.order.swap(0, 5);

        let payload = serde_json::to_value(&layout).unwrap();
        assert_eq!(payload["visibility"]["todo_list"], false);
        assert_eq!(payload["visibility"]["quick_links"], true);
        assert_eq!(payload["order"][0], "announcements");
        assert_eq!(payload["order"][5], "clock");
    }

    fn assert_full_permutation(layout: &WidgetLayout) {
        assert_eq!(layout.order.len(), WidgetName::ALL.len());
        for name in WidgetName::ALL {
            assert!(layout.order.contains(&name), "{} missing from order", name);
            assert!(layout.visibility.contains_key(&name));
        }
    }

    #[test]
    fn shortened_payload_keeps_every_widget() {
        let layout = WidgetLayout::from_payload(&json!({
            "visibility": { "notes": false },
            "order": ["notes", "clock"]
        }));

        assert_full_permutation(&layout);
        assert_eq!(&layout.order[..2], &[WidgetName::Notes, WidgetName::Clock]);
        assert_eq!(layout.order[2], WidgetName::Calendar);
        assert!(!layout.is_visible(WidgetName::Notes));
        assert!(layout.is_visible(WidgetName::Clock));
    }

    #[test]
    fn garbled_payload_drops_unknown_and_duplicates() {
        let layout = WidgetLayout::from_payload(&json!({
            "visibility": { "weather": true, "clock": "yes", "calendar": false },
            "order": ["weather", "calendar", 42, "calendar", null, "todo_list"]
        }));

        assert_full_permutation(&layout);
        assert_eq!(layout.order[0], WidgetName::Calendar);
        assert_eq!(layout.order[1], WidgetName::TodoList);
        assert!(layout.is_visible(WidgetName::Clock));
        assert!(!layout.is_visible(WidgetName::Calendar));
    }

    #[test]
    fn legacy_flat_map_is_read_as_visibility() {
        let layout = WidgetLayout::from_payload(&json!({
            "clock": false,
            "announcements": false
        }));

        assert_eq!(layout.order, WidgetName::ALL.to_vec());
        assert!(!layout.is_visible(WidgetName::Clock));
        assert!(!layout.is_visible(WidgetName::Announcements));
        assert!(layout.is_visible(WidgetName::Notes));
    }

    #[test]
    fn non_object_payload_falls_back_to_defaults() {
        assert_eq!(WidgetLayout::from_payload(&Value::Null), WidgetLayout::default());
        assert_eq!(
            WidgetLayout::from_payload(&json!(["clock"])),
            WidgetLayout::default()
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let payloads = [
            json!({}),
            json!({ "order": ["quick_links", "quick_links", "notes"] }),
            json!({ "visibility": { "todo_list": false }, "order": [] }),
            json!({ "notes": false, "bogus": true }),
        ];

        for payload in payloads {
            let once = WidgetLayout::from_payload(&payload);
            let twice = WidgetLayout::from_payload(&serde_json::to_value(&once).unwrap());
            assert_eq!(once, twice);
            assert_eq!(once.clone().normalized(), once);
        }
    }
}
