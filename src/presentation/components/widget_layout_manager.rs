use crate::domain::entities::{WidgetLayout, WidgetName};
use crate::domain::errors::ApiError;

/// Which half of the hovered card the pointer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

/// In-memory widget layout with unsaved-change tracking. `displayed` mirrors
/// the board while a drag is in progress; the stored order only changes
/// when the drag ends.
pub struct WidgetLayoutManager {
    layout: WidgetLayout,
    displayed: Vec<WidgetName>,
    dragging: Option<WidgetName>,
    dirty: bool,
}

impl WidgetLayoutManager {
    pub fn new() -> Self {
        let layout = WidgetLayout::default();
        Self {
            displayed: layout.order.clone(),
            layout,
            dragging: None,
            dirty: false,
        }
    }

    pub fn layout(&self) -> &WidgetLayout {
        &self.layout
    }

    pub fn displayed_order(&self) -> &[WidgetName] {
        &self.displayed
    }

    pub fn dragging(&self) -> Option<WidgetName> {
        self.dragging
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the layout with a freshly loaded one, discarding unsaved
    /// changes.
    pub fn load(&mut self, layout: WidgetLayout) {
        self.layout = layout.normalized();
        self.displayed = self.layout.order.clone();
        self.dragging = None;
        self.dirty = false;
    }

    pub fn on_loaded(&mut self, result: Result<WidgetLayout, ApiError>) {
        match result {
            Ok(layout) => {
                tracing::debug!("Loaded widget layout");
                self.load(layout);
            }
            Err(e) => tracing::warn!("Could not load widget preferences, keeping current layout: {}", e),
        }
    }

    pub fn hide(&mut self, name: WidgetName) {
        self.set_visible(name, false);
    }

    pub fn show(&mut self, name: WidgetName) {
        self.set_visible(name, true);
    }

    fn set_visible(&mut self, name: WidgetName, visible: bool) {
        let previous = self.layout.visibility.insert(name, visible);
        if previous != Some(visible) {
            self.dirty = true;
        }
    }

    pub fn drag_start(&mut self, name: WidgetName) {
        self.dragging = Some(name);
    }

    /// Places the dragged widget directly before or after `target` on the
    /// board. Repeating the same call leaves the order unchanged.
    pub fn drag_over(&mut self, target: WidgetName, side: DropSide) {
        let Some(dragged) = self.dragging else {
            return;
        };
        if dragged == target {
            return;
        }
        let Some(from) = self.displayed.iter().position(|n| *n == dragged) else {
            return;
        };
        let name = self.displayed.remove(from);
        let Some(to) = self.displayed.iter().position(|n| *n == target) else {
            self.displayed.insert(from, name);
            return;
        };
        match side {
            DropSide::Before => self.displayed.insert(to, name),
            DropSide::After => self.displayed.insert(to + 1, name),
        }
    }

    /// Reads the order back from the board. Dirty only when it moved.
    pub fn drag_end(&mut self) {
        if self.dragging.take().is_none() {
            return;
        }
        if self.displayed != self.layout.order {
            self.layout.order = self.displayed.clone();
            self.dirty = true;
        }
    }

    /// Layout to persist, or `None` when there is nothing unsaved.
    pub fn save(&self) -> Option<WidgetLayout> {
        self.dirty.then(|| self.layout.clone())
    }

    /// Edits made while the save was in flight keep the layout dirty.
    pub fn on_saved(&mut self, result: Result<WidgetLayout, ApiError>) {
        match result {
            Ok(saved) => self.dirty = self.layout != saved,
            Err(e) => tracing::error!("Failed to save widget layout: {}", e),
        }
    }

    /// Applies the server defaults. Returns the alert to show on failure.
    pub fn on_reset(&mut self, result: Result<WidgetLayout, ApiError>) -> Option<String> {
        match result {
            Ok(layout) => {
                self.load(layout);
                None
            }
            Err(e) => {
                tracing::error!("Failed to reset widget layout: {}", e);
                Some(match e.server_message() {
                    Some(message) => format!("Could not reset widgets: {}", message),
                    None => "Could not reset widgets. Please try again.".to_string(),
                })
            }
        }
    }
}

impl Default for WidgetLayoutManager {
    fn default() -> Self {
        Self::new()
    }
}
