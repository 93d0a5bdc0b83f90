use crate::domain::entities::{ChartDataset, ChartKind, MetricSummary};
use crate::domain::services::ChartSpec;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use serde_json::Value;
use std::collections::HashMap;
use std::f32::consts::TAU;

pub const NO_DATA_MESSAGE: &str = "No data available for the selected filters";
pub const LOAD_FAILED_MESSAGE: &str = "Unable to load data right now";

const CHART_HEIGHT: f32 = 220.0;
const Y_TICKS: usize = 4;

const PALETTE: [Color32; 8] = [
    Color32::from_rgb(54, 162, 235),
    Color32::from_rgb(255, 99, 132),
    Color32::from_rgb(75, 192, 192),
    Color32::from_rgb(255, 159, 64),
    Color32::from_rgb(153, 102, 255),
    Color32::from_rgb(255, 205, 86),
    Color32::from_rgb(201, 203, 207),
    Color32::from_rgb(46, 204, 113),
];

/// Y-axis label: whole values as integers, others with one decimal.
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// A constructed chart bound to a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub id: u64,
    pub kind: ChartKind,
    pub dataset: ChartDataset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub visible: bool,
}

/// Per-chart view record: the selected chart type, the canvas, and the
/// empty-state element that replaces it.
#[derive(Debug, Clone)]
pub struct ChartView {
    kind: ChartKind,
    canvas_visible: bool,
    empty_state: Option<EmptyState>,
    empty_state_builds: usize,
    instance: Option<ChartInstance>,
}

impl ChartView {
    fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            canvas_visible: false,
            empty_state: None,
            empty_state_builds: 0,
            instance: None,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn is_canvas_visible(&self) -> bool {
        self.canvas_visible
    }

    pub fn empty_state(&self) -> Option<&EmptyState> {
        self.empty_state.as_ref().filter(|state| state.visible)
    }

    pub fn instance(&self) -> Option<&ChartInstance> {
        self.instance.as_ref()
    }

    /// How many times the empty-state element has been created.
    pub fn empty_state_builds(&self) -> usize {
        self.empty_state_builds
    }
}

enum SummaryView {
    Loaded(MetricSummary),
    Failed,
}

pub enum ChartViewAction {
    Reload(&'static ChartSpec),
}

pub struct ChartRenderer {
    views: HashMap<&'static str, ChartView>,
    summaries: HashMap<&'static str, SummaryView>,
    next_instance: u64,
    constructed: u64,
    destroyed: u64,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
            summaries: HashMap::new(),
            next_instance: 1,
            constructed: 0,
            destroyed: 0,
        }
    }

    pub fn view(&self, id: &str) -> Option<&ChartView> {
        self.views.get(id)
    }

    pub fn instances_constructed(&self) -> u64 {
        self.constructed
    }

    pub fn instances_destroyed(&self) -> u64 {
        self.destroyed
    }

    /// Renders fetched data for one chart. `None` means the fetch failed.
    pub fn render(&mut self, spec: &'static ChartSpec, data: Option<&Value>) {
        if spec.is_summary() {
            let summary = match data {
                Some(value) => SummaryView::Loaded(MetricSummary::from_value(value)),
                None => SummaryView::Failed,
            };
            self.summaries.insert(spec.id, summary);
            return;
        }

        let dataset = match data {
            Some(value) => ChartDataset::from_value(value),
            None => {
                self.show_empty(spec, LOAD_FAILED_MESSAGE);
                return;
            }
        };
        if dataset.is_empty() {
            self.show_empty(spec, NO_DATA_MESSAGE);
            return;
        }
        self.construct(spec, dataset);
    }

    /// Switches the chart type of one chart and redraws its current data.
    pub fn set_kind(&mut self, spec: &'static ChartSpec, kind: ChartKind) {
        let view = self.view_mut(spec);
        if view.kind == kind {
            return;
        }
        view.kind = kind;
        if let Some(dataset) = view.instance.as_ref().map(|i| i.dataset.clone()) {
            self.construct(spec, dataset);
        }
    }

    fn view_mut(&mut self, spec: &'static ChartSpec) -> &mut ChartView {
        self.views
            .entry(spec.id)
            .or_insert_with(|| ChartView::new(spec.default_kind()))
    }

    fn destroy(&mut self, spec: &'static ChartSpec) {
        if let Some(old) = self.view_mut(spec).instance.take() {
            tracing::debug!("Destroying chart instance {} on {}", old.id, spec.id);
            self.destroyed += 1;
        }
    }

    fn construct(&mut self, spec: &'static ChartSpec, dataset: ChartDataset) {
        self.destroy(spec);

        let id = self.next_instance;
        self.next_instance += 1;
        self.constructed += 1;

        let view = self.view_mut(spec);
        view.canvas_visible = true;
        if let Some(empty) = view.empty_state.as_mut() {
            empty.visible = false;
        }
        view.instance = Some(ChartInstance {
            id,
            kind: view.kind,
            dataset,
        });
    }

    fn show_empty(&mut self, spec: &'static ChartSpec, message: &str) {
        self.destroy(spec);

        let view = self.view_mut(spec);
        view.canvas_visible = false;
        if view.empty_state.is_none() {
            view.empty_state_builds += 1;
        }
        let empty = view.empty_state.get_or_insert_with(|| EmptyState {
            message: String::new(),
            visible: true,
        });
        empty.message = message.to_string();
        empty.visible = true;
    }

    pub fn show_summary(&self, ui: &mut egui::Ui, spec: &'static ChartSpec) -> Option<ChartViewAction> {
        let mut action = None;
        ui.horizontal_wrapped(|ui| {
            match self.summaries.get(spec.id) {
                Some(SummaryView::Loaded(summary)) if !summary.figures.is_empty() => {
                    for (name, value) in &summary.figures {
                        metric_card(ui, name, *value);
                    }
                }
                Some(SummaryView::Loaded(_)) => {
                    ui.weak(NO_DATA_MESSAGE);
                }
                Some(SummaryView::Failed) => {
                    ui.weak(LOAD_FAILED_MESSAGE);
                    if ui.small_button("⟳").on_hover_text("Reload").clicked() {
                        action = Some(ChartViewAction::Reload(spec));
                    }
                }
                None => {
                    ui.spinner();
                }
            }
        });
        action
    }

    /// Draws one chart card with its own type switcher.
    pub fn show_chart(&mut self, ui: &mut egui::Ui, spec: &'static ChartSpec) -> Option<ChartViewAction> {
        let mut action = None;
        let mut chosen_kind = None;
        let current = self.view_mut(spec).kind;

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.strong(spec.title);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("⟳").on_hover_text("Reload").clicked() {
                        action = Some(ChartViewAction::Reload(spec));
                    }
                    for kind in ChartKind::ALL.into_iter().rev() {
                        if ui.selectable_label(current == kind, kind.to_string()).clicked() {
                            chosen_kind = Some(kind);
                        }
                    }
                });
            });

            let view = self.views.get(spec.id);
            match view {
                Some(view) if view.canvas_visible => {
                    if let Some(instance) = &view.instance {
                        paint_chart(ui, instance);
                    }
                }
                Some(view) => {
                    if let Some(empty) = view.empty_state() {
                        ui.allocate_ui(Vec2::new(ui.available_width(), CHART_HEIGHT), |ui| {
                            ui.centered_and_justified(|ui| ui.weak(&empty.message));
                        });
                    }
                }
                None => {
                    ui.allocate_ui(Vec2::new(ui.available_width(), CHART_HEIGHT), |ui| {
                        ui.centered_and_justified(|ui| ui.spinner());
                    });
                }
            }
        });

        if let Some(kind) = chosen_kind {
            self.set_kind(spec, kind);
        }
        action
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn metric_card(ui: &mut egui::Ui, name: &str, value: f64) {
    egui::Frame::group(ui.style())
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_min_width(140.0);
            ui.vertical(|ui| {
                ui.weak(name.replace('_', " "));
                ui.heading(format_tick(value));
            });
        });
}

fn paint_chart(ui: &mut egui::Ui, instance: &ChartInstance) {
    let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let text_color = ui.visuals().text_color();
    let grid = ui.visuals().widgets.noninteractive.bg_stroke;

    match instance.kind {
        ChartKind::Doughnut => paint_doughnut(&painter, rect, &instance.dataset, text_color),
        kind => {
            let plot = Rect::from_min_max(
                Pos2::new(rect.left() + 48.0, rect.top() + 8.0),
                Pos2::new(rect.right() - 8.0, rect.bottom() - 24.0),
            );
            let max = instance.dataset.max_count().max(1.0);

            for i in 0..=Y_TICKS {
                let value = max * i as f64 / Y_TICKS as f64;
                let y = plot.bottom() - plot.height() * (i as f32 / Y_TICKS as f32);
                painter.line_segment([Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)], grid);
                painter.text(
                    Pos2::new(plot.left() - 6.0, y),
                    Align2::RIGHT_CENTER,
                    format_tick(value),
                    FontId::proportional(11.0),
                    text_color,
                );
            }

            let points = &instance.dataset.points;
            let slot = plot.width() / points.len().max(1) as f32;
            let y_of = |count: f64| plot.bottom() - plot.height() * (count / max) as f32;

            if kind == ChartKind::Line {
                let line: Vec<Pos2> = points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| Pos2::new(plot.left() + slot * (i as f32 + 0.5), y_of(p.count)))
                    .collect();
                painter.add(egui::Shape::line(line.clone(), Stroke::new(2.0, PALETTE[0])));
                for point in line {
                    painter.circle_filled(point, 3.0, PALETTE[0]);
                }
            } else {
                for (i, point) in points.iter().enumerate() {
                    let left = plot.left() + slot * i as f32 + slot * 0.15;
                    let bar = Rect::from_min_max(
                        Pos2::new(left, y_of(point.count)),
                        Pos2::new(left + slot * 0.7, plot.bottom()),
                    );
                    painter.rect_filled(bar, 2.0, PALETTE[i % PALETTE.len()]);
                }
            }

            for (i, point) in points.iter().enumerate() {
                painter.text(
                    Pos2::new(plot.left() + slot * (i as f32 + 0.5), plot.bottom() + 4.0),
                    Align2::CENTER_TOP,
                    &point.label,
                    FontId::proportional(10.0),
                    text_color,
                );
            }
        }
    }
}

fn paint_doughnut(painter: &egui::Painter, rect: Rect, dataset: &ChartDataset, text_color: Color32) {
    let total = dataset.total();
    if total <= 0.0 {
        return;
    }
    let center = Pos2::new(rect.left() + rect.height() / 2.0 + 8.0, rect.center().y);
    let outer = rect.height() / 2.0 - 8.0;
    let inner = outer * 0.55;

    let mut start = -TAU / 4.0;
    for (i, point) in dataset.points.iter().enumerate() {
        let sweep = TAU * (point.count / total) as f32;
        if sweep <= 0.0 {
            continue;
        }
        let color = PALETTE[i % PALETTE.len()];
        let steps = ((sweep / TAU) * 64.0).ceil().max(1.0) as usize;

        let mut mesh = egui::Mesh::default();
        for step in 0..=steps {
            let angle = start + sweep * step as f32 / steps as f32;
            let dir = Vec2::angled(angle);
            mesh.colored_vertex(center + dir * outer, color);
            mesh.colored_vertex(center + dir * inner, color);
        }
        for step in 0..steps as u32 {
            let base = step * 2;
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base + 1, base + 3, base + 2);
        }
        painter.add(egui::Shape::mesh(mesh));

        let legend = Pos2::new(center.x + outer + 24.0, rect.top() + 12.0 + i as f32 * 18.0);
        painter.rect_filled(Rect::from_center_size(legend, Vec2::splat(10.0)), 2.0, color);
        painter.text(
            legend + Vec2::new(10.0, 0.0),
            Align2::LEFT_CENTER,
            format!("{} ({})", point.label, format_tick(point.count)),
            FontId::proportional(11.0),
            text_color,
        );
        start += sweep;
    }
}
