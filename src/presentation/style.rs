use crate::domain::entities::ThemeMode;
use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Applies sizing and the chosen theme. `system_dark` is the platform
/// preference observed at startup.
pub fn configure_style(ctx: &Context, theme: ThemeMode, system_dark: bool) {
    let mut style = (*ctx.style()).clone();

    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(12.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.interact_size = egui::vec2(48.0, 26.0);

    let dark = match theme {
        ThemeMode::System => system_dark,
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
    };
    let mut visuals = if dark { Visuals::dark() } else { Visuals::light() };

    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.widgets.open.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(10.0);
    visuals.menu_rounding = Rounding::same(6.0);

    if visuals.dark_mode {
        visuals.window_fill = Color32::from_gray(20);
        visuals.panel_fill = Color32::from_gray(28);
        visuals.widgets.inactive.weak_bg_fill = Color32::from_gray(45);
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_gray(60));
        visuals.widgets.hovered.weak_bg_fill = Color32::from_gray(60);
        visuals.selection.bg_fill = Color32::from_rgb(0, 102, 204);
    } else {
        visuals.window_fill = Color32::WHITE;
        visuals.panel_fill = Color32::from_gray(244);
        visuals.widgets.inactive.weak_bg_fill = Color32::from_gray(230);
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_gray(200));
        visuals.selection.bg_fill = Color32::from_rgb(0, 102, 204);
    }

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}
