//! # Styling
//!
//! Global egui style and the few colors the panels share.

use eframe::egui;

pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 40, 40);
pub const OVER_BUDGET_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 90, 30);
pub const HEADER_FILL: egui::Color32 = egui::Color32::from_rgb(70, 90, 140);

/// Setup the application-wide egui style
pub fn setup_style(ctx: &egui::Context) {
    ctx.style_mut(|style| {
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(22.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(15.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::new(15.0, egui::FontFamily::Proportional),
        );

        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.visuals.widgets.inactive.rounding = egui::Rounding::same(6.0);
        style.visuals.widgets.active.rounding = egui::Rounding::same(6.0);
        style.visuals.widgets.hovered.rounding = egui::Rounding::same(6.0);
    });
}

/// Draw a column header cell with a solid fill
pub fn header_cell(ui: &mut egui::Ui, text: &str) {
    let rect = ui.max_rect();
    ui.painter().rect_filled(rect, egui::Rounding::ZERO, HEADER_FILL);
    ui.colored_label(egui::Color32::WHITE, egui::RichText::new(text).strong());
}

pub fn error_label(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).color(ERROR_COLOR));
}
