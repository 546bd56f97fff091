use eframe::egui::{self, Color32, RichText, Sense, Stroke, Ui};

use crate::color::{aqi_color, legend_entries, tint, HIGH_AQI_OUTLINE, SELECTED_FILL};
use crate::data::dataset;
use crate::state::{Action, DashboardState};

const TILE_SIZE: egui::Vec2 = egui::vec2(120.0, 36.0);

// ---------------------------------------------------------------------------
// Region tile grid
// ---------------------------------------------------------------------------

/// All regions as clickable tiles. Regions outside the filtered view are
/// dimmed; clicking one yields no selection.
pub fn region_grid(ui: &mut Ui, state: &DashboardState, actions: &mut Vec<Action>) {
    ui.heading("India Map Overview (Simplified)");
    ui.add_space(4.0);

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for region in dataset::regions() {
            let selected = state.selected_id() == Some(region.id);
            let visible = state.view().iter().any(|r| r.id == region.id);

            let (fill, text_color) = match (selected, visible) {
                (true, _) => (SELECTED_FILL, Color32::WHITE),
                (false, true) => (tint(aqi_color(region.aqi), 0.85), Color32::BLACK),
                (false, false) => (Color32::from_gray(60), Color32::GRAY),
            };
            let stroke = if region.is_high_aqi() {
                Stroke::new(2.0, HIGH_AQI_OUTLINE)
            } else {
                Stroke::new(1.0, Color32::DARK_GRAY)
            };

            let tile = egui::Button::new(RichText::new(region.name).color(text_color))
                .fill(fill)
                .stroke(stroke)
                .min_size(TILE_SIZE);
            if ui
                .add(tile)
                .on_hover_text(format!("{} (AQI: {})", region.name, region.aqi))
                .clicked()
            {
                actions.push(Action::Select(region.id.to_string()));
            }
        }
    });

    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui: &mut Ui| {
        swatch(ui, SELECTED_FILL, "Selected State");
        swatch(ui, Color32::from_gray(60), "Filtered out");
        swatch(ui, HIGH_AQI_OUTLINE, "High AQI (>200)");
    });
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, color) in legend_entries() {
            swatch(ui, color, label);
        }
    });
}

fn swatch(ui: &mut Ui, color: Color32, label: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
    ui.label(RichText::new(label).small());
    ui.add_space(6.0);
}
