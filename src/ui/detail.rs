use eframe::egui::{self, Color32, Rect, RichText, Ui};

use crate::color::{aqi_color, tint};
use crate::data::model::format_thousands;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Metrics for the selected region
// ---------------------------------------------------------------------------

/// Render the metric cards. Returns the screen rect they occupy, which is
/// the region cropped into a PDF export.
pub fn metrics(ui: &mut Ui, state: &DashboardState) -> Option<Rect> {
    let Some(record) = state.selected_record() else {
        ui.add_space(12.0);
        ui.label(
            RichText::new("Apply filters or select a state to view detailed metrics.").italics(),
        );
        return None;
    };

    let frame = egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(12.0)
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("Metrics for {}", record.name));
            ui.add_space(6.0);

            ui.horizontal_wrapped(|ui: &mut Ui| {
                let band = record.aqi_band();
                card(ui, "Current AQI:", &record.aqi.to_string(), Some(band.label()), Some(aqi_color(record.aqi)));
                card(
                    ui,
                    "Hospital Admissions (Annual):",
                    &format_thousands(u64::from(record.hospital_admissions)),
                    None,
                    None,
                );
                card(ui, "Predominant Income Level:", record.income_level.label(), None, None);
            });

            ui.add_space(6.0);
            egui::Frame::group(ui.style())
                .inner_margin(10.0)
                .show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.label("Product Type Suggestion:");
                    ui.label(RichText::new(record.product_suggestion()).strong());
                });
        });

    Some(frame.response.rect)
}

fn card(ui: &mut Ui, title: &str, value: &str, note: Option<&str>, accent: Option<Color32>) {
    let mut frame = egui::Frame::group(ui.style()).inner_margin(10.0);
    let text_color = accent.map(|_| Color32::BLACK);
    if let Some(color) = accent {
        frame = frame.fill(tint(color, 0.85));
    }

    frame.show(ui, |ui: &mut Ui| {
        ui.set_min_width(170.0);
        ui.vertical(|ui: &mut Ui| {
            let styled = |text: RichText| match text_color {
                Some(c) => text.color(c),
                None => text,
            };
            ui.label(styled(RichText::new(title)));
            ui.label(styled(RichText::new(value).heading().strong()));
            if let Some(note) = note {
                ui.label(styled(RichText::new(note).small()));
            }
        });
    });
}
