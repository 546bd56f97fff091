use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, HLine, Legend, LineStyle, Plot};

use crate::color::{aqi_color, HIGH_AQI_OUTLINE};
use crate::data::model::HIGH_AQI_THRESHOLD;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// AQI bar chart of the filtered view
// ---------------------------------------------------------------------------

pub fn aqi_chart(ui: &mut Ui, state: &DashboardState) {
    let view = state.view();
    if view.is_empty() {
        ui.label("No regions match the current filters.");
        return;
    }

    let bars: Vec<Bar> = view
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, f64::from(r.aqi))
                .name(r.name)
                .fill(aqi_color(r.aqi))
                .width(0.7)
        })
        .collect();

    let ids: Vec<&'static str> = view.iter().map(|r| r.id).collect();

    Plot::new("aqi_chart")
        .legend(Legend::default())
        .height(220.0)
        .y_axis_label("AQI")
        .include_y(0.0)
        .include_y(f64::from(HIGH_AQI_THRESHOLD) + 50.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                return String::new();
            }
            ids.get(idx as usize)
                .map(|id| id.to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("AQI"));
            plot_ui.hline(
                HLine::new(f64::from(HIGH_AQI_THRESHOLD))
                    .name("High AQI (>200)")
                    .color(HIGH_AQI_OUTLINE)
                    .style(LineStyle::dashed_loose()),
            );
        });
}
