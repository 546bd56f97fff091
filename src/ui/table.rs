use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::aqi_color;
use crate::data::model::format_thousands;
use crate::state::{Action, DashboardState};

const HEADERS: [&str; 5] = ["State", "AQI", "Band", "Hospital Admissions", "Income Level"];

/// Filtered view as a table. Clicking a name selects the region.
pub fn region_table(ui: &mut Ui, state: &DashboardState, actions: &mut Vec<Action>) {
    ui.strong(format!("Filtered regions ({})", state.view().len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(130.0))
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(170.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .min_scrolled_height(0.0)
        .max_scroll_height(260.0)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for record in state.view() {
                let selected = state.selected_id() == Some(record.id);
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        if ui.selectable_label(selected, record.name).clicked() {
                            actions.push(if selected {
                                Action::ClearSelection
                            } else {
                                Action::Select(record.id.to_string())
                            });
                        }
                    });
                    row.col(|ui| {
                        ui.colored_label(aqi_color(record.aqi), record.aqi.to_string());
                    });
                    row.col(|ui| {
                        ui.label(record.aqi_band().label());
                    });
                    row.col(|ui| {
                        ui.label(format_thousands(u64::from(record.hospital_admissions)));
                    });
                    row.col(|ui| {
                        ui.label(record.income_level.label());
                    });
                });
            }
        });
}
