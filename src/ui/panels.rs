use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::dataset;
use crate::data::filter::{admissions_ceiling_from_input, AQI_DOMAIN_MAX};
use crate::data::model::{format_thousands, parse_thousands, IncomeLevel};
use crate::export::ExportFormat;
use crate::state::{Action, DashboardState};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Edits are pushed to `actions`.
pub fn side_panel(ui: &mut Ui, state: &DashboardState, actions: &mut Vec<Action>) {
    let criteria = state.criteria();

    ui.heading("Filter Data");
    ui.separator();

    // ---- State ----
    ui.strong("State");
    let current = criteria
        .state
        .as_deref()
        .and_then(dataset::find)
        .map(|r| r.name)
        .unwrap_or("Select a State");
    egui::ComboBox::from_id_salt("state_filter")
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(criteria.state.is_none(), "Select a State")
                .clicked()
            {
                actions.push(Action::SetState(None));
            }
            for region in dataset::regions() {
                let is_current = criteria.state.as_deref() == Some(region.id);
                if ui.selectable_label(is_current, region.name).clicked() {
                    actions.push(Action::SetState(Some(region.id.to_string())));
                }
            }
        });
    ui.add_space(8.0);

    // ---- AQI range ----
    ui.strong("AQI Range");
    ui.horizontal(|ui: &mut Ui| {
        let mut min = criteria.aqi_min;
        let mut max = criteria.aqi_max;
        if ui
            .add(egui::DragValue::new(&mut min).range(0..=AQI_DOMAIN_MAX).prefix("min "))
            .changed()
        {
            actions.push(Action::SetAqiMin(min));
        }
        if ui
            .add(egui::DragValue::new(&mut max).range(0..=AQI_DOMAIN_MAX).prefix("max "))
            .changed()
        {
            actions.push(Action::SetAqiMax(max));
        }
    });
    ui.add_space(8.0);

    // ---- Admissions ceiling ----
    ui.strong("Max Hospital Admissions");
    let mut ceiling = criteria.admissions_ceiling.unwrap_or(0);
    if ui
        .add(
            egui::DragValue::new(&mut ceiling)
                .range(0..=10_000_000u32)
                .speed(500.0)
                .custom_formatter(|n, _| format_thousands(n as u64))
                .custom_parser(parse_thousands),
        )
        .on_hover_text("0 = no ceiling")
        .changed()
    {
        actions.push(Action::SetAdmissionsCeiling(admissions_ceiling_from_input(ceiling)));
    }
    if criteria.admissions_ceiling.is_none() {
        ui.label(RichText::new("no ceiling").weak());
    }
    ui.add_space(8.0);

    // ---- Income level ----
    ui.strong("Income Level");
    let current = criteria
        .income_level
        .map(IncomeLevel::label)
        .unwrap_or("All Income Levels");
    egui::ComboBox::from_id_salt("income_filter")
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(criteria.income_level.is_none(), "All Income Levels")
                .clicked()
            {
                actions.push(Action::SetIncomeLevel(None));
            }
            for level in IncomeLevel::ALL {
                if ui
                    .selectable_label(criteria.income_level == Some(level), level.label())
                    .clicked()
                {
                    actions.push(Action::SetIncomeLevel(Some(level)));
                }
            }
        });

    ui.add_space(12.0);
    ui.separator();
    if ui.button("Reset filters").clicked() {
        actions.push(Action::ResetFilters);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Non-fatal feedback shown in the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Render the top menu / toolbar. Returns the export the user asked for.
pub fn top_bar(ui: &mut Ui, state: &DashboardState, status: Option<&Status>) -> Option<ExportFormat> {
    let mut requested = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let has_rows = !state.view().is_empty();
            if ui
                .add_enabled(has_rows, egui::Button::new("Export CSV…"))
                .clicked()
            {
                requested = Some(ExportFormat::Csv);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_rows, egui::Button::new("Export JSON…"))
                .clicked()
            {
                requested = Some(ExportFormat::Json);
                ui.close_menu();
            }
            if ui
                .add_enabled(
                    state.selected_record().is_some(),
                    egui::Button::new("Export PDF…"),
                )
                .on_disabled_hover_text("Select a state first")
                .clicked()
            {
                requested = Some(ExportFormat::Pdf);
                ui.close_menu();
            }
        });

        ui.separator();

        let summary = state.summary();
        ui.label(format!(
            "{} of {} regions visible",
            summary.count,
            dataset::regions().len()
        ));
        if let Some(mean) = summary.mean_aqi {
            ui.separator();
            ui.label(format!("mean AQI {mean:.0}"));
        }
        if let Some(worst) = summary.worst {
            ui.label(format!("worst {} ({})", worst.name, worst.aqi));
        }
        if summary.high_aqi_count > 0 {
            ui.label(
                RichText::new(format!("{} above 200", summary.high_aqi_count))
                    .color(crate::color::HIGH_AQI_OUTLINE),
            );
        }
        ui.label(format!(
            "{} admissions",
            format_thousands(summary.total_admissions)
        ));

        match status {
            Some(Status::Info(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::LIGHT_GREEN));
            }
            Some(Status::Error(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });

    requested
}
