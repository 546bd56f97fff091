use crate::data::dataset;
use crate::data::filter::{filtered_view, select, FilterCriteria, AQI_DOMAIN_MAX};
use crate::data::model::{IncomeLevel, RegionRecord};
use crate::data::summary::ViewSummary;

// ---------------------------------------------------------------------------
// Actions emitted by the UI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetState(Option<String>),
    SetAqiMin(u16),
    SetAqiMax(u16),
    SetAdmissionsCeiling(Option<u32>),
    SetIncomeLevel(Option<IncomeLevel>),
    Select(String),
    ClearSelection,
    ResetFilters,
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Filter criteria plus everything derived from them. Never mutated in place:
/// every change goes through [`DashboardState::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    criteria: FilterCriteria,
    /// Criteria restored by [`Action::ResetFilters`].
    defaults: FilterCriteria,
    view: Vec<&'static RegionRecord>,
    summary: ViewSummary,
    selected: Option<&'static str>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(FilterCriteria::default())
    }
}

impl DashboardState {
    pub fn new(defaults: FilterCriteria) -> Self {
        let criteria = normalize(defaults);
        let view = filtered_view(dataset::regions(), &criteria);
        let summary = ViewSummary::of(&view);
        Self {
            defaults: criteria.clone(),
            criteria,
            view,
            summary,
            selected: None,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn view(&self) -> &[&'static RegionRecord] {
        &self.view
    }

    pub fn summary(&self) -> &ViewSummary {
        &self.summary
    }

    pub fn selected_id(&self) -> Option<&'static str> {
        self.selected
    }

    /// The selected region, if it is still part of the filtered view.
    pub fn selected_record(&self) -> Option<&'static RegionRecord> {
        self.selected.and_then(|id| select(&self.view, id))
    }

    pub fn reduce(self, action: Action) -> Self {
        log::debug!("reduce {action:?}");
        let mut criteria = self.criteria.clone();
        let mut selected = self.selected;

        match action {
            Action::SetState(state) => {
                selected = state.as_deref().and_then(dataset::find).map(|r| r.id);
                criteria.state = state;
            }
            Action::SetAqiMin(min) => {
                criteria.aqi_min = min.min(AQI_DOMAIN_MAX);
                criteria.aqi_max = criteria.aqi_max.max(criteria.aqi_min);
            }
            Action::SetAqiMax(max) => {
                criteria.aqi_max = max.min(AQI_DOMAIN_MAX);
                criteria.aqi_min = criteria.aqi_min.min(criteria.aqi_max);
            }
            Action::SetAdmissionsCeiling(ceiling) => criteria.admissions_ceiling = ceiling,
            Action::SetIncomeLevel(level) => criteria.income_level = level,
            Action::Select(id) => {
                let selected = select(&self.view, &id).map(|r| r.id);
                return Self { selected, ..self };
            }
            Action::ClearSelection => return Self { selected: None, ..self },
            Action::ResetFilters => {
                criteria = self.defaults.clone();
                selected = None;
            }
        }

        let view = filtered_view(dataset::regions(), &criteria);
        let summary = ViewSummary::of(&view);
        log::debug!("{} of {} regions visible", view.len(), dataset::regions().len());

        Self {
            criteria,
            defaults: self.defaults,
            view,
            summary,
            selected,
        }
    }
}

/// Clamp bounds into the AQI domain and restore `aqi_min <= aqi_max`.
fn normalize(mut criteria: FilterCriteria) -> FilterCriteria {
    criteria.aqi_max = criteria.aqi_max.min(AQI_DOMAIN_MAX);
    criteria.aqi_min = criteria.aqi_min.min(criteria.aqi_max);
    criteria
}
