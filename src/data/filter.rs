use super::model::{IncomeLevel, RegionRecord};

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

pub const AQI_DOMAIN_MAX: u16 = 500;
pub const DEFAULT_ADMISSIONS_CEILING: u32 = 100_000;

/// Active filter selections. All set fields are AND-combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Region id to restrict to. `None` = any region.
    pub state: Option<String>,
    /// Inclusive lower AQI bound.
    pub aqi_min: u16,
    /// Inclusive upper AQI bound.
    pub aqi_max: u16,
    /// Maximum annual admissions. `None` = no ceiling.
    pub admissions_ceiling: Option<u32>,
    pub income_level: Option<IncomeLevel>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            state: None,
            aqi_min: 0,
            aqi_max: AQI_DOMAIN_MAX,
            admissions_ceiling: Some(DEFAULT_ADMISSIONS_CEILING),
            income_level: None,
        }
    }
}

impl FilterCriteria {
    /// Whether a single record passes every active predicate.
    pub fn matches(&self, record: &RegionRecord) -> bool {
        let state_ok = self.state.as_deref().map_or(true, |id| record.id == id);
        let aqi_ok = (self.aqi_min..=self.aqi_max).contains(&record.aqi);
        let admissions_ok = self
            .admissions_ceiling
            .map_or(true, |ceiling| record.hospital_admissions <= ceiling);
        let income_ok = self
            .income_level
            .map_or(true, |level| record.income_level == level);

        state_ok && aqi_ok && admissions_ok && income_ok
    }
}

/// Map the numeric admissions input to a ceiling. The input widget has no
/// "empty" state, so `0` stands for "no ceiling".
pub fn admissions_ceiling_from_input(value: u32) -> Option<u32> {
    (value != 0).then_some(value)
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Records passing all filters, in dataset order.
pub fn filtered_view<'a>(
    dataset: &'a [RegionRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a RegionRecord> {
    dataset.iter().filter(|r| criteria.matches(r)).collect()
}

/// Look up a region by id within a view. Absence is "no selection".
pub fn select<'a>(view: &[&'a RegionRecord], id: &str) -> Option<&'a RegionRecord> {
    view.iter().copied().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::regions;

    fn delhi() -> RegionRecord {
        RegionRecord {
            id: "DL",
            name: "Delhi",
            aqi: 290,
            hospital_admissions: 45_000,
            income_level: IncomeLevel::Medium,
        }
    }

    fn unbounded() -> FilterCriteria {
        FilterCriteria {
            admissions_ceiling: None,
            ..FilterCriteria::default()
        }
    }

    #[test]
    fn default_criteria_keep_everything() {
        let view = filtered_view(regions(), &FilterCriteria::default());
        assert_eq!(view.len(), regions().len());
        let ids: Vec<_> = view.iter().map(|r| r.id).collect();
        let all: Vec<_> = regions().iter().map(|r| r.id).collect();
        assert_eq!(ids, all);
    }

    #[test]
    fn aqi_range_includes_and_excludes() {
        let data = [delhi()];
        let high = FilterCriteria {
            aqi_min: 200,
            aqi_max: 500,
            ..unbounded()
        };
        assert_eq!(filtered_view(&data, &high).len(), 1);

        let low = FilterCriteria {
            aqi_max: 150,
            ..unbounded()
        };
        assert!(filtered_view(&data, &low).is_empty());
    }

    #[test]
    fn aqi_bounds_are_inclusive() {
        let data = [delhi()];
        let exact = FilterCriteria {
            aqi_min: 290,
            aqi_max: 290,
            ..unbounded()
        };
        assert_eq!(filtered_view(&data, &exact).len(), 1);
    }

    #[test]
    fn zero_admissions_input_means_no_ceiling() {
        assert_eq!(admissions_ceiling_from_input(0), None);
        assert_eq!(admissions_ceiling_from_input(30_000), Some(30_000));

        let criteria = FilterCriteria {
            admissions_ceiling: admissions_ceiling_from_input(0),
            ..FilterCriteria::default()
        };
        assert_eq!(filtered_view(regions(), &criteria).len(), regions().len());
    }

    #[test]
    fn admissions_ceiling_is_inclusive() {
        let criteria = FilterCriteria {
            admissions_ceiling: Some(30_000),
            ..FilterCriteria::default()
        };
        let view = filtered_view(regions(), &criteria);
        assert!(!view.is_empty());
        assert!(view.iter().all(|r| r.hospital_admissions <= 30_000));
        assert!(view.iter().any(|r| r.id == "KA"));
    }

    #[test]
    fn state_and_income_filters() {
        let by_state = FilterCriteria {
            state: Some("KL".to_string()),
            ..FilterCriteria::default()
        };
        let view = filtered_view(regions(), &by_state);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Kerala");

        let by_income = FilterCriteria {
            income_level: Some(IncomeLevel::Low),
            ..FilterCriteria::default()
        };
        let view = filtered_view(regions(), &by_income);
        assert_eq!(view.len(), 5);
        assert!(view.iter().all(|r| r.income_level == IncomeLevel::Low));
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let criteria = FilterCriteria {
            state: Some("KL".to_string()),
            income_level: Some(IncomeLevel::Low),
            ..FilterCriteria::default()
        };
        assert!(filtered_view(regions(), &criteria).is_empty());
    }

    #[test]
    fn view_is_subset_and_every_element_matches() {
        let samples = [
            FilterCriteria::default(),
            FilterCriteria {
                aqi_min: 100,
                aqi_max: 200,
                admissions_ceiling: Some(50_000),
                ..FilterCriteria::default()
            },
            FilterCriteria {
                income_level: Some(IncomeLevel::High),
                admissions_ceiling: None,
                ..FilterCriteria::default()
            },
        ];
        for criteria in &samples {
            let view = filtered_view(regions(), criteria);
            for r in &view {
                assert!(regions().contains(*r));
                assert!(criteria.matches(r));
            }
            let excluded = regions().iter().filter(|r| !view.contains(r));
            for r in excluded {
                assert!(!criteria.matches(r));
            }
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let criteria = FilterCriteria {
            aqi_min: 120,
            admissions_ceiling: Some(60_000),
            ..FilterCriteria::default()
        };
        let first = filtered_view(regions(), &criteria);
        let second = filtered_view(regions(), &criteria);
        assert_eq!(first, second);

        let refiltered: Vec<_> = first.iter().copied().filter(|r| criteria.matches(r)).collect();
        assert_eq!(first, refiltered);
    }

    #[test]
    fn selecting_absent_id_yields_none() {
        let criteria = FilterCriteria {
            income_level: Some(IncomeLevel::High),
            ..FilterCriteria::default()
        };
        let view = filtered_view(regions(), &criteria);
        assert!(select(&view, "UP").is_none());
        assert_eq!(select(&view, "KL").map(|r| r.name), Some("Kerala"));
    }
}
