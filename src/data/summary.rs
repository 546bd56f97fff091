use super::model::RegionRecord;

/// Aggregate metrics over a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSummary {
    pub count: usize,
    pub mean_aqi: Option<f64>,
    pub worst: Option<&'static RegionRecord>,
    pub total_admissions: u64,
    pub high_aqi_count: usize,
}

impl ViewSummary {
    pub fn of(view: &[&'static RegionRecord]) -> Self {
        let count = view.len();
        let aqi_sum: u64 = view.iter().map(|r| u64::from(r.aqi)).sum();
        let mean_aqi = (count > 0).then(|| aqi_sum as f64 / count as f64);

        ViewSummary {
            count,
            mean_aqi,
            worst: view.iter().copied().max_by_key(|r| r.aqi),
            total_admissions: view.iter().map(|r| u64::from(r.hospital_admissions)).sum(),
            high_aqi_count: view.iter().filter(|r| r.is_high_aqi()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::{find, regions};

    #[test]
    fn empty_view() {
        let s = ViewSummary::of(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean_aqi, None);
        assert!(s.worst.is_none());
        assert_eq!(s.total_admissions, 0);
    }

    #[test]
    fn full_dataset() {
        let view: Vec<_> = regions().iter().collect();
        let s = ViewSummary::of(&view);
        assert_eq!(s.count, 15);
        assert_eq!(s.worst.map(|r| r.id), Some("DL"));
        // DL 280, UP 220
        assert_eq!(s.high_aqi_count, 2);
        assert_eq!(s.total_admissions, 626_000);
    }

    #[test]
    fn mean_of_two() {
        let view = [find("KL").unwrap(), find("TN").unwrap()];
        let s = ViewSummary::of(&view);
        assert_eq!(s.mean_aqi, Some(85.0));
    }
}
