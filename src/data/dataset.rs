use super::model::IncomeLevel::{High, Low, Medium};
use super::model::RegionRecord;

// ---------------------------------------------------------------------------
// Embedded regional snapshot
// ---------------------------------------------------------------------------

macro_rules! region {
    ($id:literal, $name:literal, $aqi:literal, $admissions:literal, $income:expr) => {
        RegionRecord {
            id: $id,
            name: $name,
            aqi: $aqi,
            hospital_admissions: $admissions,
            income_level: $income,
        }
    };
}

/// All regions, in display order.
pub static REGIONS: [RegionRecord; 15] = [
    region!("MH", "Maharashtra", 150, 50_000, High),
    region!("DL", "Delhi", 280, 80_000, High),
    region!("KA", "Karnataka", 120, 30_000, Medium),
    region!("TN", "Tamil Nadu", 90, 25_000, Medium),
    region!("UP", "Uttar Pradesh", 220, 70_000, Low),
    region!("WB", "West Bengal", 180, 45_000, Low),
    region!("GJ", "Gujarat", 110, 28_000, Medium),
    region!("RJ", "Rajasthan", 190, 55_000, Low),
    region!("MP", "Madhya Pradesh", 170, 40_000, Low),
    region!("PB", "Punjab", 130, 32_000, Medium),
    region!("HR", "Haryana", 160, 38_000, High),
    region!("KL", "Kerala", 80, 20_000, High),
    region!("AP", "Andhra Pradesh", 100, 27_000, Medium),
    region!("TG", "Telangana", 95, 26_000, High),
    region!("OD", "Odisha", 200, 60_000, Low),
];

pub fn regions() -> &'static [RegionRecord] {
    &REGIONS
}

pub fn find(id: &str) -> Option<&'static RegionRecord> {
    REGIONS.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn ids_are_unique() {
        let ids: BTreeSet<_> = regions().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), regions().len());
    }

    #[test]
    fn aqi_within_domain() {
        assert!(regions().iter().all(|r| r.aqi <= 500));
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find("DL").map(|r| r.name), Some("Delhi"));
        assert!(find("XX").is_none());
    }
}
