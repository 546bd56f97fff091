use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// IncomeLevel – predominant income bracket of a region
// ---------------------------------------------------------------------------

/// Returned for any income label outside the known brackets.
pub const FALLBACK_SUGGESTION: &str = "No specific suggestion";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IncomeLevel {
    Low,
    Medium,
    High,
}

impl IncomeLevel {
    pub const ALL: [IncomeLevel; 3] = [IncomeLevel::Low, IncomeLevel::Medium, IncomeLevel::High];

    pub fn label(self) -> &'static str {
        match self {
            IncomeLevel::Low => "Low",
            IncomeLevel::Medium => "Medium",
            IncomeLevel::High => "High",
        }
    }

    /// Air-purifier product line recommended for this bracket.
    pub fn product_suggestion(self) -> &'static str {
        match self {
            IncomeLevel::High => {
                "Premium, feature-rich air purifiers (e.g., IoT enabled, advanced filtration, sleek design)"
            }
            IncomeLevel::Medium => {
                "Mid-range air purifiers (e.g., good filtration, essential features, balanced pricing)"
            }
            IncomeLevel::Low => {
                "Economical, basic air purifiers (e.g., essential filtration, affordable, durable)"
            }
        }
    }
}

impl fmt::Display for IncomeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown income level '{0}'")]
pub struct UnknownIncomeLevel(pub String);

impl FromStr for IncomeLevel {
    type Err = UnknownIncomeLevel;

    /// Case-insensitive; `Middle` is accepted for [`IncomeLevel::Medium`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(IncomeLevel::Low),
            "medium" | "middle" => Ok(IncomeLevel::Medium),
            "high" => Ok(IncomeLevel::High),
            _ => Err(UnknownIncomeLevel(s.to_string())),
        }
    }
}

/// Suggestion lookup over free text. Never fails: unknown labels get
/// [`FALLBACK_SUGGESTION`].
pub fn product_suggestion_for(label: &str) -> &'static str {
    label
        .parse::<IncomeLevel>()
        .map(IncomeLevel::product_suggestion)
        .unwrap_or(FALLBACK_SUGGESTION)
}

// ---------------------------------------------------------------------------
// AqiBand – severity classification of an AQI reading
// ---------------------------------------------------------------------------

/// Readings strictly above this are flagged on the overview map.
pub const HIGH_AQI_THRESHOLD: u16 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AqiBand {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiBand {
    /// Inclusive upper bound of each band, in ascending order. Anything above
    /// the last bound is [`AqiBand::Hazardous`].
    pub const THRESHOLDS: [(u16, AqiBand); 5] = [
        (50, AqiBand::Good),
        (100, AqiBand::Moderate),
        (150, AqiBand::UnhealthySensitive),
        (200, AqiBand::Unhealthy),
        (300, AqiBand::VeryUnhealthy),
    ];

    pub fn classify(aqi: u16) -> AqiBand {
        Self::THRESHOLDS
            .iter()
            .find(|(upper, _)| aqi <= *upper)
            .map(|(_, band)| *band)
            .unwrap_or(AqiBand::Hazardous)
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiBand::Good => "Good",
            AqiBand::Moderate => "Moderate",
            AqiBand::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AqiBand::Unhealthy => "Unhealthy",
            AqiBand::VeryUnhealthy => "Very Unhealthy",
            AqiBand::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AqiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RegionRecord – one state's snapshot
// ---------------------------------------------------------------------------

/// Environmental and economic snapshot for one state / region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRecord {
    /// Short state code, unique within the dataset.
    pub id: &'static str,
    pub name: &'static str,
    /// Air quality index, 0–500.
    pub aqi: u16,
    /// Annual hospital admissions.
    pub hospital_admissions: u32,
    pub income_level: IncomeLevel,
}

impl RegionRecord {
    pub fn product_suggestion(&self) -> &'static str {
        self.income_level.product_suggestion()
    }

    pub fn aqi_band(&self) -> AqiBand {
        AqiBand::classify(self.aqi)
    }

    pub fn is_high_aqi(&self) -> bool {
        self.aqi > HIGH_AQI_THRESHOLD
    }
}

/// Format an integer with comma thousands separators (`80000` → `80,000`).
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Inverse of [`format_thousands`] for text typed into number fields.
/// Separators and surrounding whitespace are ignored.
pub fn parse_thousands(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    digits.parse().ok()
}
