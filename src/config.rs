use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::data::filter::{FilterCriteria, AQI_DOMAIN_MAX, DEFAULT_ADMISSIONS_CEILING};
use crate::data::model::IncomeLevel;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// config.toml
// ---------------------------------------------------------------------------

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// On-disk shape of `config.toml`. Every section and key is optional and
/// unknown keys are ignored.
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [export]
/// directory = "/home/me/reports"
///
/// [filters]
/// aqi_min = 0
/// aqi_max = 500
/// admissions_ceiling = 100000   # 0 = no ceiling
/// income_level = "Medium"       # Low / Medium (or Middle) / High
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub logging: LoggingSection,
    pub export: ExportSection,
    pub filters: FiltersSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FiltersSection {
    pub aqi_min: Option<u16>,
    pub aqi_max: Option<u16>,
    pub admissions_ceiling: Option<u32>,
    pub income_level: Option<String>,
}

/// Validated settings used by the app.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub export_dir: Option<PathBuf>,
    pub default_filters: FilterCriteria,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            export_dir: None,
            default_filters: FilterCriteria::default(),
        }
    }
}

impl Config {
    /// Load from the platform config directory, falling back to defaults if
    /// the file is missing or invalid. Runs before the logger is up, so
    /// problems are returned as warnings for the caller to log.
    pub fn load() -> (Self, Vec<String>) {
        let Some(path) = default_path() else {
            return (Self::default(), Vec::new());
        };
        if !path.exists() {
            return (Self::default(), Vec::new());
        }
        match Self::from_file(&path) {
            Ok((config, warnings)) => (config, warnings),
            Err(e) => (Self::default(), vec![format!("{e}; using defaults")]),
        }
    }

    pub fn from_file(path: &Path) -> Result<(Self, Vec<String>), ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_raw(raw))
    }

    /// Validate raw values. Out-of-range values are replaced by defaults and
    /// reported in the returned warnings.
    pub fn from_raw(raw: RawConfig) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let mut config = Config::default();

        if let Some(level) = raw.logging.level {
            match level.to_ascii_lowercase().as_str() {
                "error" | "warn" | "info" | "debug" | "trace" | "off" => {
                    config.log_level = level.to_ascii_lowercase();
                }
                other => warnings.push(format!(
                    "logging.level '{other}' is not a log level; using '{DEFAULT_LOG_LEVEL}'"
                )),
            }
        }

        config.export_dir = raw.export.directory.filter(|dir| {
            let ok = dir.is_dir();
            if !ok {
                warnings.push(format!(
                    "export.directory '{}' is not a directory; ignoring",
                    dir.display()
                ));
            }
            ok
        });

        let filters = &mut config.default_filters;
        let min = raw.filters.aqi_min.unwrap_or(0);
        let max = raw.filters.aqi_max.unwrap_or(AQI_DOMAIN_MAX);
        if min > max || max > AQI_DOMAIN_MAX {
            warnings.push(format!(
                "filters.aqi_min/aqi_max ({min}..{max}) outside 0..{AQI_DOMAIN_MAX}; using defaults"
            ));
        } else {
            filters.aqi_min = min;
            filters.aqi_max = max;
        }
        filters.admissions_ceiling = match raw.filters.admissions_ceiling {
            Some(0) => None,
            Some(ceiling) => Some(ceiling),
            None => Some(DEFAULT_ADMISSIONS_CEILING),
        };
        if let Some(label) = raw.filters.income_level {
            match label.parse::<IncomeLevel>() {
                Ok(level) => filters.income_level = Some(level),
                Err(e) => warnings.push(format!("filters.income_level: {e}; showing all levels")),
            }
        }

        (config, warnings)
    }
}

/// `<platform config dir>/config.toml`, if the platform has one.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "aqi-dashboard").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> (Config, Vec<String>) {
        Config::from_raw(toml::from_str(text).unwrap())
    }

    #[test]
    fn empty_file_gives_defaults() {
        let (config, warnings) = parse("");
        assert_eq!(config, Config::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn filter_defaults_are_read() {
        let (config, warnings) = parse(
            "[filters]\naqi_min = 50\naqi_max = 300\nadmissions_ceiling = 0\n",
        );
        assert!(warnings.is_empty());
        assert_eq!(config.default_filters.aqi_min, 50);
        assert_eq!(config.default_filters.aqi_max, 300);
        assert_eq!(config.default_filters.admissions_ceiling, None);
    }

    #[test]
    fn inverted_range_falls_back() {
        let (config, warnings) = parse("[filters]\naqi_min = 400\naqi_max = 100\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.default_filters.aqi_min, 0);
        assert_eq!(config.default_filters.aqi_max, AQI_DOMAIN_MAX);
    }

    #[test]
    fn bad_log_level_warns() {
        let (config, warnings) = parse("[logging]\nlevel = \"loud\"\n");
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(warnings.len(), 1);

        let (config, _) = parse("[logging]\nlevel = \"DEBUG\"\n");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn income_level_accepts_middle() {
        let (config, warnings) = parse("[filters]\nincome_level = \"Middle\"\n");
        assert!(warnings.is_empty());
        assert_eq!(config.default_filters.income_level, Some(IncomeLevel::Medium));

        let (config, warnings) = parse("[filters]\nincome_level = \"Rich\"\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.default_filters.income_level, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let (config, warnings) = parse("[theme]\ndark = true\n");
        assert_eq!(config, Config::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn missing_export_dir_is_dropped() {
        let (config, warnings) =
            parse("[export]\ndirectory = \"/definitely/not/here/aqi\"\n");
        assert!(config.export_dir.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let err = Config::from_file(Path::new("/definitely/not/here/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
