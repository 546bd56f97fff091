use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while writing an export file. Always non-fatal for the app.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("encoding CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("encoding JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("building PDF: {0}")]
    Pdf(String),

    #[error("screenshot region is empty")]
    EmptySnapshot,

    #[error("the metrics panel does not fit in the window; enlarge the window and retry")]
    DetailClipped,

    #[error("no screenshot received after {frames} frames")]
    ScreenshotTimeout { frames: u32 },
}

/// Failure while reading `config.toml`. Logged, then defaults are used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
