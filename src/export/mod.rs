//! Export adapters: the current view as CSV / JSON, the detail panel as PDF.
//!
//! Every writer takes any [`std::io::Write`]; [`write_file`] opens the
//! destination chosen in the save dialog.

pub mod pdf;
pub mod table;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Pdf => "PDF",
        }
    }

    pub fn default_file_name(self) -> String {
        let stem = match self {
            ExportFormat::Csv | ExportFormat::Json => "filtered_regions",
            ExportFormat::Pdf => "region_metrics",
        };
        format!("{stem}.{}", self.extension())
    }
}

/// Ask the user where to save. `None` if the dialog was cancelled.
pub fn save_dialog(format: ExportFormat, initial_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title(format!("Export {}", format.label()))
        .add_filter(format.label(), &[format.extension()])
        .set_file_name(format.default_file_name());
    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

/// Create `path` and hand a buffered writer to `write`.
pub fn write_file<T>(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> Result<T, ExportError>,
) -> Result<T, ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let out = write(&mut writer)?;
    std::io::Write::flush(&mut writer).map_err(io_err)?;
    Ok(out)
}
