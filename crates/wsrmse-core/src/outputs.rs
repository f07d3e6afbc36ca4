use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::rmse::RmseCurve;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    /// `.csv` selects CSV; anything else is written as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => OutputFormat::Csv,
            _ => OutputFormat::Json,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

pub fn render_curve(curve: &RmseCurve, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(curve)?;
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for point in curve.points() {
                writer.serialize(point)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|err| PipelineError::Csv(err.into_error().into()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// Writes the curve document, creating missing parent directories.
pub fn write_curve(curve: &RmseCurve, path: &Path, format: OutputFormat) -> Result<()> {
    let rendered = render_curve(curve, format)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| PipelineError::io(parent, err))?;
    }
    fs::write(path, rendered).map_err(|err| PipelineError::io(path, err))?;

    info!(path = %path.display(), buckets = curve.len(), "RMSE curve written");
    Ok(())
}
