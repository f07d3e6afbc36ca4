use chrono::{DateTime, NaiveDateTime, Utc};

use crate::errors::ParserError;
use crate::formats::schema::{BatchDocument, FORECASTS_KEY, OBSERVATIONS_KEY};
use crate::model::{ForecastEntry, ObservationEntry, ParsedBatch};

/// Parses a document timestamp into an absolute instant. Offsets are honoured
/// when present; naive values are taken as UTC. Fractional seconds are kept.
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    static NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.and_utc());
        }
    }
    Err(format!("invalid timestamp '{trimmed}'"))
}

fn finite(value: f64, field: &str) -> Result<f64, String> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{field} must be finite, got {value}"))
    }
}

pub(crate) fn batch_from_document(
    parser: &'static str,
    document: BatchDocument,
) -> Result<ParsedBatch, ParserError> {
    let mut observations = Vec::with_capacity(document.reports.len());
    for (index, raw) in document.reports.into_iter().enumerate() {
        let record_err = |message: String| ParserError::InvalidRecord {
            parser,
            collection: OBSERVATIONS_KEY,
            index,
            message,
        };
        observations.push(ObservationEntry {
            timestamp: parse_timestamp(&raw.timestamp).map_err(record_err)?,
            value: finite(raw.value, "windspeed").map_err(record_err)?,
        });
    }

    let mut forecasts = Vec::with_capacity(document.forecasts.len());
    for (index, raw) in document.forecasts.into_iter().enumerate() {
        let record_err = |message: String| ParserError::InvalidRecord {
            parser,
            collection: FORECASTS_KEY,
            index,
            message,
        };
        forecasts.push(ForecastEntry {
            id: raw.id,
            issued_at: parse_timestamp(&raw.issued_at).map_err(record_err)?,
            target_at: parse_timestamp(&raw.target_at).map_err(record_err)?,
            predicted_value: finite(raw.predicted_value, "windspeed").map_err(record_err)?,
            auxiliary_value: finite(raw.auxiliary_value, "temp").map_err(record_err)?,
        });
    }

    Ok(ParsedBatch {
        format: parser,
        observations,
        forecasts,
    })
}
