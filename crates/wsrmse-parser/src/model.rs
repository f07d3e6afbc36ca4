use chrono::{DateTime, Utc};
use serde::Serialize;

/// A ground-truth reading as it appears in a batch document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationEntry {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// A forecast as it appears in a batch document. `id` is the lead-time
/// identifier declared by the producer; it is not validated here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntry {
    pub id: i64,
    pub issued_at: DateTime<Utc>,
    pub target_at: DateTime<Utc>,
    pub predicted_value: f64,
    pub auxiliary_value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    pub format: &'static str,
    pub observations: Vec<ObservationEntry>,
    pub forecasts: Vec<ForecastEntry>,
}

impl ParsedBatch {
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty() && self.forecasts.is_empty()
    }
}
