use chrono::{DateTime, Utc};
use serde::Serialize;
use wsrmse_parser::{ForecastEntry, ObservationEntry};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    pub issued_at: DateTime<Utc>,
    pub target_at: DateTime<Utc>,
    pub declared_lead_id: i64,
    pub predicted_value: f64,
    /// Carried through from the source (air temperature) but never scored.
    pub auxiliary_value: f64,
}

impl From<ObservationEntry> for Observation {
    fn from(entry: ObservationEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            value: entry.value,
        }
    }
}

impl From<ForecastEntry> for Forecast {
    fn from(entry: ForecastEntry) -> Self {
        Self {
            issued_at: entry.issued_at,
            target_at: entry.target_at,
            declared_lead_id: entry.id,
            predicted_value: entry.predicted_value,
            auxiliary_value: entry.auxiliary_value,
        }
    }
}

/// Running collection of observations merged from every input batch.
#[derive(Debug, Clone, Default)]
pub struct ObservationSet {
    records: Vec<Observation>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge<I>(&mut self, batch: I)
    where
        I: IntoIterator,
        I::Item: Into<Observation>,
    {
        self.records.extend(batch.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.records.iter()
    }
}

impl<T: Into<Observation>> FromIterator<T> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.merge(iter);
        set
    }
}

/// Running collection of forecasts merged from every input batch.
#[derive(Debug, Clone, Default)]
pub struct ForecastSet {
    records: Vec<Forecast>,
}

impl ForecastSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge<I>(&mut self, batch: I)
    where
        I: IntoIterator,
        I::Item: Into<Forecast>,
    {
        self.records.extend(batch.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Forecast> {
        self.records.iter()
    }
}

impl<T: Into<Forecast>> FromIterator<T> for ForecastSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.merge(iter);
        set
    }
}
