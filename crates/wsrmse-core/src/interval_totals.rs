//! Per-timeslot production/consumption totals from a market event log.
//!
//! The log is JSON lines, one event per line. Tariff transactions accumulate
//! energy (kWh in the log, MWh in the report); each timeslot update closes the
//! running interval. The first update only opens the report, so anything
//! accumulated before it rolls into the first emitted row.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};

const KWH_PER_MWH: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffTxType {
    Consume,
    Produce,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    TimeslotUpdate {
        first_enabled: i64,
        posted_time: DateTime<Utc>,
    },
    TariffTransaction {
        tx_type: TariffTxType,
        kwh: f64,
    },
    #[serde(other)]
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalRow {
    pub slot: i64,
    /// ISO weekday, Monday = 1.
    pub day_of_week: u32,
    pub hour: u32,
    pub production: f64,
    pub consumption: f64,
}

#[derive(Debug, Clone, Default)]
pub struct IntervalTotals {
    opened: bool,
    produced: f64,
    used: f64,
    rows: Vec<IntervalRow>,
}

impl IntervalTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &LogEvent) {
        match event {
            LogEvent::TimeslotUpdate {
                first_enabled,
                posted_time,
            } => self.close_interval(first_enabled - 1, *posted_time),
            LogEvent::TariffTransaction { tx_type, kwh } => match tx_type {
                TariffTxType::Consume => self.used += kwh / KWH_PER_MWH,
                TariffTxType::Produce => self.produced += kwh / KWH_PER_MWH,
                TariffTxType::Other => {}
            },
            LogEvent::Ignored => {}
        }
    }

    fn close_interval(&mut self, slot: i64, posted_time: DateTime<Utc>) {
        debug!(slot, "timeslot update");
        if !self.opened {
            self.opened = true;
            return;
        }

        self.rows.push(IntervalRow {
            slot,
            day_of_week: posted_time.weekday().number_from_monday(),
            hour: posted_time.hour(),
            production: self.produced,
            consumption: self.used,
        });
        self.produced = 0.0;
        self.used = 0.0;
    }

    pub fn rows(&self) -> &[IntervalRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<IntervalRow> {
        self.rows
    }
}

pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<LogEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|err| PipelineError::EventLog {
            line: line_no,
            message: err.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|err| PipelineError::EventLog {
            line: line_no,
            message: err.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}

pub fn write_rows<W: Write>(rows: &[IntervalRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["slot", "dow", "hour", "production", "consumption"])?;
    for row in rows {
        csv_writer.write_record([
            row.slot.to_string(),
            row.day_of_week.to_string(),
            row.hour.to_string(),
            format!("{:.3}", row.production),
            format!("{:.3}", row.consumption),
        ])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Reads the event log at `input` and writes one CSV row per closed
/// timeslot to `output`. Returns the number of rows written.
pub fn summarize_log(input: &Path, output: &Path) -> Result<usize> {
    let file = File::open(input).map_err(|err| PipelineError::io(input, err))?;
    let events = read_events(BufReader::new(file))?;

    let mut totals = IntervalTotals::new();
    for event in &events {
        totals.handle(event);
    }
    let rows = totals.into_rows();

    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| PipelineError::io(parent, err))?;
    }
    let out = File::create(output).map_err(|err| PipelineError::io(output, err))?;
    write_rows(&rows, out)?;

    info!(
        events = events.len(),
        rows = rows.len(),
        path = %output.display(),
        "interval totals written"
    );
    Ok(rows.len())
}
