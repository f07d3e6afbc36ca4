use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::records::{Forecast, ForecastSet};

pub const SECONDS_PER_HOUR: i64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeadTimeAnomaly {
    SubsecondIssuance { nanos: u32 },
    SubsecondTarget { nanos: u32 },
    NegativeElapsed { elapsed_seconds: i64 },
    FractionalHours { elapsed_seconds: i64 },
    IdMismatch { declared: i64, derived: i64 },
}

impl fmt::Display for LeadTimeAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadTimeAnomaly::SubsecondIssuance { nanos } => {
                write!(f, "issuance time has a sub-second remainder of {nanos}ns")
            }
            LeadTimeAnomaly::SubsecondTarget { nanos } => {
                write!(f, "target time has a sub-second remainder of {nanos}ns")
            }
            LeadTimeAnomaly::NegativeElapsed { elapsed_seconds } => {
                write!(f, "target precedes issuance by {}s", -elapsed_seconds)
            }
            LeadTimeAnomaly::FractionalHours { elapsed_seconds } => {
                write!(f, "elapsed time of {elapsed_seconds}s is not a whole number of hours")
            }
            LeadTimeAnomaly::IdMismatch { declared, derived } => {
                write!(f, "declared id {declared} but expected id {derived}")
            }
        }
    }
}

/// Lead time derived for one forecast plus everything odd found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadTimeResolution {
    pub elapsed_seconds: i64,
    /// `None` when the target precedes issuance; such forecasts are not scored.
    pub lead_hours: Option<i64>,
    pub anomalies: Vec<LeadTimeAnomaly>,
}

impl LeadTimeResolution {
    pub fn is_malformed(&self) -> bool {
        self.lead_hours.is_none()
    }

    pub fn has_bad_id(&self) -> bool {
        self.anomalies
            .iter()
            .any(|anomaly| matches!(anomaly, LeadTimeAnomaly::IdMismatch { .. }))
    }
}

pub fn resolve_lead_time(forecast: &Forecast) -> LeadTimeResolution {
    let mut anomalies = Vec::new();

    let issued_nanos = forecast.issued_at.timestamp_subsec_nanos();
    if issued_nanos > 0 {
        anomalies.push(LeadTimeAnomaly::SubsecondIssuance {
            nanos: issued_nanos,
        });
    }
    let target_nanos = forecast.target_at.timestamp_subsec_nanos();
    if target_nanos > 0 {
        anomalies.push(LeadTimeAnomaly::SubsecondTarget {
            nanos: target_nanos,
        });
    }

    let elapsed_seconds = forecast.target_at.timestamp() - forecast.issued_at.timestamp();
    if elapsed_seconds < 0 {
        anomalies.push(LeadTimeAnomaly::NegativeElapsed { elapsed_seconds });
        return LeadTimeResolution {
            elapsed_seconds,
            lead_hours: None,
            anomalies,
        };
    }

    if elapsed_seconds % SECONDS_PER_HOUR != 0 {
        anomalies.push(LeadTimeAnomaly::FractionalHours { elapsed_seconds });
    }

    let lead_hours = elapsed_seconds / SECONDS_PER_HOUR;
    if lead_hours != forecast.declared_lead_id {
        anomalies.push(LeadTimeAnomaly::IdMismatch {
            declared: forecast.declared_lead_id,
            derived: lead_hours,
        });
    }

    LeadTimeResolution {
        elapsed_seconds,
        lead_hours: Some(lead_hours),
        anomalies,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditCounts {
    pub bad_ids: usize,
    pub subsecond: usize,
    pub fractional_hours: usize,
    pub negative_elapsed: usize,
}

/// Result of the consistency pass over the merged forecasts. `resolutions`
/// is positionally aligned with the audited [`ForecastSet`].
#[derive(Debug, Clone, Default)]
pub struct LeadTimeAudit {
    pub resolutions: Vec<LeadTimeResolution>,
    pub counts: AuditCounts,
}

impl LeadTimeAudit {
    pub fn len(&self) -> usize {
        self.resolutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolutions.is_empty()
    }
}

/// Checks every forecast's declared id against the lead time implied by its
/// timestamps. Reports, never drops.
pub fn audit_forecasts(forecasts: &ForecastSet) -> LeadTimeAudit {
    info!(forecasts = forecasts.len(), "lead-time audit started");

    let mut counts = AuditCounts::default();
    let mut resolutions = Vec::with_capacity(forecasts.len());

    for (position, forecast) in forecasts.iter().enumerate() {
        let resolution = resolve_lead_time(forecast);
        for anomaly in &resolution.anomalies {
            match anomaly {
                LeadTimeAnomaly::SubsecondIssuance { .. }
                | LeadTimeAnomaly::SubsecondTarget { .. } => counts.subsecond += 1,
                LeadTimeAnomaly::NegativeElapsed { .. } => counts.negative_elapsed += 1,
                LeadTimeAnomaly::FractionalHours { .. } => counts.fractional_hours += 1,
                LeadTimeAnomaly::IdMismatch { .. } => counts.bad_ids += 1,
            }
            warn!(
                forecast = position,
                issued_at = %forecast.issued_at,
                target_at = %forecast.target_at,
                "{anomaly}"
            );
        }
        resolutions.push(resolution);
    }

    info!(
        bad_ids = counts.bad_ids,
        subsecond = counts.subsecond,
        fractional_hours = counts.fractional_hours,
        negative_elapsed = counts.negative_elapsed,
        "Total number of bad IDs = {}",
        counts.bad_ids
    );

    LeadTimeAudit {
        resolutions,
        counts,
    }
}
