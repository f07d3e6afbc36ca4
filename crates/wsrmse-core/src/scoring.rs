use serde::Serialize;
use tracing::{debug, info, warn};

use crate::lead_time::LeadTimeAudit;
use crate::observation_index::ObservationIndex;
use crate::records::{Forecast, ForecastSet};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredError {
    pub lead_hours: u32,
    pub error: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoringCounts {
    pub scored: usize,
    /// In range but no observation exists at the target time.
    pub unscored: usize,
    pub above_range: usize,
    pub below_range: usize,
    pub malformed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringOutcome {
    pub errors: Vec<ScoredError>,
    pub counts: ScoringCounts,
}

/// Signed error of a forecast against the observation at its target time.
/// A missing observation is the normal case for targets past the end of the
/// observed period and yields `None`.
pub fn forecast_error(forecast: &Forecast, index: &ObservationIndex) -> Option<f64> {
    index
        .lookup(forecast.target_at)
        .map(|observed| forecast.predicted_value - observed)
}

/// Scores every forecast whose derived lead time falls in `1..=max_lead`.
///
/// `audit` must come from [`crate::lead_time::audit_forecasts`] over the same
/// `forecasts`; its derived lead hours decide the bucket.
pub fn score_forecasts(
    forecasts: &ForecastSet,
    audit: &LeadTimeAudit,
    index: &ObservationIndex,
    max_lead: u32,
) -> ScoringOutcome {
    debug_assert_eq!(forecasts.len(), audit.len());

    let mut outcome = ScoringOutcome::default();
    let counts = &mut outcome.counts;

    for (forecast, resolution) in forecasts.iter().zip(&audit.resolutions) {
        let Some(lead_hours) = resolution.lead_hours else {
            counts.malformed += 1;
            continue;
        };

        if lead_hours > i64::from(max_lead) {
            counts.above_range += 1;
            debug!(lead_hours, max_lead, "lead time beyond the last bucket");
            continue;
        }
        if lead_hours < 1 {
            counts.below_range += 1;
            debug!(lead_hours, "lead time before the first bucket");
            continue;
        }

        match forecast_error(forecast, index) {
            Some(error) => {
                counts.scored += 1;
                outcome.errors.push(ScoredError {
                    // bounded by max_lead above
                    lead_hours: lead_hours as u32,
                    error,
                });
            }
            None => counts.unscored += 1,
        }
    }

    if counts.above_range > 0 {
        warn!(
            excluded = counts.above_range,
            max_lead, "Lead Time greater than {max_lead} hours found"
        );
    }
    if counts.below_range > 0 {
        warn!(
            excluded = counts.below_range,
            "forecasts with a lead time under one hour excluded"
        );
    }
    info!(
        scored = counts.scored,
        unscored = counts.unscored,
        "forecast errors computed"
    );

    outcome
}
