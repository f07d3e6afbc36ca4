use chrono::{DateTime, Duration, TimeZone, Utc};

use wsrmse_core::lead_time::audit_forecasts;
use wsrmse_core::observation_index::ObservationIndex;
use wsrmse_core::records::{Forecast, ForecastSet, Observation, ObservationSet};
use wsrmse_core::scoring::{forecast_error, score_forecasts, ScoredError};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2013, 6, 1, 0, 0, 0).unwrap()
}

fn forecast_at(hours: i64, predicted: f64) -> Forecast {
    Forecast {
        issued_at: base(),
        target_at: base() + Duration::hours(hours),
        declared_lead_id: hours,
        predicted_value: predicted,
        auxiliary_value: 18.0,
    }
}

fn observe_at(hours: i64, value: f64) -> Observation {
    Observation {
        timestamp: base() + Duration::hours(hours),
        value,
    }
}

#[test]
fn matched_forecast_produces_signed_error() {
    let observations: ObservationSet = vec![observe_at(2, 3.0)].into_iter().collect();
    let index = ObservationIndex::build(&observations);

    assert_eq!(forecast_error(&forecast_at(2, 5.0), &index), Some(2.0));
    assert_eq!(forecast_error(&forecast_at(2, 1.0), &index), Some(-2.0));
    assert_eq!(forecast_error(&forecast_at(3, 1.0), &index), None);
}

#[test]
fn scoring_buckets_by_derived_lead_time() {
    let observations: ObservationSet = vec![observe_at(2, 3.0)].into_iter().collect();
    let mut mislabelled = forecast_at(2, 5.0);
    mislabelled.declared_lead_id = 9;
    let forecasts: ForecastSet = vec![mislabelled].into_iter().collect();

    let audit = audit_forecasts(&forecasts);
    let index = ObservationIndex::build(&observations);
    let outcome = score_forecasts(&forecasts, &audit, &index, 50);

    assert_eq!(
        outcome.errors,
        vec![ScoredError {
            lead_hours: 2,
            error: 2.0
        }]
    );
    assert_eq!(outcome.counts.scored, 1);
}

#[test]
fn out_of_range_and_unmatched_forecasts_are_tallied() {
    let observations: ObservationSet = vec![
        observe_at(0, 1.0),
        observe_at(1, 1.0),
        observe_at(50, 1.0),
        observe_at(51, 1.0),
    ]
    .into_iter()
    .collect();
    let mut backwards = forecast_at(1, 1.0);
    backwards.target_at = base() - Duration::hours(1);

    let forecasts: ForecastSet = vec![
        forecast_at(0, 2.0),
        forecast_at(1, 2.0),
        forecast_at(50, 2.0),
        forecast_at(51, 2.0),
        forecast_at(10, 2.0),
        backwards,
    ]
    .into_iter()
    .collect();

    let audit = audit_forecasts(&forecasts);
    let index = ObservationIndex::build(&observations);
    let outcome = score_forecasts(&forecasts, &audit, &index, 50);

    assert_eq!(outcome.counts.scored, 2);
    assert_eq!(outcome.counts.below_range, 1);
    assert_eq!(outcome.counts.above_range, 1);
    assert_eq!(outcome.counts.unscored, 1);
    assert_eq!(outcome.counts.malformed, 1);

    let buckets: Vec<u32> = outcome.errors.iter().map(|e| e.lead_hours).collect();
    assert_eq!(buckets, vec![1, 50]);
}
