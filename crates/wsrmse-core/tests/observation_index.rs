use chrono::{Duration, TimeZone, Utc};

use wsrmse_core::observation_index::ObservationIndex;
use wsrmse_core::records::{Observation, ObservationSet};

#[test]
fn lookup_matches_exact_second() {
    let t = Utc.with_ymd_and_hms(2013, 3, 4, 12, 0, 0).unwrap();
    let observations: ObservationSet = vec![
        Observation { timestamp: t, value: 3.0 },
        Observation {
            timestamp: t + Duration::hours(1),
            value: 4.0,
        },
    ]
    .into_iter()
    .collect();

    let index = ObservationIndex::build(&observations);

    assert_eq!(index.len(), 2);
    assert_eq!(index.lookup(t), Some(3.0));
    assert_eq!(index.lookup(t + Duration::hours(1)), Some(4.0));
    assert_eq!(index.lookup(t + Duration::minutes(30)), None);
}

#[test]
fn subsecond_remainder_is_ignored_for_matching() {
    let t = Utc.with_ymd_and_hms(2013, 3, 4, 12, 0, 0).unwrap();
    let observations: ObservationSet = vec![Observation {
        timestamp: t + Duration::milliseconds(250),
        value: 6.5,
    }]
    .into_iter()
    .collect();

    let index = ObservationIndex::build(&observations);

    assert_eq!(index.lookup(t), Some(6.5));
    assert_eq!(index.lookup(t + Duration::milliseconds(999)), Some(6.5));
}

#[test]
fn duplicate_timestamp_keeps_last_merged_value() {
    let t = Utc.with_ymd_and_hms(2013, 3, 4, 12, 0, 0).unwrap();
    let mut observations = ObservationSet::new();
    observations.merge(vec![Observation { timestamp: t, value: 1.0 }]);
    observations.merge(vec![Observation { timestamp: t, value: 2.0 }]);

    let index = ObservationIndex::build(&observations);

    assert_eq!(observations.len(), 2);
    assert_eq!(index.len(), 1);
    assert_eq!(index.overwritten(), 1);
    assert_eq!(index.lookup(t), Some(2.0));
}

#[test]
fn empty_set_builds_empty_index() {
    let index = ObservationIndex::build(&ObservationSet::new());
    assert!(index.is_empty());
    assert_eq!(index.lookup(Utc::now()), None);
}
