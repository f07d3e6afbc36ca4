use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::records::ObservationSet;

/// Whole-second lookup from observation time to observed value.
///
/// Keys are UNIX seconds; any sub-second part of a timestamp is dropped both
/// when indexing and when looking up, so a forecast targeting `12:00:00.4`
/// matches an observation stamped `12:00:00`.
#[derive(Debug, Clone, Default)]
pub struct ObservationIndex {
    values: HashMap<i64, f64>,
    overwritten: usize,
}

impl ObservationIndex {
    /// Indexes every merged observation. A repeated timestamp keeps the value
    /// merged last.
    pub fn build(observations: &ObservationSet) -> Self {
        let mut values = HashMap::with_capacity(observations.len());
        let mut overwritten = 0;

        for observation in observations.iter() {
            let key = observation.timestamp.timestamp();
            if values.insert(key, observation.value).is_some() {
                overwritten += 1;
            }
        }

        if overwritten > 0 {
            warn!(
                overwritten,
                "duplicate observation timestamps found; keeping the last merged value"
            );
        }
        debug!(entries = values.len(), "observation index built");

        Self {
            values,
            overwritten,
        }
    }

    pub fn lookup(&self, timestamp: DateTime<Utc>) -> Option<f64> {
        self.values.get(&timestamp.timestamp()).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of observations that replaced an earlier one with the same timestamp.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}
