use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of lead-hour buckets in the standard curve.
pub const MAX_LEAD: u32 = 50;

/// Largest configurable bucket count: two weeks of hourly lead times.
pub const MAX_LEAD_CEILING: u32 = 24 * 14;

/// How repeated error values inside one bucket are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketPolicy {
    /// Every scored error counts. This is the ordinary RMSE.
    #[default]
    AllValues,
    /// Bit-equal errors in the same bucket count once. Matches curves produced
    /// by the older set-based tooling.
    DistinctValues,
}

impl BucketPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketPolicy::AllValues => "all_values",
            BucketPolicy::DistinctValues => "distinct_values",
        }
    }
}

impl FromStr for BucketPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all_values" | "all" | "multiset" => Ok(BucketPolicy::AllValues),
            "distinct_values" | "distinct" | "set" => Ok(BucketPolicy::DistinctValues),
            other => Err(format!("unknown bucket policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    errors: Vec<f64>,
    seen: HashSet<u64>,
}

/// Per-bucket error accumulator. Buckets are `1..=max_lead`.
#[derive(Debug, Clone)]
pub struct RmseAggregator {
    policy: BucketPolicy,
    buckets: Vec<Bucket>,
}

impl RmseAggregator {
    pub fn new(max_lead: u32, policy: BucketPolicy) -> Self {
        Self {
            policy,
            buckets: vec![Bucket::default(); max_lead as usize],
        }
    }

    pub fn max_lead(&self) -> u32 {
        self.buckets.len() as u32
    }

    pub fn policy(&self) -> BucketPolicy {
        self.policy
    }

    /// Adds one error to `bucket`. Returns `false` when the bucket is out of
    /// range or the value was folded into an identical one already present.
    pub fn observe(&mut self, bucket: u32, error: f64) -> bool {
        let Some(slot) = bucket
            .checked_sub(1)
            .and_then(|idx| self.buckets.get_mut(idx as usize))
        else {
            return false;
        };

        if self.policy == BucketPolicy::DistinctValues {
            // -0.0 and 0.0 are the same error
            let key = (error + 0.0).to_bits();
            if !slot.seen.insert(key) {
                return false;
            }
        }
        slot.errors.push(error);
        true
    }

    pub fn finalize(self) -> RmseCurve {
        let points = self
            .buckets
            .into_iter()
            .enumerate()
            .map(|(idx, bucket)| {
                let samples = bucket.errors.len();
                RmsePoint {
                    hour: idx as u32 + 1,
                    value: root_mean_square(bucket.errors),
                    samples,
                }
            })
            .collect();

        RmseCurve { points }
    }
}

/// Squares are summed smallest-magnitude first so the result does not depend
/// on the order errors were observed in. When squaring overflows, the errors
/// are rescaled by the largest magnitude and the root scaled back.
fn root_mean_square(errors: Vec<f64>) -> f64 {
    if errors.is_empty() {
        return 0.0;
    }

    let plain = mean_square_root(&errors, 1.0);
    if plain.is_finite() {
        return plain;
    }

    let largest = errors.iter().fold(0.0f64, |acc, err| acc.max(err.abs()));
    largest * mean_square_root(&errors, largest)
}

fn mean_square_root(errors: &[f64], scale: f64) -> f64 {
    let mut squares: Vec<f64> = errors
        .iter()
        .map(|err| {
            let scaled = err / scale;
            scaled * scaled
        })
        .collect();
    squares.sort_by(f64::total_cmp);

    let sum_of_squares: f64 = squares.iter().sum();
    (sum_of_squares / squares.len() as f64).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RmsePoint {
    pub hour: u32,
    pub value: f64,
    #[serde(skip)]
    pub samples: usize,
}

/// Lead-hour indexed RMSE, one point per bucket in ascending hour order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RmseCurve {
    #[serde(rename = "rmse_curve")]
    points: Vec<RmsePoint>,
}

impl RmseCurve {
    pub fn points(&self) -> &[RmsePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, hour: u32) -> Option<&RmsePoint> {
        hour.checked_sub(1)
            .and_then(|idx| self.points.get(idx as usize))
    }

    pub fn value(&self, hour: u32) -> Option<f64> {
        self.get(hour).map(|point| point.value)
    }

    pub fn populated_buckets(&self) -> usize {
        self.points.iter().filter(|point| point.samples > 0).count()
    }
}
