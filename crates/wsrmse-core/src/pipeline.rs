use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::ingestion::{discover_input_files, load_files, FileReport};
use crate::lead_time::{audit_forecasts, AuditCounts};
use crate::observation_index::ObservationIndex;
use crate::outputs::{write_curve, OutputFormat};
use crate::records::{ForecastSet, ObservationSet};
use crate::rmse::{BucketPolicy, RmseAggregator, RmseCurve, MAX_LEAD};
use crate::scoring::{score_forecasts, ScoringCounts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSettings {
    pub max_lead: u32,
    pub bucket_policy: BucketPolicy,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            max_lead: MAX_LEAD,
            bucket_policy: BucketPolicy::default(),
        }
    }
}

impl From<&Config> for AggregationSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_lead: config.max_lead,
            bucket_policy: config.bucket_policy,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub observations: usize,
    pub indexed_timestamps: usize,
    pub forecasts: usize,
    pub audit: AuditCounts,
    pub scoring: ScoringCounts,
    /// Errors dropped because an identical value already sat in the bucket.
    pub collapsed_errors: usize,
    pub populated_buckets: usize,
    pub bucket_policy: &'static str,
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub curve: RmseCurve,
    pub summary: EvaluationSummary,
}

/// Audit, index, score and aggregate already-merged records.
pub fn compute_curve(
    observations: &ObservationSet,
    forecasts: &ForecastSet,
    settings: &AggregationSettings,
) -> Evaluation {
    let audit = audit_forecasts(forecasts);
    let index = ObservationIndex::build(observations);
    let scoring = score_forecasts(forecasts, &audit, &index, settings.max_lead);

    let mut aggregator = RmseAggregator::new(settings.max_lead, settings.bucket_policy);
    let mut collapsed_errors = 0;
    for scored in &scoring.errors {
        if !aggregator.observe(scored.lead_hours, scored.error) {
            collapsed_errors += 1;
        }
    }
    let curve = aggregator.finalize();

    let summary = EvaluationSummary {
        observations: observations.len(),
        indexed_timestamps: index.len(),
        forecasts: forecasts.len(),
        audit: audit.counts,
        scoring: scoring.counts,
        collapsed_errors,
        populated_buckets: curve.populated_buckets(),
        bucket_policy: settings.bucket_policy.as_str(),
    };

    Evaluation { curve, summary }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub evaluation: Evaluation,
    pub output_path: PathBuf,
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Nothing to read; no output was written.
    NoInput { input_dir: PathBuf },
    Completed(RunReport),
}

/// Loads every input file, computes the curve and writes it out. Any file
/// failure aborts before the output is touched.
pub fn run(config: &Config) -> Result<RunOutcome> {
    config.validate()?;
    let paths = discover_input_files(&config.input_dir, &config.input_pattern)?;
    if paths.is_empty() {
        warn!(
            input_dir = %config.input_dir.display(),
            "No wind speed forecast data files found"
        );
        return Ok(RunOutcome::NoInput {
            input_dir: config.input_dir.clone(),
        });
    }

    info!(files = paths.len(), "loading input files");
    let batch = load_files(&paths)?;

    let evaluation = compute_curve(
        &batch.observations,
        &batch.forecasts,
        &AggregationSettings::from(config),
    );

    let output_format = config.resolved_output_format();
    write_curve(&evaluation.curve, &config.output_path, output_format)?;

    Ok(RunOutcome::Completed(RunReport {
        files: batch.reports,
        evaluation,
        output_path: config.output_path.clone(),
        output_format,
    }))
}
