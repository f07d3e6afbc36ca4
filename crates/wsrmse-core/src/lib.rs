pub mod config;
pub mod error;
pub mod ingestion;
pub mod interval_totals;
pub mod lead_time;
pub mod observation_index;
pub mod outputs;
pub mod pipeline;
pub mod records;
pub mod rmse;
pub mod scoring;

pub use config::Config;
pub use error::{PipelineError, Result};
pub use pipeline::{run, RunOutcome, RunReport};
pub use rmse::{BucketPolicy, RmseCurve, MAX_LEAD};
