use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use blake3::Hasher;
use serde::Serialize;
use tracing::{info, warn};
use wsrmse_parser::parse_batch_file;

use crate::error::{PipelineError, Result};
use crate::records::{ForecastSet, ObservationSet};

#[derive(Debug)]
pub struct FileInput<'a> {
    pub path: &'a str,
    pub contents: &'a [u8],
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub hash: String,
    pub format: &'static str,
    pub observations: usize,
    pub forecasts: usize,
    /// Earlier file with byte-identical contents, if any. Its records are
    /// merged again all the same.
    pub duplicate_of: Option<String>,
}

#[derive(Debug, Default)]
pub struct IngestionBatch {
    pub observations: ObservationSet,
    pub forecasts: ForecastSet,
    pub reports: Vec<FileReport>,
}

/// Lists regular files under `dir` matching `pattern`, sorted by path.
/// A missing directory is reported and treated as empty.
pub fn discover_input_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "input directory does not exist");
        return Ok(Vec::new());
    }

    let dir_str = dir.to_str().ok_or_else(|| {
        PipelineError::Config(format!("input directory '{}' is not UTF-8", dir.display()))
    })?;
    let full_pattern = format!("{}/{}", glob::Pattern::escape(dir_str), pattern);

    let mut files = Vec::new();
    for entry in glob::glob(&full_pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                let path = err.path().to_path_buf();
                return Err(PipelineError::io(path, std::io::Error::from(err)));
            }
        };
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parses and merges every input. The first file that cannot be decoded or
/// parsed aborts the whole batch.
pub fn ingest_files(inputs: &[FileInput<'_>]) -> Result<IngestionBatch> {
    let mut batch = IngestionBatch::default();
    let mut seen_hashes: HashMap<String, String> = HashMap::new();

    for input in inputs {
        let hash = compute_hash(input.contents);

        let content = std::str::from_utf8(input.contents).map_err(|_| PipelineError::Encoding {
            path: input.path.to_string(),
        })?;
        let parsed = parse_batch_file(content).map_err(|source| PipelineError::Parse {
            path: input.path.to_string(),
            source,
        })?;

        let duplicate_of = seen_hashes.get(&hash).cloned();
        if let Some(original) = &duplicate_of {
            warn!(
                path = input.path,
                original = original.as_str(),
                "file contents identical to an earlier input"
            );
        } else {
            seen_hashes.insert(hash.clone(), input.path.to_string());
        }

        let report = FileReport {
            path: input.path.to_string(),
            hash,
            format: parsed.format,
            observations: parsed.observations.len(),
            forecasts: parsed.forecasts.len(),
            duplicate_of,
        };
        info!(
            path = input.path,
            format = report.format,
            observations = report.observations,
            forecasts = report.forecasts,
            "batch file merged"
        );

        batch.observations.merge(parsed.observations);
        batch.forecasts.merge(parsed.forecasts);
        batch.reports.push(report);
    }

    Ok(batch)
}

/// Reads every path fully into memory, then ingests them in order.
pub fn load_files(paths: &[PathBuf]) -> Result<IngestionBatch> {
    let mut loaded = Vec::with_capacity(paths.len());
    for path in paths {
        let contents = fs::read(path).map_err(|err| PipelineError::io(path, err))?;
        loaded.push((path.display().to_string(), contents));
    }

    let inputs: Vec<FileInput<'_>> = loaded
        .iter()
        .map(|(path, contents)| FileInput {
            path: path.as_str(),
            contents: contents.as_slice(),
        })
        .collect();

    ingest_files(&inputs)
}

fn compute_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}
