//! End-to-end job runner: config and inputs in, output file and run log out

use crate::audit::{AuditSink, CsvRunLog, RunRecord};
use crate::config::JobConfig;
use crate::error::{Error, Result};
use crate::loader::load_input;
use crate::pipeline::run_pipeline;
use crate::validator::{validate, Warning};
use crate::writer::{output_file_name, write_table};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a job looks for inputs and writes outputs
#[derive(Debug, Clone)]
pub struct JobPaths {
    /// Searched first for input files
    pub base_dir: PathBuf,
    /// Searched second for input files
    pub input_dir: PathBuf,
    /// Receives the output table and the run log
    pub output_dir: PathBuf,
}

impl JobPaths {
    /// Conventional layout: `input/` and `output/` under `base_dir`
    pub fn under(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            input_dir: base_dir.join("input"),
            output_dir: base_dir.join("output"),
            base_dir,
        }
    }

    /// Create the input and output directories if they are missing
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.input_dir, &self.output_dir] {
            fs::create_dir_all(dir).map_err(|e| Error::FileWrite {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(())
    }
}

/// Outcome of a completed job
#[derive(Debug, Clone)]
pub struct JobReport {
    pub config_name: String,
    pub input_a: PathBuf,
    pub input_b: PathBuf,
    pub output_path: PathBuf,
    pub output_rows: usize,
    pub output_columns: usize,
    pub warnings: Vec<Warning>,
    pub converted: usize,
    pub removed: usize,
    /// Set when the run log could not be written; the output is still valid
    pub audit_error: Option<String>,
}

/// Run a job with the CSV run log in the output directory
pub fn run_job(config_path: &Path, paths: &JobPaths) -> Result<JobReport> {
    let mut log = CsvRunLog::in_dir(&paths.output_dir);
    run_job_with(config_path, paths, &mut log)
}

/// Run a job, recording the result in `audit`
///
/// Load and save failures abort the job. A failed audit append does not.
pub fn run_job_with(config_path: &Path, paths: &JobPaths, audit: &mut dyn AuditSink) -> Result<JobReport> {
    let config = JobConfig::load(config_path)?;
    tracing::info!(job = %config.name, config = %config_path.display(), "starting job");

    let (input_a, table_a) = load_input(&config.file_name_a, &paths.base_dir, &paths.input_dir)?;
    let (input_b, table_b) = load_input(&config.file_name_b, &paths.base_dir, &paths.input_dir)?;

    let output = run_pipeline(&table_a, &table_b, &config);

    let now = Local::now().naive_local();
    let file_name = output_file_name(&config.name, now);
    let output_path = paths.output_dir.join(&file_name);
    write_table(&output.table, &output_path)?;

    let record = RunRecord {
        timestamp: now,
        config_name: config.name.clone(),
        file_a: config.file_name_a.clone(),
        file_b: config.file_name_b.clone(),
        output_rows: output.table.row_count(),
        has_warnings: output.has_warnings(),
        removed: output.removed,
        output_file: file_name,
    };
    let audit_error = match audit.append(&record) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(error = %e, "failed to write run log");
            Some(e.to_string())
        }
    };

    Ok(JobReport {
        config_name: config.name,
        input_a,
        input_b,
        output_path,
        output_rows: output.table.row_count(),
        output_columns: output.table.column_count(),
        warnings: output.warnings,
        converted: output.converted,
        removed: output.removed,
        audit_error,
    })
}

/// Load a job's config and inputs and run only the validator
pub fn check_job(config_path: &Path, paths: &JobPaths) -> Result<Vec<Warning>> {
    let config = JobConfig::load(config_path)?;
    let (_, table_a) = load_input(&config.file_name_a, &paths.base_dir, &paths.input_dir)?;
    let (_, table_b) = load_input(&config.file_name_b, &paths.base_dir, &paths.input_dir)?;
    Ok(validate(&table_a, &table_b, &config.join, &config.validation))
}
