//! Validate, join, rewrite and dedupe in one pass over two in-memory tables

use crate::config::JobConfig;
use crate::dedupe::dedupe;
use crate::join::join;
use crate::rules::apply_rules;
use crate::table::Table;
use crate::validator::{validate, Warning};

/// Everything the engine produces for one pair of inputs
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Joined, rewritten and (optionally) deduplicated table
    pub table: Table,
    /// Data-quality warnings raised against the raw inputs
    pub warnings: Vec<Warning>,
    /// Cells changed by rewrite rules
    pub converted: usize,
    /// Rows dropped by deduplication
    pub removed: usize,
}

impl PipelineOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the engine stages for one job
///
/// Validation never gates the join; both read the raw inputs.
pub fn run_pipeline(a: &Table, b: &Table, job: &JobConfig) -> PipelineOutput {
    let warnings = validate(a, b, &job.join, &job.validation);

    let mut table = join(a, b, &job.join);

    let converted = if job.rules.is_empty() {
        0
    } else {
        apply_rules(&mut table, &job.rules)
    };

    let (table, removed) = if job.validation.remove_duplicates {
        dedupe(table)
    } else {
        (table, 0)
    };

    tracing::info!(
        job = %job.name,
        output_rows = table.row_count(),
        warnings = warnings.len(),
        converted,
        removed,
        "pipeline complete"
    );

    PipelineOutput {
        table,
        warnings,
        converted,
        removed,
    }
}
