//! cj-core: Core library for configuration-driven CSV joins
//!
//! This library provides functionality to:
//! - Load delimited text into ragged in-memory tables
//! - Validate join inputs and report data-quality warnings
//! - Join two tables (inner, left, right, full outer) with column projection
//! - Apply ordered value rewrite rules and drop duplicate rows
//! - Write BOM-prefixed CSV output and keep an append-only run log

pub mod audit;
pub mod config;
pub mod dedupe;
pub mod discovery;
pub mod error;
pub mod job;
pub mod join;
pub mod loader;
pub mod pipeline;
pub mod rules;
pub mod table;
pub mod validator;
pub mod writer;

pub use audit::{AuditSink, CsvRunLog, RunRecord};
pub use config::{ColumnSpec, JobConfig, JoinConfig, JoinType, RewriteRule, Source, ValidationConfig};
pub use dedupe::dedupe;
pub use discovery::discover_config;
pub use error::{Error, Result};
pub use job::{check_job, run_job, JobPaths, JobReport};
pub use join::join;
pub use loader::{find_input_file, load_input, parse_table_str, read_table};
pub use pipeline::{run_pipeline, PipelineOutput};
pub use rules::apply_rules;
pub use table::{field, Row, Table};
pub use validator::{validate, Warning, WarningKind};
pub use writer::{output_file_name, write_table};
