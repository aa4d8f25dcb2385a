//! Non-fatal data-quality checks over the raw input tables

use crate::config::{JoinConfig, Source, ValidationConfig};
use crate::table::Table;
use std::collections::HashSet;
use std::fmt;

/// Class of data-quality defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Key field empty after trimming
    BlankKey,
    /// Key value shared by more than one row
    DuplicateKey,
    /// Row width differs from the header width
    ColumnCountMismatch,
}

/// An aggregate data-quality observation for one input table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub source: Source,
    pub count: usize,
}

impl Warning {
    fn new(kind: WarningKind, source: Source, count: usize) -> Self {
        Self { kind, source, count }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::BlankKey => {
                write!(f, "CSV {} has {} blank join key(s)", self.source, self.count)
            }
            WarningKind::DuplicateKey => {
                write!(f, "CSV {} has {} duplicate join key(s)", self.source, self.count)
            }
            WarningKind::ColumnCountMismatch => write!(
                f,
                "CSV {} has {} row(s) with a column count different from the header",
                self.source, self.count
            ),
        }
    }
}

/// Run every enabled check against both inputs
///
/// Warnings are ordered blank, duplicate, column count, with A before B
/// inside each check. Rows too short to hold the key are left out of the
/// key-based counts.
pub fn validate(a: &Table, b: &Table, join: &JoinConfig, checks: &ValidationConfig) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let sides = [(Source::A, a, join.key_a), (Source::B, b, join.key_b)];

    if checks.check_blank {
        for (source, table, key) in sides {
            let count = blank_keys(table, key);
            if count > 0 {
                warnings.push(Warning::new(WarningKind::BlankKey, source, count));
            }
        }
    }

    if checks.check_duplicate {
        for (source, table, key) in sides {
            let count = duplicate_keys(table, key);
            if count > 0 {
                warnings.push(Warning::new(WarningKind::DuplicateKey, source, count));
            }
        }
    }

    if checks.check_column_count {
        for (source, table, _) in sides {
            let count = width_mismatches(table);
            if count > 0 {
                warnings.push(Warning::new(WarningKind::ColumnCountMismatch, source, count));
            }
        }
    }

    for warning in &warnings {
        tracing::debug!(kind = ?warning.kind, source = %warning.source, count = warning.count, "{}", warning);
    }

    warnings
}

fn blank_keys(table: &Table, key: usize) -> usize {
    table
        .data_rows()
        .iter()
        .filter_map(|row| row.get(key))
        .filter(|value| value.trim().is_empty())
        .count()
}

/// Number of key occurrences beyond the first for each distinct key
fn duplicate_keys(table: &Table, key: usize) -> usize {
    let keys: Vec<&str> = table
        .data_rows()
        .iter()
        .filter_map(|row| row.get(key))
        .map(String::as_str)
        .collect();
    let distinct: HashSet<&str> = keys.iter().copied().collect();
    keys.len() - distinct.len()
}

fn width_mismatches(table: &Table) -> usize {
    let expected = table.column_count();
    table
        .data_rows()
        .iter()
        .filter(|row| row.len() != expected)
        .count()
}
