//! Join engine for combining two tables on a single key column

use crate::config::{ColumnSpec, JoinConfig, JoinType, Source};
use crate::table::{field, Row, Table};
use std::collections::{HashMap, HashSet};

/// Rows grouped by key value, each group kept in input order
type KeyGroups<'t> = HashMap<&'t str, Vec<&'t Row>>;

/// Join two tables according to `config`
///
/// Keys are compared as exact text. Duplicate keys fan out into one output
/// row per matching pair. Rows too short to hold their key column are
/// skipped entirely: they neither match nor appear as unmatched rows.
pub fn join(a: &Table, b: &Table, config: &JoinConfig) -> Table {
    let columns: Vec<&ColumnSpec> = config.selected_columns().collect();
    let header: Row = columns.iter().map(|c| c.name.clone()).collect();
    let mut output = Table::new(header);

    match config.join_type {
        JoinType::Inner | JoinType::Left | JoinType::Outer => {
            let groups_b = group_by_key(b, config.key_b);
            let keep_unmatched = config.join_type != JoinType::Inner;
            let mut matched_keys: HashSet<&str> = HashSet::new();

            for row_a in a.data_rows() {
                let Some(key) = row_a.get(config.key_a) else {
                    continue;
                };

                match groups_b.get(key.as_str()) {
                    Some(rows_b) => {
                        for &row_b in rows_b {
                            output.push_row(project(&columns, Some(row_a), Some(row_b)));
                        }
                        matched_keys.insert(key.as_str());
                    }
                    None if keep_unmatched => {
                        output.push_row(project(&columns, Some(row_a), None));
                    }
                    None => {}
                }
            }

            if config.join_type == JoinType::Outer {
                // A key matched by any A row marks every B row under it as matched
                for row_b in b.data_rows() {
                    let Some(key) = row_b.get(config.key_b) else {
                        continue;
                    };
                    if !matched_keys.contains(key.as_str()) {
                        output.push_row(project(&columns, None, Some(row_b)));
                    }
                }
            }
        }
        JoinType::Right => {
            let groups_a = group_by_key(a, config.key_a);

            for row_b in b.data_rows() {
                let Some(key) = row_b.get(config.key_b) else {
                    continue;
                };

                match groups_a.get(key.as_str()) {
                    Some(rows_a) => {
                        for &row_a in rows_a {
                            output.push_row(project(&columns, Some(row_a), Some(row_b)));
                        }
                    }
                    None => output.push_row(project(&columns, None, Some(row_b))),
                }
            }
        }
    }

    tracing::debug!(
        join_type = ?config.join_type,
        rows_a = a.row_count(),
        rows_b = b.row_count(),
        output_rows = output.row_count(),
        "join complete"
    );

    output
}

/// Group data rows by their key field, skipping rows without one
fn group_by_key(table: &Table, key: usize) -> KeyGroups<'_> {
    let mut groups: KeyGroups<'_> = HashMap::new();
    for row in table.data_rows() {
        if let Some(value) = row.get(key) {
            groups.entry(value.as_str()).or_default().push(row);
        }
    }
    groups
}

/// Build one output row. A missing side contributes empty fields.
fn project(columns: &[&ColumnSpec], row_a: Option<&Row>, row_b: Option<&Row>) -> Row {
    columns
        .iter()
        .map(|col| {
            let source_row = match col.source {
                Source::A => row_a,
                Source::B => row_b,
            };
            source_row
                .map(|r| field(r, col.index).to_string())
                .unwrap_or_default()
        })
        .collect()
}
