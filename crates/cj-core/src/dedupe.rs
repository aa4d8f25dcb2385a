//! Exact-duplicate row removal

use crate::table::{Row, Table};
use std::collections::HashSet;

/// Collapse identical data rows to their first occurrence
///
/// Row identity is the full field sequence. Rows are never compared through
/// a delimiter-joined string, so `["a|b"]` and `["a", "b"]` stay distinct.
/// The header is always kept. Returns the table and the number of rows
/// removed.
pub fn dedupe(table: Table) -> (Table, usize) {
    let mut rows = table.into_rows().into_iter();
    let header = rows.next().unwrap_or_default();

    let mut seen: HashSet<Row> = HashSet::new();
    let mut unique = Table::new(header);
    let mut removed = 0;

    for row in rows {
        if seen.contains(&row) {
            removed += 1;
            continue;
        }
        seen.insert(row.clone());
        unique.push_row(row);
    }

    tracing::debug!(kept = unique.row_count(), removed, "dedupe complete");
    (unique, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::row;

    fn table(rows: &[&[&str]]) -> Table {
        Table::from_rows(rows.iter().map(|r| row(*r)).collect()).unwrap()
    }

    #[test]
    fn test_identical_rows_collapse() {
        let input = table(&[
            &["id", "name", "city"],
            &["1", "Alice", "NYC"],
            &["1", "Alice", "NYC"],
        ]);
        let (result, removed) = dedupe(input);
        assert_eq!(removed, 1);
        assert_eq!(result, table(&[&["id", "name", "city"], &["1", "Alice", "NYC"]]));
    }

    #[test]
    fn test_first_occurrence_wins_and_order_kept() {
        let input = table(&[&["v"], &["b"], &["a"], &["b"], &["c"], &["a"]]);
        let (result, removed) = dedupe(input);
        assert_eq!(removed, 2);
        assert_eq!(result, table(&[&["v"], &["b"], &["a"], &["c"]]));
    }

    #[test]
    fn test_header_kept_even_if_duplicated_in_data() {
        let input = table(&[&["id"], &["id"], &["id"]]);
        let (result, removed) = dedupe(input);
        assert_eq!(removed, 1);
        assert_eq!(result, table(&[&["id"], &["id"]]));
    }

    #[test]
    fn test_separator_inside_fields_does_not_alias() {
        // Both rows join to "a|b|c" under a pipe-separated key
        let input = table(&[&["x", "y"], &["a|b", "c"], &["a", "b|c"]]);
        let (result, removed) = dedupe(input);
        assert_eq!(removed, 0);
        assert_eq!(result.row_count(), 2);
    }

    #[test]
    fn test_ragged_rows_compared_structurally() {
        let input = table(&[&["x", "y"], &["a"], &["a", ""], &["a"]]);
        let (result, removed) = dedupe(input);
        assert_eq!(removed, 1);
        assert_eq!(result, table(&[&["x", "y"], &["a"], &["a", ""]]));
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let input = table(&[&["k", "v"], &["1", "x"], &["2", "y"], &["1", "x"], &["2", "z"]]);
        let (once, _) = dedupe(input);
        let (twice, removed) = dedupe(once.clone());
        assert_eq!(twice, once);
        assert_eq!(removed, 0);
    }
}
