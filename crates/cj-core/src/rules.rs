//! Value rewrite rules applied to a joined table

use crate::config::RewriteRule;
use crate::table::Table;

/// Apply rules in order, rewriting matching cells in place
///
/// Each rule sees the table as left by the rules before it, so a value
/// rewritten by one rule can be picked up again by a later one. Matching is
/// exact and case-sensitive. The header is never rewritten. When a column
/// name appears more than once in the header, the last one is targeted.
/// Returns the number of cells changed.
pub fn apply_rules(table: &mut Table, rules: &[RewriteRule]) -> usize {
    let mut changed = 0;

    for rule in rules {
        if rule.is_inert() {
            continue;
        }
        let Some(col_idx) = table.header().iter().rposition(|h| *h == rule.column) else {
            tracing::debug!(column = %rule.column, "rule skipped, column not in header");
            continue;
        };

        let mut hits = 0;
        for row in table.data_rows_mut() {
            if let Some(value) = row.get_mut(col_idx) {
                if *value == rule.from {
                    value.clone_from(&rule.to);
                    hits += 1;
                }
            }
        }

        tracing::debug!(column = %rule.column, from = %rule.from, to = %rule.to, hits, "rule applied");
        changed += hits;
    }

    changed
}
