//! Table extractor — reconstruct header/row matrices from captured tables.
//!
//! Visibility is checked at table granularity only. An invisible row
//! inside a visible table is still emitted; tables are usually shown or
//! hidden atomically, and the per-table check is the stated rule.

use crate::engine::dom::{DocumentHandle, TableNode};
use crate::engine::{normalize_whitespace, visibility::is_visible};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One reconstructed table: one entry per surviving header row and body
/// row, each holding one normalized cell per column in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    pub headers: Vec<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

/// Normalize every cell and keep only rows with at least one non-empty
/// cell. Markup is full of structural spacer rows; admitting them would
/// hand consumers noise rows indistinguishable from data by column count.
fn keep_rows(raw_rows: &[Vec<String>]) -> Vec<Vec<String>> {
    raw_rows
        .iter()
        .map(|row| row.iter().map(|cell| normalize_whitespace(cell)).collect())
        .filter(|cells: &Vec<String>| cells.iter().any(|cell| !cell.is_empty()))
        .collect()
}

/// Pure core: drop invisible tables, filter blank-only rows, and drop any
/// table left with no rows at all — it carries no signal.
pub fn tables_from_nodes(nodes: &[TableNode]) -> Vec<TableRecord> {
    nodes
        .iter()
        .filter(|node| is_visible(&node.facts))
        .filter_map(|node| {
            let headers = keep_rows(&node.header_rows);
            let rows = keep_rows(&node.body_rows);
            if headers.is_empty() && rows.is_empty() {
                None
            } else {
                Some(TableRecord { headers, rows })
            }
        })
        .collect()
}

/// Capture fresh table candidates from the document and extract records.
pub async fn extract_tables(doc: &dyn DocumentHandle) -> Result<Vec<TableRecord>> {
    Ok(tables_from_nodes(&doc.table_nodes().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dom::{BoundingRect, ElementFacts, StyleFacts};

    fn table(display: &str, header_rows: &[&[&str]], body_rows: &[&[&str]]) -> TableNode {
        let to_rows = |rows: &[&[&str]]| {
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect()
        };
        TableNode {
            facts: ElementFacts {
                style: Some(StyleFacts {
                    visibility: "visible".to_string(),
                    display: display.to_string(),
                }),
                rect: BoundingRect {
                    width: 400.0,
                    height: 200.0,
                },
                text: String::new(),
            },
            header_rows: to_rows(header_rows),
            body_rows: to_rows(body_rows),
        }
    }

    #[test]
    fn test_blank_only_table_is_elided() {
        let nodes = vec![table("table", &[&["", "  "]], &[&["", ""], &["\t", "\n"]])];
        assert!(tables_from_nodes(&nodes).is_empty());
    }

    #[test]
    fn test_blank_header_row_contributes_nothing() {
        let nodes = vec![table(
            "table",
            &[&["", ""], &["Name", "Price"]],
            &[&["Widget", "9.99"]],
        )];
        let records = tables_from_nodes(&nodes);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].headers.len(), 1);
        assert_eq!(records[0].headers[0], vec!["Name", "Price"]);
    }

    #[test]
    fn test_invisible_table_is_skipped_entirely() {
        let nodes = vec![
            table("none", &[&["Hidden"]], &[&["a", "b"]]),
            table("table", &[], &[&["1", "2"], &["3", "4"]]),
        ];
        let records = tables_from_nodes(&nodes);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_cells_are_normalized_in_column_order() {
        let nodes = vec![table("table", &[], &[&["  Total \n due ", " 42 "]])];
        let records = tables_from_nodes(&nodes);
        assert_eq!(records[0].rows[0], vec!["Total due", "42"]);
    }

    #[test]
    fn test_spacer_rows_dropped_but_partial_rows_kept() {
        let nodes = vec![table("table", &[], &[&["", ""], &["only", ""], &["", ""]])];
        let records = tables_from_nodes(&nodes);
        assert_eq!(records[0].rows, vec![vec!["only", ""]]);
    }
}
