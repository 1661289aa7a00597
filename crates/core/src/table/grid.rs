//! Cell grid construction for recognized tables.
//!
//! A table arrives as a sparse list of cells. This module places them into
//! a dense `row_count x column_count` grid, classifies header rows, folds
//! multi-row headers into one header per column and merges adjacent
//! columns that share a header.

use itertools::Itertools;

use crate::error::{LayoutError, Result};
use crate::model::Table;

/// Dense grid of cell text with header-row flags.
#[derive(Clone, Debug, PartialEq)]
pub struct CellGrid {
    pub rows: Vec<Vec<String>>,
    pub header_rows: Vec<bool>,
    /// Declared column count, kept for tables without rows.
    pub n_cols: usize,
}

/// A table reduced to one header line per column and its data rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Places every cell into the grid.
///
/// A cell spanning several columns writes its content into each covered
/// slot, for header and data cells alike. Embedded newlines are removed.
/// A cell outside the declared bounds is a [`LayoutError::GridShape`].
pub(crate) fn build_grid(table: &Table, table_index: usize) -> Result<CellGrid> {
    let (n_rows, n_cols) = (table.row_count, table.column_count);
    let mut rows = vec![vec![String::new(); n_cols]; n_rows];
    let mut header_rows = vec![false; n_rows];

    for cell in &table.cells {
        let span = cell.span();
        let end = cell.column_index.saturating_add(span);
        if cell.row_index >= n_rows || end > n_cols {
            return Err(LayoutError::GridShape {
                table: table_index,
                row: cell.row_index,
                column: cell.column_index,
                span,
                rows: n_rows,
                columns: n_cols,
            });
        }

        let content = cell.content.replace('\n', "");
        for slot in &mut rows[cell.row_index][cell.column_index..end] {
            slot.clone_from(&content);
        }
        if cell.is_column_header() {
            header_rows[cell.row_index] = true;
        }
    }

    Ok(CellGrid {
        rows,
        header_rows,
        n_cols,
    })
}

impl CellGrid {
    pub fn column_count(&self) -> usize {
        self.n_cols
    }

    fn header_iter(&self) -> impl Iterator<Item = &Vec<String>> {
        self.rows
            .iter()
            .zip(&self.header_rows)
            .filter_map(|(row, &is_header)| is_header.then_some(row))
    }

    fn data_iter(&self) -> impl Iterator<Item = &Vec<String>> {
        self.rows
            .iter()
            .zip(&self.header_rows)
            .filter_map(|(row, &is_header)| (!is_header).then_some(row))
    }

    /// One header per column: the non-empty header-row texts of that column
    /// joined top to bottom with newlines. Without header rows the headers
    /// are `Column 1` .. `Column N`.
    pub fn column_headers(&self) -> Vec<String> {
        let n_cols = self.column_count();
        if !self.header_rows.iter().any(|&h| h) {
            return (1..=n_cols).map(|i| format!("Column {i}")).collect();
        }

        (0..n_cols)
            .map(|col| {
                self.header_iter()
                    .map(|row| row[col].trim())
                    .filter(|text| !text.is_empty())
                    .join("\n")
            })
            .collect()
    }

    /// Collapses runs of adjacent columns whose header is identical and
    /// non-empty. Data in a merged run is space-joined after trimming; rows
    /// left entirely empty are dropped.
    pub fn into_view(self) -> TableView {
        let headers = self.column_headers();
        let groups = merge_groups(&headers);

        let merged_headers = groups.iter().map(|g| headers[g.start].clone()).collect();
        let merged_rows = self
            .data_iter()
            .map(|row| {
                groups
                    .iter()
                    .map(|g| {
                        row[g.clone()]
                            .iter()
                            .map(|v| v.trim())
                            .filter(|v| !v.is_empty())
                            .join(" ")
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|row| row.iter().any(|v| !v.is_empty()))
            .collect();

        TableView {
            headers: merged_headers,
            rows: merged_rows,
        }
    }
}

/// Column ranges to merge, left to right.
fn merge_groups(headers: &[String]) -> Vec<std::ops::Range<usize>> {
    let mut groups = Vec::new();
    let mut start = 0;
    while start < headers.len() {
        let header = &headers[start];
        let mut end = start + 1;
        if !header.is_empty() {
            while end < headers.len() && headers[end] == *header {
                end += 1;
            }
        }
        groups.push(start..end);
        start = end;
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableCell;

    fn cell(row: usize, col: usize, content: &str) -> TableCell {
        TableCell {
            row_index: row,
            column_index: col,
            content: content.to_string(),
            ..Default::default()
        }
    }

    fn header(row: usize, col: usize, content: &str, span: Option<usize>) -> TableCell {
        TableCell {
            kind: Some("columnHeader".to_string()),
            column_span: span,
            ..cell(row, col, content)
        }
    }

    fn table(rows: usize, cols: usize, cells: Vec<TableCell>) -> Table {
        Table {
            row_count: rows,
            column_count: cols,
            cells,
            ..Default::default()
        }
    }

    #[test]
    fn spans_fill_every_covered_slot() {
        let t = table(
            2,
            3,
            vec![
                header(0, 0, "Name", Some(2)),
                header(0, 2, "Age", None),
                TableCell {
                    column_span: Some(3),
                    ..cell(1, 0, "x")
                },
            ],
        );
        let grid = build_grid(&t, 0).unwrap();
        assert_eq!(grid.rows[0], vec!["Name", "Name", "Age"]);
        assert_eq!(grid.rows[1], vec!["x", "x", "x"]);
        assert_eq!(grid.header_rows, vec![true, false]);
    }

    #[test]
    fn embedded_newlines_are_removed() {
        let t = table(1, 1, vec![cell(0, 0, "a\nb")]);
        assert_eq!(build_grid(&t, 0).unwrap().rows[0][0], "ab");
    }

    #[test]
    fn out_of_bounds_cells_are_rejected() {
        for bad in [
            cell(2, 0, "row"),
            cell(0, 3, "col"),
            TableCell {
                column_span: Some(2),
                ..cell(0, 2, "span")
            },
        ] {
            let err = build_grid(&table(2, 3, vec![bad]), 5).unwrap_err();
            assert!(matches!(err, LayoutError::GridShape { table: 5, .. }));
        }
    }

    #[test]
    fn multi_row_headers_fold_vertically() {
        let t = table(
            3,
            2,
            vec![
                header(0, 0, "Q1", Some(2)),
                header(1, 0, "Jan", None),
                header(1, 1, "", None),
                cell(2, 0, "1"),
                cell(2, 1, "2"),
            ],
        );
        let grid = build_grid(&t, 0).unwrap();
        assert_eq!(grid.column_headers(), vec!["Q1\nJan", "Q1"]);
    }

    #[test]
    fn default_headers_without_header_rows() {
        let t = table(1, 2, vec![cell(0, 0, "a"), cell(0, 1, "b")]);
        let view = build_grid(&t, 0).unwrap().into_view();
        assert_eq!(view.headers, vec!["Column 1", "Column 2"]);
        assert_eq!(view.rows, vec![vec!["a", "b"]]);
    }

    #[test]
    fn rowless_table_keeps_declared_columns() {
        let view = build_grid(&table(0, 3, vec![]), 0).unwrap().into_view();
        assert_eq!(view.headers, vec!["Column 1", "Column 2", "Column 3"]);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn empty_headers_never_merge() {
        let headers: Vec<String> = ["", "", "A", "A", "B"].map(String::from).to_vec();
        let groups = merge_groups(&headers);
        assert_eq!(groups, vec![0..1, 1..2, 2..4, 4..5]);
    }

    #[test]
    fn empty_rows_are_dropped_after_merge() {
        let t = table(
            3,
            2,
            vec![
                header(0, 0, "A", None),
                header(0, 1, "B", None),
                cell(1, 0, "  "),
                cell(2, 1, "z"),
            ],
        );
        let view = build_grid(&t, 0).unwrap().into_view();
        assert_eq!(view.rows, vec![vec!["", "z"]]);
    }
}
