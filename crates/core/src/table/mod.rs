//! Table rendering.
//!
//! Converts a recognized table (sparse cells with column spans and header
//! flags) into a Markdown pipe table:
//! 1. Place cells into a dense grid, replicating spanned content
//! 2. Fold header rows into one header per column
//! 3. Merge adjacent columns sharing a non-empty header
//! 4. Format the result as a pipe table

mod grid;
mod markdown;

pub use grid::{CellGrid, TableView};
pub use markdown::render;

use crate::error::Result;
use crate::model::Table;

/// Builds the merged header/data view of a table.
///
/// `table_index` only labels errors.
pub fn table_view(table: &Table, table_index: usize) -> Result<TableView> {
    Ok(grid::build_grid(table, table_index)?.into_view())
}

/// Renders a table as Markdown.
///
/// Fails with [`crate::LayoutError::GridShape`] when a cell lies outside
/// the declared `row_count x column_count` grid.
pub fn table_markdown(table: &Table, table_index: usize) -> Result<String> {
    Ok(render(&table_view(table, table_index)?))
}
