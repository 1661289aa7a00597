//! Error types for doclayout reconstruction.

use thiserror::Error;

/// Primary error type for layout reconstruction.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// An element reference that is neither a `/kind/index` path nor a
    /// `[_, kind, index]` triple, or names an unplaceable kind.
    #[error("malformed element reference: {0}")]
    MalformedReference(String),

    /// A table cell addresses a slot outside the declared grid.
    #[error(
        "table {table}: cell at row {row}, column {column} (span {span}) \
         lies outside the {rows}x{columns} grid"
    )]
    GridShape {
        table: usize,
        row: usize,
        column: usize,
        span: usize,
        rows: usize,
        columns: usize,
    },

    #[error("worker pool error: {0}")]
    ThreadPool(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;
