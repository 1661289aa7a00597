//! Input model types.
//!
//! - `result` - the layout-analysis result schema (paragraphs, tables,
//!   figures, sections, pages and words)
//! - `element_ref` - element references and their two wire encodings

pub mod element_ref;
pub mod result;

// Re-export main types for convenience
pub use element_ref::{ElementKind, ElementRef, ElementRefEncoding};
pub use result::{
    AnalysisResult, BoundingRegion, COLUMN_HEADER, Figure, Page, Paragraph, Regioned, Section,
    Table, TableCell, Word,
};
