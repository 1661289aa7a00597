//! doclayout - reading-order reconstruction for layout-analysis results.
//!
//! Takes the structured result of a layout-analysis service (paragraphs,
//! tables, figures, sections and recognized words, each located by
//! page-relative polygons) and produces per-page text in reading order,
//! Markdown tables and word-based confidence scores. No I/O happens here.

pub mod api;
pub mod confidence;
pub mod error;
pub mod layout;
pub mod model;
pub mod table;
pub mod utils;

pub use api::{
    CellDetail, ElementDetail, ExtractOptions, ExtractedDocument, PageRecord, analyze_document,
    extract_page_text,
};
pub use confidence::{ConfidenceScore, WordScope};
pub use error::{LayoutError, Result};
pub use layout::{DocumentLayout, FigureAssociation, FigureAssociations, PageLayout, assign_layout};
pub use model::{AnalysisResult, ElementKind, ElementRef};
