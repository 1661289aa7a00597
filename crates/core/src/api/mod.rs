//! High-level API module for document reconstruction.
//!
//! # Example
//!
//! ```ignore
//! use doclayout_core::api::{analyze_document, ExtractOptions};
//!
//! let out = analyze_document(&result, &ExtractOptions::default())?;
//! for (page, text) in &out.page_text {
//!     println!("{page}: {text}");
//! }
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{
    CellDetail, ElementDetail, ExtractOptions, ExtractedDocument, PageRecord, analyze_document,
    extract_page_text,
};
