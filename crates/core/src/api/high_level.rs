//! High-level reconstruction API.
//!
//! Provides the main public entry points:
//! - `analyze_document()` - assign layout, then extract every page
//! - `extract_page_text()` - extract pages for an existing layout
//!
//! Pages are processed in parallel on a rayon pool; a table's cells are
//! scored in parallel on the same pool when cell confidence is requested.
//! Results are re-sorted by page number before they are merged, so output
//! never depends on completion order.

use std::collections::BTreeMap;
use std::time::Instant;

use indexmap::IndexMap;
use itertools::Itertools;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::confidence::{ConfidenceScore, WordScope, score_element};
use crate::error::{LayoutError, Result};
use crate::layout::{DocumentLayout, FigureAssociations, PageLayout, assign_layout};
use crate::model::{AnalysisResult, ElementKind, ElementRef, Regioned, Table};
use crate::table::table_markdown;
use crate::utils::Polygon;

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Options for page extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Score paragraphs and tables from their contained words.
    pub compute_element_confidence: bool,

    /// Also score every table cell. Only honored together with
    /// `compute_element_confidence`.
    pub compute_cell_confidence: bool,

    /// Which words are candidates when scoring.
    pub word_scope: WordScope,

    /// Abort on the first table whose cells do not fit its grid instead of
    /// substituting empty content for that table.
    pub strict_tables: bool,

    /// Worker threads. None uses the available parallelism.
    pub num_threads: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            compute_element_confidence: true,
            compute_cell_confidence: false,
            word_scope: WordScope::Document,
            strict_tables: false,
            num_threads: None,
        }
    }
}

impl ExtractOptions {
    pub fn with_element_confidence(mut self, enabled: bool) -> Self {
        self.compute_element_confidence = enabled;
        self
    }

    pub fn with_cell_confidence(mut self, enabled: bool) -> Self {
        self.compute_cell_confidence = enabled;
        self
    }

    pub fn with_word_scope(mut self, scope: WordScope) -> Self {
        self.word_scope = scope;
        self
    }

    pub fn with_strict_tables(mut self, strict: bool) -> Self {
        self.strict_tables = strict;
        self
    }

    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads.max(1));
        self
    }

    fn cell_confidence(&self) -> bool {
        self.compute_element_confidence && self.compute_cell_confidence
    }
}

/// Confidence and location of one table cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellDetail {
    pub row_index: usize,
    pub column_index: usize,
    pub content: String,
    pub bounding_box: Polygon,
    pub confidence_score: ConfidenceScore,
}

/// One placed element of a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementDetail {
    pub element_name: ElementKind,
    pub content: String,
    pub bounding_box: Polygon,
    pub confidence_score: ConfidenceScore,
    /// Per-cell details, sorted by (row, column). Tables only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<CellDetail>>,
}

/// Elements of one page in reading order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageRecord {
    pub page_number: u32,
    pub elements: Vec<ElementDetail>,
}

/// Reconstruction of a whole document.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExtractedDocument {
    /// Page text keyed by ascending page number.
    pub page_text: BTreeMap<u32, String>,
    /// Table Markdown keyed by "1".."K" in page, then discovery, order.
    pub table_text: IndexMap<String, String>,
    /// Every page prefixed with a `Page Number N` line, in page order.
    pub full_document_text: String,
    /// Element details per page, in page order.
    pub page_elements: Vec<PageRecord>,
}

/// Result of processing a single page.
struct PageOutput {
    page_number: u32,
    text: String,
    elements: Vec<ElementDetail>,
    /// Tables recorded for the table-text map, in discovery order.
    tables: Vec<String>,
}

/// Runs layout assignment and page extraction on an analysis result.
///
/// # Example
/// ```ignore
/// use doclayout_core::{AnalysisResult, ExtractOptions, analyze_document};
///
/// let doc = AnalysisResult::from_json(&std::fs::read_to_string("result.json")?)?;
/// let out = analyze_document(&doc, &ExtractOptions::default())?;
/// println!("{}", out.full_document_text);
/// ```
pub fn analyze_document(
    doc: &AnalysisResult,
    options: &ExtractOptions,
) -> Result<ExtractedDocument> {
    let DocumentLayout { pages, figures } = assign_layout(doc);
    extract_page_text(doc, &pages, &figures, options)
}

/// Extracts text, tables and element details for every page of `layout`.
pub fn extract_page_text(
    doc: &AnalysisResult,
    layout: &PageLayout,
    figures: &FigureAssociations,
    options: &ExtractOptions,
) -> Result<ExtractedDocument> {
    let thread_count = options.num_threads.unwrap_or_else(default_thread_count);
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| LayoutError::ThreadPool(e.to_string()))?;

    let pages: Vec<(u32, &[ElementRef])> = layout.iter().collect();
    let results: Vec<Result<PageOutput>> = pool.install(|| {
        pages
            .into_par_iter()
            .map(|(page_number, refs)| process_page(page_number, refs, doc, figures, options))
            .collect()
    });

    let mut outputs = results.into_iter().collect::<Result<Vec<_>>>()?;
    outputs.sort_by_key(|o| o.page_number);

    let mut extracted = ExtractedDocument::default();
    let mut table_seq = 0usize;
    for output in outputs {
        for markdown in output.tables {
            table_seq += 1;
            extracted.table_text.insert(table_seq.to_string(), markdown);
        }
        extracted.page_text.insert(output.page_number, output.text);
        extracted.page_elements.push(PageRecord {
            page_number: output.page_number,
            elements: output.elements,
        });
    }

    extracted.full_document_text = extracted
        .page_text
        .iter()
        .map(|(page, text)| format!("Page Number {page}\n{text}"))
        .join("\n\n");

    Ok(extracted)
}

fn process_page(
    page_number: u32,
    refs: &[ElementRef],
    doc: &AnalysisResult,
    figures: &FigureAssociations,
    options: &ExtractOptions,
) -> Result<PageOutput> {
    let started = Instant::now();
    let mut texts = Vec::with_capacity(refs.len());
    let mut elements = Vec::with_capacity(refs.len());
    let mut tables = Vec::new();

    for &element in refs {
        let detail = match element.kind {
            ElementKind::Paragraph => paragraph_detail(element.index, doc, options),
            ElementKind::Table => table_detail(element.index, doc, options, &mut tables)?,
            ElementKind::Figure => Some(figure_detail(element, doc, figures)),
        };
        let Some(detail) = detail else {
            warn!(page = page_number, %element, "layout names a missing element");
            continue;
        };
        texts.push(detail.content.clone());
        elements.push(detail);
    }

    debug!(
        page = page_number,
        elements = elements.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "page processed"
    );

    Ok(PageOutput {
        page_number,
        text: texts.join("\n\n"),
        elements,
        tables,
    })
}

fn paragraph_detail(
    index: usize,
    doc: &AnalysisResult,
    options: &ExtractOptions,
) -> Option<ElementDetail> {
    let para = doc.paragraphs.get(index)?;
    let confidence_score = if options.compute_element_confidence {
        score_element(para, doc, options.word_scope)
    } else {
        ConfidenceScore::ZERO
    };
    Some(ElementDetail {
        element_name: ElementKind::Paragraph,
        content: para.content.clone(),
        bounding_box: para.primary_polygon(),
        confidence_score,
        cells: None,
    })
}

/// Renders a table, isolating grid-shape failures unless strict.
fn render_table(table: &Table, index: usize, options: &ExtractOptions) -> Result<String> {
    match table_markdown(table, index) {
        Ok(markdown) => Ok(markdown),
        Err(err) if !options.strict_tables => {
            warn!(table = index, %err, "table replaced by empty placeholder");
            Ok(String::new())
        }
        Err(err) => Err(err),
    }
}

fn table_detail(
    index: usize,
    doc: &AnalysisResult,
    options: &ExtractOptions,
    tables: &mut Vec<String>,
) -> Result<Option<ElementDetail>> {
    let Some(table) = doc.tables.get(index) else {
        return Ok(None);
    };
    let content = render_table(table, index, options)?;

    let mut confidence_score = ConfidenceScore::ZERO;
    let mut cells = None;
    if options.compute_element_confidence {
        confidence_score = score_element(table, doc, options.word_scope);
        tables.push(content.clone());

        if options.cell_confidence() {
            cells = Some(cell_details(table, doc, options.word_scope));
        }
    }

    Ok(Some(ElementDetail {
        element_name: ElementKind::Table,
        content,
        bounding_box: table.primary_polygon(),
        confidence_score,
        cells,
    }))
}

fn cell_details(table: &Table, doc: &AnalysisResult, scope: WordScope) -> Vec<CellDetail> {
    let mut cells: Vec<CellDetail> = table
        .cells
        .par_iter()
        .map(|cell| CellDetail {
            row_index: cell.row_index,
            column_index: cell.column_index,
            content: cell.content.clone(),
            bounding_box: cell.primary_polygon(),
            confidence_score: score_element(cell, doc, scope),
        })
        .collect();
    cells.sort_by_key(|c| (c.row_index, c.column_index));
    cells
}

/// Figures carry the text of their describing paragraphs, each followed by
/// a space, and the polygon of their first region.
fn figure_detail(
    element: ElementRef,
    doc: &AnalysisResult,
    figures: &FigureAssociations,
) -> ElementDetail {
    let (content, bounding_box) = match figures.get(&element) {
        Some(assoc) => {
            let content = assoc
                .associated_paragraphs
                .iter()
                .filter_map(|&i| doc.paragraphs.get(i))
                .map(|p| format!("{} ", p.content))
                .collect::<String>();
            let bbox = assoc.polygons.first().cloned().unwrap_or_default();
            (content, bbox)
        }
        None => {
            debug!(%element, "figure has no association");
            (String::new(), Polygon::default())
        }
    };

    ElementDetail {
        element_name: ElementKind::Figure,
        content,
        bounding_box,
        confidence_score: ConfidenceScore::ZERO,
        cells: None,
    }
}
