//! Layout-analysis result schema.
//!
//! Mirrors the JSON produced by the layout-analysis service. Only the
//! fields the reconstruction reads are modelled; everything else is
//! ignored on deserialization.

use serde::Deserialize;

use super::element_ref::ElementRefEncoding;
use crate::error::Result;
use crate::utils::Polygon;

/// Cell kind marking a column header.
pub const COLUMN_HEADER: &str = "columnHeader";

/// The complete analysis result for one document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    pub paragraphs: Vec<Paragraph>,
    pub tables: Vec<Table>,
    pub figures: Vec<Figure>,
    pub sections: Vec<Section>,
    pub pages: Vec<Page>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    analyze_result: AnalysisResult,
}

impl AnalysisResult {
    /// Decodes a result from JSON, accepting either the bare result or the
    /// service's `{"analyzeResult": ...}` envelope.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Decodes a result from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.get("analyzeResult").is_some() {
            let envelope: Envelope = serde_json::from_value(value)?;
            return Ok(envelope.analyze_result);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Words of the page with the given 1-based number.
    ///
    /// Pages that carry an explicit `pageNumber` are matched on it;
    /// otherwise the page's position in the sequence decides.
    pub fn page_words(&self, page_number: u32) -> Option<&[Word]> {
        self.pages
            .iter()
            .enumerate()
            .find(|(idx, page)| page.page_number.unwrap_or(*idx as u32 + 1) == page_number)
            .map(|(_, page)| page.words.as_slice())
    }
}

/// A (page, polygon) pair locating an element on a page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoundingRegion {
    pub page_number: Option<u32>,
    pub polygon: Polygon,
}

/// Anything located on the page by bounding regions.
pub trait Regioned {
    fn bounding_regions(&self) -> &[BoundingRegion];

    /// The first region, which carries the element's reported box.
    fn primary_region(&self) -> Option<&BoundingRegion> {
        self.bounding_regions().first()
    }

    /// Polygon of the first region, empty when the element has none.
    fn primary_polygon(&self) -> Polygon {
        self.primary_region()
            .map(|r| r.polygon.clone())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    pub content: String,
    pub bounding_regions: Vec<BoundingRegion>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    pub row_count: usize,
    pub column_count: usize,
    pub cells: Vec<TableCell>,
    pub bounding_regions: Vec<BoundingRegion>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCell {
    pub row_index: usize,
    pub column_index: usize,
    pub content: String,
    pub column_span: Option<usize>,
    pub kind: Option<String>,
    pub bounding_regions: Vec<BoundingRegion>,
}

impl TableCell {
    pub fn is_column_header(&self) -> bool {
        self.kind.as_deref() == Some(COLUMN_HEADER)
    }

    /// Number of grid columns the cell covers, at least one.
    pub fn span(&self) -> usize {
        self.column_span.unwrap_or(1).max(1)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Figure {
    pub bounding_regions: Vec<BoundingRegion>,
    pub elements: Vec<ElementRefEncoding>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub elements: Vec<ElementRefEncoding>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    pub page_number: Option<u32>,
    pub words: Vec<Word>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Word {
    pub content: String,
    pub polygon: Polygon,
    pub confidence: f64,
}

macro_rules! impl_regioned {
    ($($ty:ty),*) => {
        $(impl Regioned for $ty {
            fn bounding_regions(&self) -> &[BoundingRegion] {
                &self.bounding_regions
            }
        })*
    };
}

impl_regioned!(Paragraph, Table, TableCell, Figure);
