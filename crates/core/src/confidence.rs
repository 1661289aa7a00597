//! Word-level confidence aggregation.
//!
//! An element's confidence is derived from the recognized words whose
//! boxes fall inside the element's first bounding region. Two averages are
//! reported: a plain mean, and a mean weighted by word length in chars.

use serde::Serialize;

use crate::model::{AnalysisResult, Regioned, Word};
use crate::utils::{Polygon, is_polygon_inside};

/// Which words are candidates when scoring an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WordScope {
    /// Words of every page. Polygons are page-relative, so words from other
    /// pages can be attributed when their boxes happen to overlap.
    #[default]
    Document,
    /// Only words of the page named by the element's first bounding region.
    /// Regions without a page number fall back to the whole document.
    Page,
}

/// Simple and length-weighted average confidence, both within [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ConfidenceScore {
    pub average: f64,
    pub weighted: f64,
}

impl ConfidenceScore {
    pub const ZERO: Self = Self {
        average: 0.0,
        weighted: 0.0,
    };

    /// Aggregates `(confidence, length)` samples.
    pub fn from_samples(samples: &[(f64, usize)]) -> Self {
        if samples.is_empty() {
            return Self::ZERO;
        }

        let average = samples.iter().map(|(c, _)| c).sum::<f64>() / samples.len() as f64;

        let total_weight: usize = samples.iter().map(|(_, len)| len).sum();
        let weighted = if total_weight > 0 {
            samples.iter().map(|(c, len)| c * *len as f64).sum::<f64>() / total_weight as f64
        } else {
            0.0
        };

        Self {
            average: average.clamp(0.0, 1.0),
            weighted: weighted.clamp(0.0, 1.0),
        }
    }
}

/// Scores the words contained in `region`.
pub fn score_words<'a, I>(region: &Polygon, words: I) -> ConfidenceScore
where
    I: IntoIterator<Item = &'a Word>,
{
    if region.is_empty() {
        return ConfidenceScore::ZERO;
    }
    let samples: Vec<(f64, usize)> = words
        .into_iter()
        .filter(|w| is_polygon_inside(region, &w.polygon))
        .map(|w| (w.confidence, w.content.chars().count()))
        .collect();
    ConfidenceScore::from_samples(&samples)
}

/// Scores a paragraph, table, or cell against the document's words.
pub fn score_element<E: Regioned + ?Sized>(
    element: &E,
    doc: &AnalysisResult,
    scope: WordScope,
) -> ConfidenceScore {
    let Some(region) = element.primary_region() else {
        return ConfidenceScore::ZERO;
    };

    match (scope, region.page_number) {
        (WordScope::Page, Some(page)) => match doc.page_words(page) {
            Some(words) => score_words(&region.polygon, words),
            None => ConfidenceScore::ZERO,
        },
        _ => score_words(
            &region.polygon,
            doc.pages.iter().flat_map(|p| p.words.iter()),
        ),
    }
}
