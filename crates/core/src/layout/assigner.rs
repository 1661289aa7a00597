use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use crate::model::{AnalysisResult, BoundingRegion, ElementKind, ElementRef};
use crate::utils::Polygon;

/// Figures without a page number on a region land on this page.
const DEFAULT_FIGURE_PAGE: u32 = 1;

/// Reading order per page, keyed by ascending page number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLayout {
    pages: BTreeMap<u32, Vec<ElementRef>>,
}

impl PageLayout {
    pub fn new(pages: BTreeMap<u32, Vec<ElementRef>>) -> Self {
        Self { pages }
    }

    /// Ordered elements of a page, if the page has any.
    pub fn get(&self, page: u32) -> Option<&[ElementRef]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    pub fn page_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[ElementRef])> {
        self.pages.iter().map(|(&p, refs)| (p, refs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Paragraphs describing a figure and the figure's polygons.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FigureAssociation {
    /// Paragraph indices in the order the figure lists them.
    pub associated_paragraphs: Vec<usize>,
    /// One polygon per bounding region.
    pub polygons: Vec<Polygon>,
}

/// Figure reference to its association.
pub type FigureAssociations = BTreeMap<ElementRef, FigureAssociation>;

/// Output of [`assign_layout`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentLayout {
    pub pages: PageLayout,
    pub figures: FigureAssociations,
}

/// Element to the pages it has regions on, in discovery order.
#[derive(Default)]
struct Placement {
    pages_of: IndexMap<ElementRef, Vec<u32>>,
}

impl Placement {
    fn place(&mut self, element: ElementRef, page: u32) {
        let pages = self.pages_of.entry(element).or_default();
        if !pages.contains(&page) {
            pages.push(page);
        }
    }

    fn place_regions(&mut self, element: ElementRef, regions: &[BoundingRegion]) {
        if regions.is_empty() {
            debug!(%element, "element has no bounding regions");
        }
        for region in regions {
            match region.page_number {
                Some(page) => self.place(element, page),
                None => debug!(%element, "bounding region without page number skipped"),
            }
        }
    }

    fn pages(&self, element: &ElementRef) -> &[u32] {
        self.pages_of
            .get(element)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Assigns elements to pages and derives per-page reading order.
///
/// Malformed references are skipped. Referenced elements that sit on no
/// page are dropped, and pages without any section-referenced element do
/// not appear in the result.
pub fn assign_layout(doc: &AnalysisResult) -> DocumentLayout {
    let mut placement = Placement::default();

    for (i, para) in doc.paragraphs.iter().enumerate() {
        placement.place_regions(ElementRef::paragraph(i), &para.bounding_regions);
    }

    for (i, table) in doc.tables.iter().enumerate() {
        placement.place_regions(ElementRef::table(i), &table.bounding_regions);
    }

    let mut figures = FigureAssociations::new();
    for (i, figure) in doc.figures.iter().enumerate() {
        let element = ElementRef::figure(i);
        let mut polygons = Vec::with_capacity(figure.bounding_regions.len());
        for region in &figure.bounding_regions {
            placement.place(element, region.page_number.unwrap_or(DEFAULT_FIGURE_PAGE));
            polygons.push(region.polygon.clone());
        }

        let associated_paragraphs = figure
            .elements
            .iter()
            .filter_map(|enc| match enc.resolve() {
                Ok(r) => Some(r),
                Err(err) => {
                    trace!(%element, %err, "figure reference skipped");
                    None
                }
            })
            .filter(|r| r.kind == ElementKind::Paragraph)
            .map(|r| r.index)
            .filter(|&idx| {
                let known = idx < doc.paragraphs.len();
                if !known {
                    warn!(%element, paragraph = idx, "figure names a missing paragraph");
                }
                known
            })
            .collect();

        figures.insert(
            element,
            FigureAssociation {
                associated_paragraphs,
                polygons,
            },
        );
    }

    let mut ordered: BTreeMap<u32, IndexSet<ElementRef>> = BTreeMap::new();
    for (s, section) in doc.sections.iter().enumerate() {
        for enc in &section.elements {
            let element = match enc.resolve() {
                Ok(r) => r,
                Err(err) => {
                    debug!(section = s, %err, "section reference skipped");
                    continue;
                }
            };
            let pages = placement.pages(&element);
            if pages.is_empty() {
                trace!(section = s, %element, "referenced element is on no page");
            }
            for &page in pages {
                ordered.entry(page).or_default().insert(element);
            }
        }
    }

    let pages = ordered
        .into_iter()
        .map(|(page, refs)| (page, refs.into_iter().collect()))
        .collect();

    DocumentLayout {
        pages: PageLayout::new(pages),
        figures,
    }
}
