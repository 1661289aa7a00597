//! Page assignment and reading order.
//!
//! Every paragraph, table and figure is placed on the page(s) its bounding
//! regions name. Sections then impose the reading order: walking all
//! section references in document order, each reference is appended to the
//! pages that actually hold the element. Figures additionally record the
//! paragraphs that describe them and their polygons.

mod assigner;

pub use assigner::{
    DocumentLayout, FigureAssociation, FigureAssociations, PageLayout, assign_layout,
};
