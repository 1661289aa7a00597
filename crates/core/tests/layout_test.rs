//! Tests for page assignment and section reading order.

use doclayout_core::{AnalysisResult, ElementRef, assign_layout};
use serde_json::json;

fn region(page: u32) -> serde_json::Value {
    json!({ "pageNumber": page, "polygon": [0, 0, 1, 0, 1, 1, 0, 1] })
}

fn doc(value: serde_json::Value) -> AnalysisResult {
    AnalysisResult::from_value(value).unwrap()
}

#[test]
fn test_section_order_across_pages() {
    let doc = doc(json!({
        "paragraphs": [
            { "content": "intro", "boundingRegions": [region(1)] },
            { "content": "next", "boundingRegions": [region(2)] }
        ],
        "tables": [
            { "rowCount": 0, "columnCount": 0, "cells": [], "boundingRegions": [region(1)] }
        ],
        "sections": [
            { "elements": ["/paragraphs/0", "/tables/0", "/paragraphs/1"] }
        ]
    }));

    let layout = assign_layout(&doc);
    assert_eq!(
        layout.pages.get(1),
        Some(&[ElementRef::paragraph(0), ElementRef::table(0)][..])
    );
    assert_eq!(layout.pages.get(2), Some(&[ElementRef::paragraph(1)][..]));
    assert_eq!(layout.pages.len(), 2);
}

#[test]
fn test_section_order_overrides_structural_order() {
    let doc = doc(json!({
        "paragraphs": [
            { "content": "a", "boundingRegions": [region(1)] },
            { "content": "b", "boundingRegions": [region(1)] }
        ],
        "figures": [
            { "boundingRegions": [region(1)], "elements": [] }
        ],
        "sections": [
            { "elements": ["/figures/0", "/paragraphs/1"] },
            { "elements": [["", "paragraphs", 0]] }
        ]
    }));

    let layout = assign_layout(&doc);
    assert_eq!(
        layout.pages.get(1),
        Some(
            &[
                ElementRef::figure(0),
                ElementRef::paragraph(1),
                ElementRef::paragraph(0)
            ][..]
        )
    );
}

#[test]
fn test_duplicate_references_are_idempotent() {
    let doc = doc(json!({
        "paragraphs": [{ "content": "a", "boundingRegions": [region(3)] }],
        "sections": [
            { "elements": ["/paragraphs/0", ["", "paragraphs", "0"]] },
            { "elements": ["/paragraphs/0"] }
        ]
    }));

    let layout = assign_layout(&doc);
    assert_eq!(layout.pages.get(3), Some(&[ElementRef::paragraph(0)][..]));
}

#[test]
fn test_unreferenced_and_unknown_elements() {
    let doc = doc(json!({
        "paragraphs": [
            { "content": "referenced", "boundingRegions": [region(1)] },
            { "content": "orphan", "boundingRegions": [region(2)] }
        ],
        "sections": [
            { "elements": ["/paragraphs/0", "/paragraphs/9", "/tables/0", "/sections/1"] }
        ]
    }));

    let layout = assign_layout(&doc);
    // Page 2 holds only an unreferenced paragraph, so it is absent.
    assert_eq!(layout.pages.page_numbers().collect::<Vec<_>>(), vec![1]);
    assert_eq!(layout.pages.get(1), Some(&[ElementRef::paragraph(0)][..]));
}

#[test]
fn test_malformed_references_are_skipped() {
    let doc = doc(json!({
        "paragraphs": [
            { "content": "a", "boundingRegions": [region(1)] },
            { "content": "b", "boundingRegions": [region(1)] }
        ],
        "sections": [
            { "elements": ["paragraphs 0", 42, ["paragraphs", 0], "/paragraphs/one", "/paragraphs/1"] }
        ]
    }));

    let layout = assign_layout(&doc);
    assert_eq!(layout.pages.get(1), Some(&[ElementRef::paragraph(1)][..]));
}

#[test]
fn test_element_spanning_pages_is_listed_on_each() {
    let doc = doc(json!({
        "tables": [
            { "rowCount": 0, "columnCount": 0, "boundingRegions": [region(1), region(2)] }
        ],
        "sections": [{ "elements": ["/tables/0"] }]
    }));

    let layout = assign_layout(&doc);
    assert_eq!(layout.pages.get(1), Some(&[ElementRef::table(0)][..]));
    assert_eq!(layout.pages.get(2), Some(&[ElementRef::table(0)][..]));
}

#[test]
fn test_figure_associations() {
    let doc = doc(json!({
        "paragraphs": [
            { "content": "caption", "boundingRegions": [region(1)] },
            { "content": "label", "boundingRegions": [region(2)] }
        ],
        "figures": [
            {
                "boundingRegions": [
                    { "polygon": [1, 1, 2, 1, 2, 2, 1, 2] },
                    { "pageNumber": 2, "polygon": [3, 3, 4, 3, 4, 4, 3, 4] }
                ],
                "elements": ["/paragraphs/0", ["", "paragraphs", 1], "/paragraphs/7", "/tables/0"]
            },
            { "boundingRegions": [], "elements": [] }
        ],
        "sections": [{ "elements": ["/figures/0"] }]
    }));

    let layout = assign_layout(&doc);

    // A region without a page number places the figure on page 1.
    assert_eq!(layout.pages.get(1), Some(&[ElementRef::figure(0)][..]));
    assert_eq!(layout.pages.get(2), Some(&[ElementRef::figure(0)][..]));

    let assoc = &layout.figures[&ElementRef::figure(0)];
    // Recorded once per figure, not once per region; dangling indices dropped.
    assert_eq!(assoc.associated_paragraphs, vec![0, 1]);
    assert_eq!(assoc.polygons.len(), 2);
    assert_eq!(assoc.polygons[1].coords(), &[3.0, 3.0, 4.0, 3.0, 4.0, 4.0, 3.0, 4.0]);

    let empty = &layout.figures[&ElementRef::figure(1)];
    assert!(empty.associated_paragraphs.is_empty());
    assert!(empty.polygons.is_empty());
}

#[test]
fn test_layout_is_deterministic() {
    let value = json!({
        "paragraphs": [
            { "content": "a", "boundingRegions": [region(2)] },
            { "content": "b", "boundingRegions": [region(1)] }
        ],
        "figures": [{ "boundingRegions": [region(2)], "elements": ["/paragraphs/0"] }],
        "sections": [{ "elements": ["/figures/0", "/paragraphs/0", "/paragraphs/1"] }]
    });
    let doc = doc(value);
    assert_eq!(assign_layout(&doc), assign_layout(&doc));
}
