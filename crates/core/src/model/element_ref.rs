//! Element references.
//!
//! Sections and figures address structural elements either as a path
//! string (`"/paragraphs/3"`) or as a triple (`["", "paragraphs", 3]`).
//! Both encodings normalize into [`ElementRef`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LayoutError, Result};

/// Kind of a placeable structural element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Paragraph,
    Table,
    Figure,
}

impl ElementKind {
    /// Parses a kind name. Accepts the service's plural collection names
    /// as well as the singular forms.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "paragraphs" | "paragraph" => Some(ElementKind::Paragraph),
            "tables" | "table" => Some(ElementKind::Table),
            "figures" | "figure" => Some(ElementKind::Figure),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::Paragraph => "paragraph",
            ElementKind::Table => "table",
            ElementKind::Figure => "figure",
        }
    }

    const fn collection(self) -> &'static str {
        match self {
            ElementKind::Paragraph => "paragraphs",
            ElementKind::Table => "tables",
            ElementKind::Figure => "figures",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A (kind, index) pointer into one of the result's element sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub index: usize,
}

impl ElementRef {
    pub const fn new(kind: ElementKind, index: usize) -> Self {
        Self { kind, index }
    }

    pub const fn paragraph(index: usize) -> Self {
        Self::new(ElementKind::Paragraph, index)
    }

    pub const fn table(index: usize) -> Self {
        Self::new(ElementKind::Table, index)
    }

    pub const fn figure(index: usize) -> Self {
        Self::new(ElementKind::Figure, index)
    }

    /// Parses a three-segment slash path such as `/paragraphs/12`.
    ///
    /// The first segment is ignored, mirroring the triple form.
    pub fn from_path(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.split('/').collect();
        let [_, kind, index] = segments.as_slice() else {
            return Err(malformed(path));
        };
        let kind = ElementKind::from_str(kind).ok_or_else(|| malformed(path))?;
        let index = index.trim().parse::<usize>().map_err(|_| malformed(path))?;
        Ok(Self::new(kind, index))
    }

    /// Parses a `[_, kind, index]` triple. The index may be a JSON integer
    /// or a numeric string.
    pub fn from_triple(items: &[Value]) -> Result<Self> {
        let describe = || Value::Array(items.to_vec()).to_string();
        let [_, kind, index] = items else {
            return Err(malformed(&describe()));
        };
        let kind = kind
            .as_str()
            .and_then(ElementKind::from_str)
            .ok_or_else(|| malformed(&describe()))?;
        let index = match index {
            Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<usize>().ok(),
            _ => None,
        }
        .ok_or_else(|| malformed(&describe()))?;
        Ok(Self::new(kind, index))
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.kind.collection(), self.index)
    }
}

fn malformed(raw: &str) -> LayoutError {
    LayoutError::MalformedReference(raw.to_string())
}

/// An element reference as it appears in the service payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ElementRefEncoding {
    Path(String),
    Triple(Vec<Value>),
    Other(Value),
}

impl ElementRefEncoding {
    /// Normalizes either encoding; anything else is malformed.
    pub fn resolve(&self) -> Result<ElementRef> {
        match self {
            ElementRefEncoding::Path(path) => ElementRef::from_path(path),
            ElementRefEncoding::Triple(items) => ElementRef::from_triple(items),
            ElementRefEncoding::Other(value) => Err(malformed(&value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_and_triple_normalize_identically() {
        let from_path = ElementRef::from_path("/tables/4").unwrap();
        let from_triple = ElementRef::from_triple(&[json!(""), json!("tables"), json!(4)]).unwrap();
        assert_eq!(from_path, from_triple);
        assert_eq!(from_path, ElementRef::table(4));
    }

    #[test]
    fn triple_accepts_string_index() {
        let r = ElementRef::from_triple(&[json!(null), json!("figures"), json!("2")]).unwrap();
        assert_eq!(r, ElementRef::figure(2));
    }

    #[test]
    fn singular_kind_names_are_accepted() {
        assert_eq!(
            ElementRef::from_path("/paragraph/0").unwrap(),
            ElementRef::paragraph(0)
        );
    }

    #[test]
    fn malformed_paths_are_rejected() {
        for raw in [
            "paragraphs/1",
            "/paragraphs/1/extra",
            "/paragraphs/x",
            "/paragraphs/-1",
            "/sections/0",
            "",
        ] {
            assert!(
                matches!(
                    ElementRef::from_path(raw),
                    Err(LayoutError::MalformedReference(_))
                ),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn malformed_triples_are_rejected() {
        assert!(ElementRef::from_triple(&[json!("paragraphs"), json!(1)]).is_err());
        assert!(ElementRef::from_triple(&[json!(""), json!(3), json!(1)]).is_err());
        assert!(ElementRef::from_triple(&[json!(""), json!("tables"), json!(1.5)]).is_err());
    }

    #[test]
    fn encoding_deserializes_from_either_form() {
        let encodings: Vec<ElementRefEncoding> =
            serde_json::from_value(json!(["/figures/1", ["", "figures", 1], 7])).unwrap();
        assert_eq!(encodings[0].resolve().unwrap(), ElementRef::figure(1));
        assert_eq!(encodings[1].resolve().unwrap(), ElementRef::figure(1));
        assert!(encodings[2].resolve().is_err());
    }

    #[test]
    fn display_uses_path_form() {
        assert_eq!(ElementRef::paragraph(9).to_string(), "/paragraphs/9");
    }
}
