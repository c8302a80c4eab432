//! Page-level information extraction
//!
//! Read-only: reports page count and per-page dimensions so the editor can
//! size its canvas and check page bounds before placing fields.

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::{Deserialize, Serialize};

use crate::error::FormForgeError;
use crate::layout::PageSize;

/// Guards against cyclic or absurdly deep page trees
const MAX_TREE_DEPTH: usize = 32;

/// Information about a single PDF page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Page width in points (1 point = 1/72 inch)
    pub width: f64,
    /// Page height in points
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub page_count: u32,
    pub pages: Vec<PageInfo>,
}

/// Inspect raw PDF bytes
pub fn inspect(bytes: &[u8]) -> Result<DocumentInfo, FormForgeError> {
    let doc = Document::load_mem(bytes).map_err(|e| FormForgeError::ParseError(e.to_string()))?;
    Ok(inspect_document(&doc))
}

pub(crate) fn inspect_document(doc: &Document) -> DocumentInfo {
    let pages: Vec<PageInfo> = doc
        .get_pages()
        .into_iter()
        .map(|(page_number, page_id)| {
            let size = page_size(doc, page_id);
            PageInfo {
                page_number,
                width: size.width,
                height: size.height,
            }
        })
        .collect();

    DocumentInfo {
        page_count: pages.len() as u32,
        pages,
    }
}

/// Size of a page from its MediaBox, inheriting through the page tree
///
/// Falls back to US Letter when no MediaBox can be found.
pub(crate) fn page_size(doc: &Document, page_id: ObjectId) -> PageSize {
    match media_box(doc, page_id) {
        Some([x1, y1, x2, y2]) => PageSize::new((x2 - x1).abs(), (y2 - y1).abs()),
        None => PageSize::LETTER,
    }
}

fn media_box(doc: &Document, page_id: ObjectId) -> Option<[f64; 4]> {
    let mut current = doc.get_object(page_id).ok()?.as_dict().ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Some(array) = inheritable(doc, current, b"MediaBox").and_then(|o| o.as_array().ok())
        {
            if let Ok(parsed) = parse_box_array(array) {
                return Some(parsed);
            }
        }

        let parent_id = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_object(parent_id).ok()?.as_dict().ok()?;
    }

    None
}

/// Look up `key` in `dict`, following one level of indirection
pub(crate) fn inheritable<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    match dict.get(key).ok()? {
        Object::Reference(id) => doc.get_object(*id).ok(),
        direct => Some(direct),
    }
}

/// Parse a box array [x1, y1, x2, y2]
fn parse_box_array(array: &[Object]) -> Result<[f64; 4], String> {
    if array.len() != 4 {
        return Err("MediaBox must have 4 elements".to_string());
    }

    let mut result = [0.0; 4];
    for (i, obj) in array.iter().enumerate() {
        result[i] = match obj {
            Object::Integer(n) => *n as f64,
            Object::Real(n) => *n as f64,
            _ => return Err(format!("MediaBox element {} is not a number", i)),
        };
    }

    Ok(result)
}
