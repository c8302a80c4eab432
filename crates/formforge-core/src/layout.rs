//! Layout model produced by the form editor
//!
//! A [`Layout`] is a page size plus an ordered list of [`FieldPlacement`]s.
//! Coordinates are in screen space (see [`crate::coords`]). Wire names are
//! camelCase to match the editor's JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coords::is_pdf_real;
use crate::error::FormForgeError;

/// Default caption/label font size in points
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// Page dimensions in points
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// US Letter, 8.5 x 11 inches
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        is_pdf_real(self.width)
            && is_pdf_real(self.height)
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn validate(&self) -> Result<(), FormForgeError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(FormForgeError::InvalidLayout(format!(
                "page size must be positive, got {}x{}",
                self.width, self.height
            )))
        }
    }
}

/// Kind of element placed on the page
///
/// Unrecognized kinds are kept verbatim so a saved layout round-trips; the
/// placement engine skips them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Date,
    Checkbox,
    Signature,
    Label,
    Unknown(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Signature => "signature",
            FieldKind::Label => "label",
            FieldKind::Unknown(other) => other,
        }
    }

    /// Whether this kind becomes an AcroForm field
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Date | FieldKind::Checkbox | FieldKind::Signature
        )
    }

    /// Caption the editor palette gives a freshly dropped field
    fn palette_caption(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{} Field", first.to_uppercase(), chars.as_str()),
            None => "Field".to_string(),
        }
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => FieldKind::Text,
            "date" => FieldKind::Date,
            "checkbox" => FieldKind::Checkbox,
            "signature" => FieldKind::Signature,
            "label" => FieldKind::Label,
            _ => FieldKind::Unknown(value),
        }
    }
}

impl From<&str> for FieldKind {
    fn from(value: &str) -> Self {
        FieldKind::from(value.to_string())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One positioned element of a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPlacement {
    /// Exported field name for interactive kinds
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    // Screen space, points
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// 1-based page index, page 1 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    // Label kind only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
}

impl FieldPlacement {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<FieldKind>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            x,
            y,
            width,
            height,
            page: None,
            label: None,
            font_size: None,
            bold: None,
        }
    }

    /// A field as the editor palette creates it when dropped at `(drop_x, drop_y)`
    pub fn from_palette(
        kind: FieldKind,
        id: impl Into<String>,
        drop_x: f64,
        drop_y: f64,
        page: i64,
    ) -> Self {
        let (width, height) = match kind {
            FieldKind::Checkbox => (20.0, 20.0),
            _ => (200.0, 30.0),
        };
        let label = kind.palette_caption();
        Self {
            id: id.into(),
            kind,
            x: (drop_x - 50.0).max(0.0),
            y: (drop_y - 15.0).max(0.0),
            width,
            height,
            page: Some(page),
            label: Some(label),
            font_size: Some(DEFAULT_FONT_SIZE),
            bold: Some(false),
        }
    }

    pub fn on_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_font(mut self, font_size: u32, bold: bool) -> Self {
        self.font_size = Some(font_size);
        self.bold = Some(bold);
        self
    }

    /// Target page, defaulting to 1
    pub fn page_number(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    /// Caption text, if one should be drawn
    pub fn caption(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    pub fn font_size_or_default(&self) -> u32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(false)
    }
}

/// Page size plus the ordered fields placed on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub page_size: PageSize,
    pub fields: Vec<FieldPlacement>,
}

impl Layout {
    pub fn new(page_size: PageSize, fields: Vec<FieldPlacement>) -> Self {
        Self { page_size, fields }
    }

    /// Structural checks done before the engine runs
    pub fn validate(&self) -> Result<(), FormForgeError> {
        self.page_size.validate()?;
        validate_fields(&self.fields)
    }
}

/// Reject fields whose geometry can't be placed
///
/// Unknown kinds are exempt since the engine skips them anyway.
pub fn validate_fields(fields: &[FieldPlacement]) -> Result<(), FormForgeError> {
    for field in fields {
        if matches!(field.kind, FieldKind::Unknown(_)) {
            continue;
        }
        let representable = [
            field.x,
            field.y,
            field.width,
            field.height,
            field.x + field.width,
            field.y + field.height,
        ]
        .iter()
        .all(|&v| is_pdf_real(v));
        if !representable || field.width <= 0.0 || field.height <= 0.0 {
            return Err(FormForgeError::InvalidLayout(format!(
                "field '{}' has invalid geometry {}x{} at ({}, {})",
                field.id, field.width, field.height, field.x, field.y
            )));
        }
    }
    Ok(())
}
