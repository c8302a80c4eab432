//! Document backend used by the placement engine
//!
//! The engine only talks to a [`DocumentBackend`]; [`LopdfBackend`] is the
//! production implementation. All geometry is in page space.

mod lopdf_backend;

pub use lopdf_backend::LopdfBackend;

use crate::coords::PdfRect;
use crate::error::FormForgeError;
use crate::layout::PageSize;

/// RGB color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Border and fill of a widget annotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetStyle {
    pub border_width: f64,
    pub border_color: Rgb,
    pub fill: Option<Rgb>,
}

/// The two standard fonts every document gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontPreset {
    Regular,
    Bold,
}

impl FontPreset {
    /// Standard 14 font name
    pub fn base_font(&self) -> &'static str {
        match self {
            FontPreset::Regular => "Helvetica",
            FontPreset::Bold => "Helvetica-Bold",
        }
    }

    /// Resource name used in content streams and the AcroForm `DR`
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontPreset::Regular => "FFHelv",
            FontPreset::Bold => "FFHelvB",
        }
    }
}

/// Static text drawn straight onto a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub font: FontPreset,
    pub color: Rgb,
}

/// Operations the placement engine needs from a document
pub trait DocumentBackend {
    /// Number of pages currently in the document
    fn page_count(&self) -> u32;

    /// Size of a 1-based page
    fn page_size(&self, page: u32) -> Result<PageSize, FormForgeError>;

    /// Add a text field widget. Fails with `DuplicateName` when `name` is taken.
    fn add_text_field(
        &mut self,
        page: u32,
        name: &str,
        rect: PdfRect,
        multiline: bool,
        style: &WidgetStyle,
    ) -> Result<(), FormForgeError>;

    /// Add a check box widget. Fails with `DuplicateName` when `name` is taken.
    fn add_checkbox(
        &mut self,
        page: u32,
        name: &str,
        rect: PdfRect,
        style: &WidgetStyle,
    ) -> Result<(), FormForgeError>;

    /// Remove a form field and its widgets
    fn remove_field(&mut self, name: &str) -> Result<(), FormForgeError>;

    fn draw_text(&mut self, page: u32, run: &TextRun) -> Result<(), FormForgeError>;

    /// Serialize the document
    fn save(&mut self) -> Result<Vec<u8>, FormForgeError>;
}
