//! Coordinate transformation between screen space and PDF page space
//!
//! The editor works in screen space (origin top-left, Y grows downward).
//! PDF pages use page space (origin bottom-left, Y grows upward). Both use
//! points as the unit, so only the vertical axis needs converting.

use serde::{Deserialize, Serialize};

/// Convert the top edge of a box in screen space to the bottom edge of the
/// same box in page space.
pub fn to_page_space_y(screen_y: f64, box_height: f64, page_height: f64) -> f64 {
    page_height - screen_y - box_height
}

/// Convert the bottom edge of a box in page space back to screen space.
///
/// The flip is its own inverse for a fixed page height.
pub fn to_screen_space_y(page_y: f64, box_height: f64, page_height: f64) -> f64 {
    page_height - page_y - box_height
}

/// Whether a value survives lopdf's single-precision reals without turning
/// into `inf` or NaN
pub fn is_pdf_real(value: f64) -> bool {
    value.is_finite() && value.abs() <= f64::from(f32::MAX)
}

/// Axis-aligned rectangle in page space, anchored at its bottom-left corner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PdfRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PdfRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a page-space rect from a screen-space box on a page of the given height
    pub fn from_screen(x: f64, y: f64, width: f64, height: f64, page_height: f64) -> Self {
        Self::new(x, to_page_space_y(y, height, page_height), width, height)
    }

    /// Largest square sharing this rect's bottom-left corner
    pub fn squared(&self) -> Self {
        let side = self.width.min(self.height);
        Self::new(self.x, self.y, side, side)
    }

    /// The rect as a PDF `[x1 y1 x2 y2]` array
    pub fn corners(&self) -> [f64; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Positive size, and every edge representable as a PDF real
    pub fn is_drawable(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .chain(self.corners().iter())
            .all(|&v| is_pdf_real(v))
            && self.width > 0.0
            && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_of_letter_page() {
        // A 30pt box touching the top edge sits 30pt below the page top
        assert_eq!(to_page_space_y(0.0, 30.0, 792.0), 762.0);
    }

    #[test]
    fn test_bottom_of_letter_page() {
        assert_eq!(to_page_space_y(762.0, 30.0, 792.0), 0.0);
    }

    #[test]
    fn test_uses_the_given_page_height() {
        // A4 height must not fall back to Letter
        assert_eq!(to_page_space_y(100.0, 20.0, 842.0), 722.0);
        assert_ne!(
            to_page_space_y(100.0, 20.0, 842.0),
            to_page_space_y(100.0, 20.0, 792.0)
        );
    }

    #[test]
    fn test_vertical_order_is_inverted() {
        // Lower on screen means lower page-space Y
        let upper = to_page_space_y(100.0, 30.0, 792.0);
        let lower = to_page_space_y(400.0, 30.0, 792.0);
        assert!(lower < upper);
    }

    #[test]
    fn test_from_screen() {
        let rect = PdfRect::from_screen(50.0, 40.0, 200.0, 30.0, 792.0);
        assert_eq!(rect, PdfRect::new(50.0, 722.0, 200.0, 30.0));
        assert_eq!(rect.corners(), [50.0, 722.0, 250.0, 752.0]);
    }

    #[test]
    fn test_squared_uses_smaller_side() {
        let rect = PdfRect::new(10.0, 10.0, 40.0, 20.0).squared();
        assert_eq!(rect.width, 20.0);
        assert_eq!(rect.height, 20.0);

        let rect = PdfRect::new(10.0, 10.0, 15.0, 60.0).squared();
        assert_eq!(rect.width, 15.0);
        assert_eq!(rect.height, 15.0);
    }

    #[test]
    fn test_is_drawable() {
        assert!(PdfRect::new(0.0, 0.0, 1.0, 1.0).is_drawable());
        assert!(!PdfRect::new(0.0, 0.0, 0.0, 1.0).is_drawable());
        assert!(!PdfRect::new(0.0, 0.0, 5.0, -1.0).is_drawable());
        assert!(!PdfRect::new(f64::NAN, 0.0, 5.0, 5.0).is_drawable());
    }

    #[test]
    fn test_single_precision_overflow_is_not_drawable() {
        assert!(!PdfRect::new(1e39, 0.0, 5.0, 5.0).is_drawable());
        assert!(!PdfRect::new(0.0, -1e39, 5.0, 5.0).is_drawable());
        // Each value fits but the far edge does not
        assert!(!PdfRect::new(3e38, 0.0, 3e38, 5.0).is_drawable());
        assert!(PdfRect::new(1e30, 0.0, 5.0, 5.0).is_drawable());
    }

    #[test]
    fn test_is_pdf_real() {
        assert!(is_pdf_real(0.0));
        assert!(is_pdf_real(-612.5));
        assert!(is_pdf_real(f64::from(f32::MAX)));
        assert!(!is_pdf_real(1e39));
        assert!(!is_pdf_real(f64::NEG_INFINITY));
        assert!(!is_pdf_real(f64::NAN));
    }
}
