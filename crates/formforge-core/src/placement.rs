//! Field-placement engine
//!
//! Turns field placements into AcroForm widgets and static text on a
//! [`DocumentBackend`]. Build mode starts from blank pages, augment mode from
//! an uploaded document; both run through [`place_fields`] and differ only in
//! the [`PlacementMode`] styling record.
//!
//! Every field yields one [`FieldOutcome`]. A field that can't be placed is
//! recorded and logged, never fatal to the batch.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{DocumentBackend, FontPreset, LopdfBackend, Rgb, TextRun, WidgetStyle};
use crate::coords::PdfRect;
use crate::error::FormForgeError;
use crate::grouping::{build_page_count, group_by_page, resolve_page};
use crate::layout::{FieldKind, FieldPlacement, Layout};

const FIELD_BORDER: Rgb = Rgb::new(0.5, 0.5, 0.5);
const SIGNATURE_BORDER: Rgb = Rgb::new(0.0, 0.0, 0.8);

/// Gap between a field's top edge and its caption baseline
const CAPTION_GAP: f64 = 5.0;
/// Labels are drawn this far below the box's vertical center
const LABEL_BASELINE_DROP: f64 = 5.0;
const LABEL_PLACEHOLDER: &str = "Label";

/// Styling that differs between build and augment mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementMode {
    pub caption_size: f64,
    pub caption_font: FontPreset,
    /// Background of text and date fields
    pub field_fill: Option<Rgb>,
    pub signature_border_width: f64,
    pub signature_fill: Option<Rgb>,
}

impl PlacementMode {
    /// Blank-page forms
    pub const BUILD: PlacementMode = PlacementMode {
        caption_size: 10.0,
        caption_font: FontPreset::Regular,
        field_fill: None,
        signature_border_width: 1.0,
        signature_fill: None,
    };

    /// Fields added on top of existing content get tinted so they stand out
    pub const AUGMENT: PlacementMode = PlacementMode {
        caption_size: 9.0,
        caption_font: FontPreset::Bold,
        field_fill: Some(Rgb::new(1.0, 1.0, 0.9)),
        signature_border_width: 2.0,
        signature_fill: Some(Rgb::new(0.95, 0.95, 1.0)),
    };

    fn style_for(&self, kind: &FieldKind) -> WidgetStyle {
        match kind {
            FieldKind::Checkbox => WidgetStyle {
                border_width: 1.0,
                border_color: Rgb::BLACK,
                fill: None,
            },
            FieldKind::Signature => WidgetStyle {
                border_width: self.signature_border_width,
                border_color: SIGNATURE_BORDER,
                fill: self.signature_fill,
            },
            _ => WidgetStyle {
                border_width: 1.0,
                border_color: FIELD_BORDER,
                fill: self.field_fill,
            },
        }
    }
}

/// What to do when a field name is already taken in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateNamePolicy {
    /// Replace the earlier field with the later one
    #[default]
    LastWins,
    /// Keep the earlier field and skip the later one
    FirstWins,
}

impl FromStr for DuplicateNamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-wins" => Ok(DuplicateNamePolicy::LastWins),
            "first-wins" => Ok(DuplicateNamePolicy::FirstWins),
            other => Err(format!(
                "unknown duplicate name policy '{}', expected last-wins or first-wins",
                other
            )),
        }
    }
}

impl fmt::Display for DuplicateNamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateNamePolicy::LastWins => f.write_str("last-wins"),
            DuplicateNamePolicy::FirstWins => f.write_str("first-wins"),
        }
    }
}

/// Why a field was not placed
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum SkipReason {
    #[error("unknown field type '{kind}'")]
    UnknownKind { kind: String },

    #[error("page {page} is outside the document's {page_count} pages")]
    PageOutOfRange {
        page: i64,
        #[serde(rename = "pageCount")]
        page_count: u32,
    },

    #[error("a field named '{name}' was already placed")]
    DuplicateName { name: String },

    #[error("{message}")]
    Backend { message: String },
}

impl From<FormForgeError> for SkipReason {
    fn from(err: FormForgeError) -> Self {
        match err {
            FormForgeError::DuplicateName(name) => SkipReason::DuplicateName { name },
            other => SkipReason::Backend {
                message: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldStatus {
    Placed,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOutcome {
    pub id: String,
    /// Requested page, after defaulting
    pub page: i64,
    pub status: FieldStatus,
}

impl FieldOutcome {
    pub fn is_placed(&self) -> bool {
        self.status == FieldStatus::Placed
    }
}

/// One outcome per input field, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementReport {
    pub outcomes: Vec<FieldOutcome>,
}

impl PlacementReport {
    pub fn placed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_placed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.placed_count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FieldOutcome> {
        self.outcomes.iter().filter(|o| !o.is_placed())
    }

    /// Human-readable line per skipped field
    pub fn warnings(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match &outcome.status {
                FieldStatus::Skipped(reason) => Some(format!(
                    "field '{}' (page {}): {}",
                    outcome.id, outcome.page, reason
                )),
                FieldStatus::Placed => None,
            })
            .collect()
    }

    /// Ids placed on a page, in input order
    pub fn placed_on_page(&self, page: i64) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.page == page && o.is_placed())
            .map(|o| o.id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub duplicate_names: DuplicateNamePolicy,
    /// Upper bound on pages a layout may reference
    pub max_pages: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            duplicate_names: DuplicateNamePolicy::default(),
            max_pages: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AugmentOptions {
    pub duplicate_names: DuplicateNamePolicy,
}

/// Serialized document plus what happened to each field
#[derive(Debug, Clone)]
pub struct Rendered {
    pub bytes: Vec<u8>,
    pub report: PlacementReport,
}

/// Create a new document sized to the layout and place its fields
///
/// Pages run from 1 to the highest page any field references, so gaps become
/// blank pages.
pub fn build_from_layout(
    layout: &Layout,
    options: &BuildOptions,
) -> Result<Rendered, FormForgeError> {
    layout.page_size.validate()?;

    let groups = group_by_page(&layout.fields);
    let page_count = build_page_count(&groups);
    if page_count > options.max_pages {
        return Err(FormForgeError::InvalidLayout(format!(
            "layout references page {}, limit is {}",
            page_count, options.max_pages
        )));
    }
    for (page, group) in &groups {
        debug!(page, fields = group.len(), "Grouped fields");
    }

    let mut backend = LopdfBackend::create();
    for _ in 0..page_count {
        backend.add_page(layout.page_size)?;
    }

    let report = place_fields(
        &mut backend,
        &layout.fields,
        &PlacementMode::BUILD,
        options.duplicate_names,
    );
    let bytes = backend.save()?;

    info!(
        pages = page_count,
        placed = report.placed_count(),
        skipped = report.skipped_count(),
        "Built form from layout"
    );
    Ok(Rendered { bytes, report })
}

/// Load an existing document and add fields to its pages
pub fn augment_existing(
    bytes: &[u8],
    fields: &[FieldPlacement],
    options: &AugmentOptions,
) -> Result<Rendered, FormForgeError> {
    let mut backend = LopdfBackend::load(bytes)?;
    let page_count = backend.page_count();

    let report = place_fields(
        &mut backend,
        fields,
        &PlacementMode::AUGMENT,
        options.duplicate_names,
    );
    let bytes = backend.save()?;

    info!(
        pages = page_count,
        placed = report.placed_count(),
        skipped = report.skipped_count(),
        "Added fields to existing document"
    );
    Ok(Rendered { bytes, report })
}

/// Place every field on `backend` in input order
pub fn place_fields<B: DocumentBackend>(
    backend: &mut B,
    fields: &[FieldPlacement],
    mode: &PlacementMode,
    policy: DuplicateNamePolicy,
) -> PlacementReport {
    let mut outcomes = Vec::with_capacity(fields.len());

    for field in fields {
        let page = field.page_number();
        let status = match place_field(backend, field, mode, policy) {
            Ok(()) => {
                debug!(id = %field.id, kind = %field.kind, page, "Placed field");
                FieldStatus::Placed
            }
            Err(reason) => {
                warn!(id = %field.id, kind = %field.kind, page, %reason, "Skipped field");
                FieldStatus::Skipped(reason)
            }
        };
        outcomes.push(FieldOutcome {
            id: field.id.clone(),
            page,
            status,
        });
    }

    PlacementReport { outcomes }
}

fn place_field<B: DocumentBackend>(
    backend: &mut B,
    field: &FieldPlacement,
    mode: &PlacementMode,
    policy: DuplicateNamePolicy,
) -> Result<(), SkipReason> {
    if let FieldKind::Unknown(kind) = &field.kind {
        return Err(SkipReason::UnknownKind { kind: kind.clone() });
    }

    let page_count = backend.page_count();
    let page = resolve_page(field.page_number(), page_count).ok_or(SkipReason::PageOutOfRange {
        page: field.page_number(),
        page_count,
    })?;
    let page_height = backend.page_size(page)?.height;
    let rect = PdfRect::from_screen(field.x, field.y, field.width, field.height, page_height);
    let style = mode.style_for(&field.kind);
    let name = field.id.as_str();

    match &field.kind {
        FieldKind::Label => return draw_label(backend, page, field, &rect),
        FieldKind::Text => with_duplicate_policy(backend, name, policy, |b| {
            b.add_text_field(page, name, rect, true, &style)
        })?,
        FieldKind::Date | FieldKind::Signature => {
            with_duplicate_policy(backend, name, policy, |b| {
                b.add_text_field(page, name, rect, false, &style)
            })?
        }
        FieldKind::Checkbox => with_duplicate_policy(backend, name, policy, |b| {
            b.add_checkbox(page, name, rect.squared(), &style)
        })?,
        FieldKind::Unknown(kind) => {
            return Err(SkipReason::UnknownKind { kind: kind.clone() })
        }
    }

    if let Some(caption) = field.caption() {
        backend.draw_text(
            page,
            &TextRun {
                text: caption.to_string(),
                x: rect.x,
                y: rect.y + rect.height + CAPTION_GAP,
                size: mode.caption_size,
                font: mode.caption_font,
                color: Rgb::BLACK,
            },
        )?;
    }
    Ok(())
}

fn draw_label<B: DocumentBackend>(
    backend: &mut B,
    page: u32,
    field: &FieldPlacement,
    rect: &PdfRect,
) -> Result<(), SkipReason> {
    let font = if field.is_bold() {
        FontPreset::Bold
    } else {
        FontPreset::Regular
    };
    backend.draw_text(
        page,
        &TextRun {
            text: field.caption().unwrap_or(LABEL_PLACEHOLDER).to_string(),
            x: rect.x,
            y: rect.y + rect.height / 2.0 - LABEL_BASELINE_DROP,
            size: f64::from(field.font_size_or_default()),
            font,
            color: Rgb::BLACK,
        },
    )?;
    Ok(())
}

/// Run `add`, resolving a name clash according to `policy`
fn with_duplicate_policy<B, F>(
    backend: &mut B,
    name: &str,
    policy: DuplicateNamePolicy,
    mut add: F,
) -> Result<(), FormForgeError>
where
    B: DocumentBackend,
    F: FnMut(&mut B) -> Result<(), FormForgeError>,
{
    match add(&mut *backend) {
        Err(FormForgeError::DuplicateName(_)) if policy == DuplicateNamePolicy::LastWins => {
            debug!(name, "Replacing earlier field with the same name");
            backend.remove_field(name)?;
            add(backend)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageSize;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        TextField {
            page: u32,
            name: String,
            rect: PdfRect,
            multiline: bool,
            style: WidgetStyle,
        },
        Checkbox {
            page: u32,
            name: String,
            rect: PdfRect,
            style: WidgetStyle,
        },
        Remove(String),
        Text {
            page: u32,
            run: TextRun,
        },
    }

    /// Records calls and enforces unique names like a real document
    #[derive(Default)]
    struct RecordingBackend {
        pages: Vec<PageSize>,
        names: HashSet<String>,
        calls: Vec<Call>,
    }

    impl RecordingBackend {
        fn with_pages(pages: &[PageSize]) -> Self {
            Self {
                pages: pages.to_vec(),
                ..Default::default()
            }
        }

        fn letter(count: usize) -> Self {
            Self::with_pages(&vec![PageSize::LETTER; count])
        }

        fn claim(&mut self, page: u32, name: &str, rect: &PdfRect) -> Result<(), FormForgeError> {
            self.page_size(page)?;
            if !rect.is_drawable() {
                return Err(FormForgeError::InvalidGeometry(name.to_string()));
            }
            if !self.names.insert(name.to_string()) {
                return Err(FormForgeError::DuplicateName(name.to_string()));
            }
            Ok(())
        }

        fn fields(&self) -> Vec<&Call> {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::TextField { .. } | Call::Checkbox { .. }))
                .collect()
        }

        fn texts(&self) -> Vec<(u32, &TextRun)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text { page, run } => Some((*page, run)),
                    _ => None,
                })
                .collect()
        }
    }

    impl DocumentBackend for RecordingBackend {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn page_size(&self, page: u32) -> Result<PageSize, FormForgeError> {
            page.checked_sub(1)
                .and_then(|i| self.pages.get(i as usize))
                .copied()
                .ok_or(FormForgeError::PageNotFound {
                    page,
                    page_count: self.page_count(),
                })
        }

        fn add_text_field(
            &mut self,
            page: u32,
            name: &str,
            rect: PdfRect,
            multiline: bool,
            style: &WidgetStyle,
        ) -> Result<(), FormForgeError> {
            self.claim(page, name, &rect)?;
            self.calls.push(Call::TextField {
                page,
                name: name.to_string(),
                rect,
                multiline,
                style: *style,
            });
            Ok(())
        }

        fn add_checkbox(
            &mut self,
            page: u32,
            name: &str,
            rect: PdfRect,
            style: &WidgetStyle,
        ) -> Result<(), FormForgeError> {
            self.claim(page, name, &rect)?;
            self.calls.push(Call::Checkbox {
                page,
                name: name.to_string(),
                rect,
                style: *style,
            });
            Ok(())
        }

        fn remove_field(&mut self, name: &str) -> Result<(), FormForgeError> {
            if !self.names.remove(name) {
                return Err(FormForgeError::FieldNotFound(name.to_string()));
            }
            self.calls.push(Call::Remove(name.to_string()));
            Ok(())
        }

        fn draw_text(&mut self, page: u32, run: &TextRun) -> Result<(), FormForgeError> {
            self.page_size(page)?;
            self.calls.push(Call::Text {
                page,
                run: run.clone(),
            });
            Ok(())
        }

        fn save(&mut self) -> Result<Vec<u8>, FormForgeError> {
            Ok(Vec::new())
        }
    }

    fn place(
        backend: &mut RecordingBackend,
        fields: &[FieldPlacement],
        mode: &PlacementMode,
    ) -> PlacementReport {
        place_fields(backend, fields, mode, DuplicateNamePolicy::LastWins)
    }

    #[test]
    fn test_label_is_drawn_not_a_field() {
        let mut backend = RecordingBackend::letter(1);
        let label = FieldPlacement::new("title", FieldKind::Label, 50.0, 40.0, 200.0, 30.0)
            .with_label("Applicant")
            .with_font(14, true);

        let report = place(&mut backend, &[label], &PlacementMode::BUILD);

        assert_eq!(report.placed_count(), 1);
        assert!(backend.fields().is_empty());
        let texts = backend.texts();
        assert_eq!(texts.len(), 1);
        let (page, run) = texts[0];
        assert_eq!(page, 1);
        // 792 - 40 - 30 + 15 - 5
        assert_eq!((run.x, run.y), (50.0, 732.0));
        assert_eq!(run.size, 14.0);
        assert_eq!(run.font, FontPreset::Bold);
        assert_eq!(run.text, "Applicant");
    }

    #[test]
    fn test_label_without_text_uses_placeholder() {
        let mut backend = RecordingBackend::letter(1);
        let label =
            FieldPlacement::new("l", FieldKind::Label, 0.0, 0.0, 100.0, 20.0).with_label("");

        place(&mut backend, &[label], &PlacementMode::AUGMENT);

        let (_, run) = backend.texts()[0];
        assert_eq!(run.text, "Label");
        assert_eq!(run.size, 12.0);
        assert_eq!(run.font, FontPreset::Regular);
    }

    #[test]
    fn test_checkbox_is_squared_to_smaller_side() {
        let mut backend = RecordingBackend::letter(1);
        let checkbox = FieldPlacement::new("cb", FieldKind::Checkbox, 10.0, 10.0, 40.0, 20.0);

        place(&mut backend, &[checkbox], &PlacementMode::BUILD);

        match backend.fields()[0] {
            Call::Checkbox { rect, style, .. } => {
                assert_eq!((rect.width, rect.height), (20.0, 20.0));
                assert_eq!(rect.y, 792.0 - 10.0 - 20.0);
                assert_eq!(style.border_color, Rgb::BLACK);
                assert_eq!(style.fill, None);
            }
            other => panic!("expected checkbox, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_page_goes_to_page_one() {
        let mut backend = RecordingBackend::letter(2);
        let field = FieldPlacement::new("a", FieldKind::Text, 0.0, 0.0, 100.0, 20.0);

        let report = place(&mut backend, &[field], &PlacementMode::BUILD);

        assert_eq!(report.outcomes[0].page, 1);
        assert!(matches!(backend.fields()[0], Call::TextField { page: 1, .. }));
    }

    #[test]
    fn test_out_of_range_page_is_skipped_and_rest_placed() {
        let mut backend = RecordingBackend::letter(3);
        let fields = vec![
            FieldPlacement::new("first", FieldKind::Text, 0.0, 0.0, 100.0, 20.0),
            FieldPlacement::new("far", FieldKind::Text, 0.0, 0.0, 100.0, 20.0).on_page(5),
            FieldPlacement::new("last", FieldKind::Date, 0.0, 0.0, 100.0, 20.0).on_page(3),
        ];

        let report = place(&mut backend, &fields, &PlacementMode::AUGMENT);

        assert_eq!(report.placed_count(), 2);
        assert_eq!(
            report.outcomes[1].status,
            FieldStatus::Skipped(SkipReason::PageOutOfRange {
                page: 5,
                page_count: 3
            })
        );
        assert_eq!(report.warnings().len(), 1);
        assert!(report.warnings()[0].contains("far"));
    }

    #[test]
    fn test_page_zero_is_out_of_range() {
        let mut backend = RecordingBackend::letter(1);
        let field = FieldPlacement::new("z", FieldKind::Text, 0.0, 0.0, 100.0, 20.0).on_page(0);

        let report = place(&mut backend, &[field], &PlacementMode::BUILD);

        assert_eq!(report.skipped_count(), 1);
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let mut backend = RecordingBackend::letter(1);
        let fields = vec![
            FieldPlacement::new("r", "radio", 0.0, 0.0, 10.0, 10.0).with_label("Pick"),
            FieldPlacement::new("t", FieldKind::Text, 0.0, 0.0, 10.0, 10.0),
        ];

        let report = place(&mut backend, &fields, &PlacementMode::BUILD);

        assert_eq!(
            report.outcomes[0].status,
            FieldStatus::Skipped(SkipReason::UnknownKind {
                kind: "radio".to_string()
            })
        );
        assert!(report.outcomes[1].is_placed());
        // No caption for the skipped field either
        assert!(backend.texts().is_empty());
    }

    #[test]
    fn test_text_is_multiline_and_date_is_not() {
        let mut backend = RecordingBackend::letter(1);
        let fields = vec![
            FieldPlacement::new("t", FieldKind::Text, 0.0, 0.0, 10.0, 10.0),
            FieldPlacement::new("d", FieldKind::Date, 0.0, 0.0, 10.0, 10.0),
            FieldPlacement::new("s", FieldKind::Signature, 0.0, 0.0, 10.0, 10.0),
        ];

        place(&mut backend, &fields, &PlacementMode::BUILD);

        let multiline: Vec<bool> = backend
            .fields()
            .iter()
            .map(|c| match c {
                Call::TextField { multiline, .. } => *multiline,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(multiline, vec![true, false, false]);
    }

    #[test]
    fn test_mode_styles() {
        let fields = vec![
            FieldPlacement::new("t", FieldKind::Text, 0.0, 0.0, 10.0, 10.0),
            FieldPlacement::new("s", FieldKind::Signature, 0.0, 0.0, 10.0, 10.0),
        ];
        let styles = |mode: &PlacementMode| {
            let mut backend = RecordingBackend::letter(1);
            place(&mut backend, &fields, mode);
            backend
                .fields()
                .iter()
                .map(|c| match c {
                    Call::TextField { style, .. } => *style,
                    other => panic!("unexpected {:?}", other),
                })
                .collect::<Vec<_>>()
        };

        let build = styles(&PlacementMode::BUILD);
        assert_eq!(build[0].fill, None);
        assert_eq!(build[0].border_color, Rgb::new(0.5, 0.5, 0.5));
        assert_eq!(build[1].border_width, 1.0);
        assert_eq!(build[1].border_color, Rgb::new(0.0, 0.0, 0.8));
        assert_eq!(build[1].fill, None);

        let augment = styles(&PlacementMode::AUGMENT);
        assert_eq!(augment[0].fill, Some(Rgb::new(1.0, 1.0, 0.9)));
        assert_eq!(augment[1].border_width, 2.0);
        assert_eq!(augment[1].fill, Some(Rgb::new(0.95, 0.95, 1.0)));
    }

    #[test]
    fn test_caption_sits_above_field() {
        let field = FieldPlacement::new("name", FieldKind::Text, 50.0, 100.0, 200.0, 30.0)
            .with_label("Full name");

        let mut backend = RecordingBackend::letter(1);
        place(&mut backend, &[field.clone()], &PlacementMode::BUILD);
        let (_, run) = backend.texts()[0];
        // Field bottom at 792 - 100 - 30 = 662, top at 692
        assert_eq!((run.x, run.y), (50.0, 697.0));
        assert_eq!(run.size, 10.0);
        assert_eq!(run.font, FontPreset::Regular);

        let mut backend = RecordingBackend::letter(1);
        place(&mut backend, &[field], &PlacementMode::AUGMENT);
        let (_, run) = backend.texts()[0];
        assert_eq!(run.size, 9.0);
        assert_eq!(run.font, FontPreset::Bold);
    }

    #[test]
    fn test_no_caption_for_empty_label() {
        let mut backend = RecordingBackend::letter(1);
        let fields = vec![
            FieldPlacement::new("a", FieldKind::Text, 0.0, 0.0, 10.0, 10.0),
            FieldPlacement::new("b", FieldKind::Checkbox, 0.0, 0.0, 10.0, 10.0).with_label(""),
        ];
        place(&mut backend, &fields, &PlacementMode::BUILD);
        assert!(backend.texts().is_empty());
    }

    #[test]
    fn test_uses_each_pages_own_height() {
        let mut backend =
            RecordingBackend::with_pages(&[PageSize::LETTER, PageSize::new(595.0, 842.0)]);
        let field = FieldPlacement::new("a4", FieldKind::Text, 0.0, 100.0, 50.0, 20.0).on_page(2);

        place(&mut backend, &[field], &PlacementMode::AUGMENT);

        match backend.fields()[0] {
            Call::TextField { rect, page, .. } => {
                assert_eq!(*page, 2);
                assert_eq!(rect.y, 722.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_last_wins_replaces_earlier_field() {
        let mut backend = RecordingBackend::letter(1);
        let fields = vec![
            FieldPlacement::new("dup", FieldKind::Text, 0.0, 0.0, 10.0, 10.0),
            FieldPlacement::new("dup", FieldKind::Checkbox, 0.0, 50.0, 10.0, 10.0),
        ];

        let report = place_fields(
            &mut backend,
            &fields,
            &PlacementMode::BUILD,
            DuplicateNamePolicy::LastWins,
        );

        assert_eq!(report.placed_count(), 2);
        assert_eq!(backend.calls[1], Call::Remove("dup".to_string()));
        assert!(matches!(backend.calls[2], Call::Checkbox { .. }));
    }

    #[test]
    fn test_duplicate_first_wins_skips_later_field() {
        let mut backend = RecordingBackend::letter(1);
        let fields = vec![
            FieldPlacement::new("dup", FieldKind::Text, 0.0, 0.0, 10.0, 10.0),
            FieldPlacement::new("dup", FieldKind::Date, 0.0, 50.0, 10.0, 10.0),
        ];

        let report = place_fields(
            &mut backend,
            &fields,
            &PlacementMode::BUILD,
            DuplicateNamePolicy::FirstWins,
        );

        assert_eq!(report.placed_count(), 1);
        assert_eq!(
            report.outcomes[1].status,
            FieldStatus::Skipped(SkipReason::DuplicateName {
                name: "dup".to_string()
            })
        );
        assert_eq!(backend.fields().len(), 1);
    }

    #[test]
    fn test_backend_failure_is_recorded_per_field() {
        let mut backend = RecordingBackend::letter(1);
        let fields = vec![
            FieldPlacement::new("flat", FieldKind::Text, 0.0, 0.0, 10.0, 0.0),
            FieldPlacement::new("ok", FieldKind::Text, 0.0, 0.0, 10.0, 10.0),
        ];

        let report = place(&mut backend, &fields, &PlacementMode::BUILD);

        assert!(matches!(
            report.outcomes[0].status,
            FieldStatus::Skipped(SkipReason::Backend { .. })
        ));
        assert!(report.outcomes[1].is_placed());
    }

    #[test]
    fn test_report_keeps_input_order() {
        let mut backend = RecordingBackend::letter(2);
        let fields = vec![
            FieldPlacement::new("c", FieldKind::Text, 0.0, 0.0, 10.0, 10.0).on_page(2),
            FieldPlacement::new("a", FieldKind::Text, 0.0, 0.0, 10.0, 10.0),
            FieldPlacement::new("b", FieldKind::Text, 0.0, 0.0, 10.0, 10.0).on_page(2),
        ];

        let report = place(&mut backend, &fields, &PlacementMode::BUILD);

        let ids: Vec<&str> = report.outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(report.placed_on_page(2), vec!["c", "b"]);
    }

    #[test]
    fn test_duplicate_policy_parses() {
        assert_eq!(
            "last-wins".parse::<DuplicateNamePolicy>(),
            Ok(DuplicateNamePolicy::LastWins)
        );
        assert_eq!(
            "first-wins".parse::<DuplicateNamePolicy>(),
            Ok(DuplicateNamePolicy::FirstWins)
        );
        assert!("newest".parse::<DuplicateNamePolicy>().is_err());
        assert_eq!(DuplicateNamePolicy::FirstWins.to_string(), "first-wins");
    }

    #[test]
    fn test_skip_reason_serializes_with_tag() {
        let value = serde_json::to_value(SkipReason::PageOutOfRange {
            page: 5,
            page_count: 3,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"reason": "pageOutOfRange", "page": 5, "pageCount": 3})
        );
    }

    #[test]
    fn test_build_rejects_runaway_page_numbers() {
        let layout = Layout::new(
            PageSize::LETTER,
            vec![FieldPlacement::new("x", FieldKind::Text, 0.0, 0.0, 10.0, 10.0).on_page(5000)],
        );
        let err = build_from_layout(&layout, &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, FormForgeError::InvalidLayout(_)));
    }

    #[test]
    fn test_build_rejects_invalid_page_size() {
        let layout = Layout::new(PageSize::new(0.0, 0.0), vec![]);
        assert!(build_from_layout(&layout, &BuildOptions::default()).is_err());
    }

    #[test]
    fn test_augment_rejects_unparseable_bytes() {
        let err = augment_existing(b"nope", &[], &AugmentOptions::default()).unwrap_err();
        assert!(matches!(err, FormForgeError::ParseError(_)));
    }
}
