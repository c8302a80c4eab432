//! FormForge core: place fillable form fields on PDF pages
//!
//! The editor describes fields in screen space; this crate converts them to
//! page space and writes AcroForm widgets either into a fresh document
//! ([`build_from_layout`]) or onto an existing one ([`augment_existing`]).

pub mod backend;
pub mod coords;
pub mod error;
pub mod grouping;
pub mod inspect;
pub mod layout;
pub mod persistence;
pub mod placement;

pub use backend::{DocumentBackend, FontPreset, LopdfBackend, Rgb, TextRun, WidgetStyle};
pub use coords::{is_pdf_real, to_page_space_y, to_screen_space_y, PdfRect};
pub use error::FormForgeError;
pub use inspect::{inspect, DocumentInfo, PageInfo};
pub use layout::{validate_fields, FieldKind, FieldPlacement, Layout, PageSize};
pub use persistence::SavedLayout;
pub use placement::{
    augment_existing, build_from_layout, place_fields, AugmentOptions, BuildOptions,
    DuplicateNamePolicy, FieldOutcome, FieldStatus, PlacementMode, PlacementReport, Rendered,
    SkipReason,
};
