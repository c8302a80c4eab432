//! File-based commands behind the CLI

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use formforge_core::{
    augment_existing, build_from_layout, inspect, AugmentOptions, BuildOptions, DocumentInfo,
    DuplicateNamePolicy, FieldPlacement, Layout, PageSize, PlacementReport,
};
use serde::Deserialize;

/// Accepted shapes for layout and field files
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldFile {
    Fields(Vec<FieldPlacement>),
    Document {
        fields: Vec<FieldPlacement>,
        #[serde(default, rename = "pageSize")]
        page_size: Option<PageSize>,
    },
}

impl FieldFile {
    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid field JSON in {}", path.display()))
    }

    fn into_layout(self, fallback: PageSize) -> Layout {
        match self {
            FieldFile::Fields(fields) => Layout::new(fallback, fields),
            FieldFile::Document { fields, page_size } => {
                Layout::new(page_size.unwrap_or(fallback), fields)
            }
        }
    }
}

pub fn inspect_file(pdf: &Path) -> Result<DocumentInfo> {
    let bytes = fs::read(pdf).with_context(|| format!("Failed to read {}", pdf.display()))?;
    Ok(inspect(&bytes)?)
}

pub fn build_file(
    layout: &Path,
    output: &Path,
    fallback: PageSize,
    duplicate_names: DuplicateNamePolicy,
) -> Result<PlacementReport> {
    let layout = FieldFile::read(layout)?.into_layout(fallback);
    layout.validate()?;

    let options = BuildOptions {
        duplicate_names,
        ..BuildOptions::default()
    };
    let rendered = build_from_layout(&layout, &options)?;
    write_output(output, &rendered.bytes)?;
    Ok(rendered.report)
}

pub fn augment_file(
    pdf: &Path,
    fields: &Path,
    output: &Path,
    duplicate_names: DuplicateNamePolicy,
) -> Result<PlacementReport> {
    let bytes = fs::read(pdf).with_context(|| format!("Failed to read {}", pdf.display()))?;
    let fields = FieldFile::read(fields)?.into_layout(PageSize::LETTER).fields;

    let rendered = augment_existing(&bytes, &fields, &AugmentOptions { duplicate_names })?;
    write_output(output, &rendered.bytes)?;
    Ok(rendered.report)
}

pub fn print_summary(output: &Path, report: &PlacementReport) {
    for warning in report.warnings() {
        eprintln!("warning: {}", warning);
    }
    println!(
        "Wrote {} ({} placed, {} skipped)",
        output.display(),
        report.placed_count(),
        report.skipped_count()
    );
}

fn write_output(output: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(output, bytes).with_context(|| format!("Failed to write {}", output.display()))
}
