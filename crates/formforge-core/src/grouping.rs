//! Page grouping for field placements

use std::collections::BTreeMap;

use crate::layout::FieldPlacement;

/// Fields keyed by their target page, each paired with its input index
pub type PageGroups<'a> = BTreeMap<i64, Vec<(usize, &'a FieldPlacement)>>;

/// Partition fields by page number, keeping input order within each page
pub fn group_by_page(fields: &[FieldPlacement]) -> PageGroups<'_> {
    let mut groups: PageGroups<'_> = BTreeMap::new();
    for (index, field) in fields.iter().enumerate() {
        groups
            .entry(field.page_number())
            .or_default()
            .push((index, field));
    }
    groups
}

/// Number of pages a new document needs: the highest page referenced, at least 1
///
/// Pages between referenced ones are still counted, so fields on pages 1 and 3
/// yield three pages.
pub fn build_page_count(groups: &PageGroups<'_>) -> u32 {
    groups
        .keys()
        .next_back()
        .copied()
        .filter(|&page| page >= 1)
        .map(|page| u32::try_from(page).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

/// Resolve a 1-based page number against a document, `None` when out of range
pub fn resolve_page(page: i64, page_count: u32) -> Option<u32> {
    u32::try_from(page)
        .ok()
        .filter(|&page| page >= 1 && page <= page_count)
}
