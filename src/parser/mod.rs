pub mod entries;
pub mod infer;
pub mod sections;

use tracing::debug;

use crate::catalog::{self, Catalog};

/// Three-pass pipeline: markdown → titled sections → raw entries → catalog.
pub fn parse_document(markdown: &str) -> Catalog {
    let sections = sections::split_sections(markdown);

    let mut groups = Vec::with_capacity(sections.len());
    let mut skipped_total = 0;
    for section in sections {
        let (entries, skipped) = entries::extract_entries(&section.body);
        skipped_total += skipped;
        groups.push((section.title, entries));
    }
    if skipped_total > 0 {
        debug!("Skipped {} non-entry lines during extraction", skipped_total);
    }

    catalog::build_catalog(groups)
}

// ── Tests ──
