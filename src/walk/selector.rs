//! First-link selection
//!
//! Scans a document's body blocks in order and picks the first link that passes
//! every eligibility predicate.

use crate::state::VisitedSet;
use crate::walk::classifier::classify_link;
use crate::walk::document::{ContentBlock, Document, Link};

/// Geocoordinate boilerplate injected at the top of geography articles
pub const COORDINATES_MARKER: &str = "Coordinates: ";

/// Returns true for blocks that are scanned for links
///
/// Only paragraphs and lists count, and the geocoordinate line is skipped since it
/// would otherwise always supply the first link.
pub fn is_candidate_block(block: &ContentBlock) -> bool {
    block.kind.is_text() && !block.text.starts_with(COORDINATES_MARKER)
}

/// Returns the first eligible link of the document, if any
///
/// Blocks are visited in document order; when a candidate block yields no eligible
/// link the scan moves on to the next candidate block. Every rejected candidate is
/// logged with the predicate that rejected it. The function is pure: the same
/// document and visited set always yield the same link.
pub fn select_first_link<'a>(document: &'a Document, visited: &VisitedSet) -> Option<&'a Link> {
    for block in document.blocks.iter().filter(|b| is_candidate_block(b)) {
        for link in &block.links {
            let verdict = classify_link(link, block, visited);
            if verdict.is_eligible() {
                tracing::debug!("  Good link: {}", link.href);
                return Some(link);
            }
            tracing::debug!("  Bad link: {} ({})", link.href, verdict);
        }
    }

    None
}
