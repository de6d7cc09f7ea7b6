//! Link eligibility predicates
//!
//! Three independent, pure checks decide whether a candidate link may be followed:
//!
//! 1. `is_eligible_reference` - the href points at a mainspace article
//! 2. `is_parenthesized` - the link sits inside a parenthetical aside
//! 3. `is_already_visited` - the href was already followed on this walk
//!
//! A link is eligible iff the first holds and the other two do not.

use crate::state::VisitedSet;
use crate::walk::document::{ContentBlock, Link};
use std::fmt;

/// Path prefix shared by all article links
pub const ARTICLE_PREFIX: &str = "/wiki/";

/// Separates a namespace from a page name (`Help:`, `File:`, `Category:`...)
const NAMESPACE_SEPARATOR: char = ':';

/// Result of running all three predicates on a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkVerdict {
    /// The link may be followed
    Eligible,
    /// Anchor, external URL, media or meta-namespace link
    NotArticle,
    /// The link is inside parentheses
    Parenthesized,
    /// The link was already followed
    AlreadyVisited,
}

impl LinkVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }
}

impl fmt::Display for LinkVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eligible => "eligible",
            Self::NotArticle => "not an article",
            Self::Parenthesized => "in parentheses",
            Self::AlreadyVisited => "already visited",
        })
    }
}

/// Returns true iff the href is a mainspace article link
///
/// In-page anchors (`#cite_note-1`), external URLs, protocol-relative media links
/// and namespaced pages (`/wiki/Help:Foo`) are all rejected.
pub fn is_eligible_reference(link: &Link) -> bool {
    link.href.starts_with(ARTICLE_PREFIX) && !link.href.contains(NAMESPACE_SEPARATOR)
}

/// Returns true iff the link's first occurrence in the block is inside parentheses
///
/// The block's raw markup is scanned from its start up to the first occurrence of
/// the link's textual form; the link is parenthesized when more `(` than `)` were
/// seen. When the same link appears more than once, only the first occurrence is
/// considered, even if `link` is a later one.
pub fn is_parenthesized(link: &Link, block: &ContentBlock) -> bool {
    let end = block
        .raw
        .find(&link.source)
        .unwrap_or_else(|| link.position.min(block.raw.len()));

    let prefix = match block.raw.get(..end) {
        Some(prefix) => prefix,
        None => return false,
    };

    let open = prefix.matches('(').count();
    let close = prefix.matches(')').count();
    open > close
}

/// Returns true iff the exact href was already followed
pub fn is_already_visited(link: &Link, visited: &VisitedSet) -> bool {
    visited.contains(&link.href)
}

/// Runs the predicates in order and reports the first one that rejects the link
pub fn classify_link(link: &Link, block: &ContentBlock, visited: &VisitedSet) -> LinkVerdict {
    if !is_eligible_reference(link) {
        LinkVerdict::NotArticle
    } else if is_parenthesized(link, block) {
        LinkVerdict::Parenthesized
    } else if is_already_visited(link, visited) {
        LinkVerdict::AlreadyVisited
    } else {
        LinkVerdict::Eligible
    }
}

/// Returns true iff the link may be followed
pub fn is_eligible(link: &Link, block: &ContentBlock, visited: &VisitedSet) -> bool {
    classify_link(link, block, visited).is_eligible()
}
