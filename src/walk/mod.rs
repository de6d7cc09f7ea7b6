//! Walk module - following first links until the target article
//!
//! This module contains:
//! - The document model (blocks and links of an article body)
//! - Link classification and first-link selection
//! - HTML parsing and HTTP fetching of article pages
//! - The traversal engine and the run orchestration around it

mod classifier;
mod document;
mod engine;
mod fetcher;
mod parser;
mod runner;
mod selector;

pub use classifier::{
    classify_link, is_already_visited, is_eligible, is_eligible_reference, is_parenthesized,
    LinkVerdict, ARTICLE_PREFIX,
};
pub use document::{BlockKind, ContentBlock, Document, Link};
pub use engine::{TraversalEngine, WalkError};
pub use fetcher::{
    article_url, build_http_client, user_agent_string, DocumentFetcher, FetchError, HttpFetcher,
};
pub use parser::{extract_title, parse_document, strip_title_suffix, BODY_CONTAINER};
pub use runner::{run_pipeline, run_sample, run_with_engine};
pub use selector::{is_candidate_block, select_first_link, COORDINATES_MARKER};
