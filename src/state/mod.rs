//! State module for tracking walk progress
//!
//! # Components
//!
//! - `WalkState`: The state machine a single walk moves through
//! - `TraversalOutcome`: The record a finished walk leaves behind
//! - `VisitedSet`: Links already followed during one walk
//! - `PacingState`: Request spacing and back-off against the article server

mod outcome;
mod pacing;
mod visited;

// Re-export main types
pub use outcome::{OutcomeReason, TraversalOutcome, WalkState};
pub use pacing::PacingState;
pub use visited::VisitedSet;
