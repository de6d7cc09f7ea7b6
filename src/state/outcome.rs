/// Walk state and outcome definitions
///
/// This module defines the states a single walk moves through and the record it
/// leaves behind once it reaches a terminal state.
use crate::walk::{Document, Link};
use std::fmt;

/// Represents the current state of one walk
#[derive(Debug, Clone)]
pub enum WalkState {
    // ===== Active States =====
    /// The next article is being fetched
    Fetching {
        /// Article identifier, without the `/wiki/` prefix
        article_id: String,
    },

    /// A fetched document is being scanned for its first eligible link
    Selecting {
        /// The document that was just fetched
        document: Document,
    },

    /// A link has been chosen and is about to be followed
    Following {
        /// The chosen link
        link: Link,
    },

    // ===== Terminal State =====
    /// The walk is over
    Finished(OutcomeReason),
}

impl WalkState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    /// Short name of the state for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetching { .. } => "fetching",
            Self::Selecting { .. } => "selecting",
            Self::Following { .. } => "following",
            Self::Finished(_) => "finished",
        }
    }
}

/// Why a walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutcomeReason {
    /// The target article was reached
    Converged,

    /// The walk came back to a page it had already seen
    Cycle,

    /// No eligible link was left anywhere in the body
    DeadEnd,

    /// The hop bound was reached without convergence
    StepLimit,

    /// A page could not be fetched or parsed
    FetchError,
}

impl OutcomeReason {
    /// All reasons, in report order
    pub const ALL: [OutcomeReason; 5] = [
        Self::Converged,
        Self::Cycle,
        Self::DeadEnd,
        Self::StepLimit,
        Self::FetchError,
    ];

    /// Returns true if this represents a successful walk
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Converged)
    }

    /// Converts the reason to the string used in exports and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Converged => "converged",
            Self::Cycle => "cycle",
            Self::DeadEnd => "dead-end",
            Self::StepLimit => "step-limit",
            Self::FetchError => "fetch-error",
        }
    }
}

impl fmt::Display for OutcomeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The record a finished walk leaves behind
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalOutcome {
    /// Identifier the walk was started from
    pub start_article: String,

    /// Title of the first page that was fetched successfully
    pub start_title: Option<String>,

    /// Hops to the target; `None` when the walk failed
    pub degrees: Option<u32>,

    /// Hops actually taken, whatever the result
    pub steps: u32,

    /// Whether the target article was reached
    pub reached_target: bool,

    /// Why the walk stopped
    pub reason: OutcomeReason,

    /// Titles visited, in order, starting with the first page
    pub path: Vec<String>,
}

impl TraversalOutcome {
    /// Builds a successful outcome
    pub fn converged(start_article: &str, steps: u32, path: Vec<String>) -> Self {
        Self {
            start_article: start_article.to_string(),
            start_title: path.first().cloned(),
            degrees: Some(steps),
            steps,
            reached_target: true,
            reason: OutcomeReason::Converged,
            path,
        }
    }

    /// Builds a failed outcome; any degrees reached so far are discarded
    pub fn failed(
        start_article: &str,
        reason: OutcomeReason,
        steps: u32,
        path: Vec<String>,
    ) -> Self {
        Self {
            start_article: start_article.to_string(),
            start_title: path.first().cloned(),
            degrees: None,
            steps,
            reached_target: false,
            reason,
            path,
        }
    }

    /// Returns true if the walk reached the target
    pub fn is_success(&self) -> bool {
        self.reason.is_success()
    }

    /// Label used when the walk is reported, falling back to the identifier
    pub fn display_title(&self) -> &str {
        self.start_title.as_deref().unwrap_or(&self.start_article)
    }
}
