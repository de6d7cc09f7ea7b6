//! Traversal engine - one walk from a starting article to the target
//!
//! A walk is a small state machine:
//!
//! ```text
//! Fetching ──title == target──▶ Finished(Converged)
//!    │
//!    ▼
//! Selecting ──no eligible link──▶ DeadEnd
//!    │      ──hop bound reached──▶ StepLimit
//!    ▼
//! Following ──▶ Fetching
//! ```
//!
//! Every failure is raised as a `WalkError` inside the machine and converted into a
//! `TraversalOutcome` at the walk boundary, so callers always get an outcome back.

use crate::config::WalkerConfig;
use crate::state::{OutcomeReason, TraversalOutcome, VisitedSet, WalkState};
use crate::walk::classifier::ARTICLE_PREFIX;
use crate::walk::fetcher::{DocumentFetcher, FetchError};
use crate::walk::selector::select_first_link;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use thiserror::Error;

/// Errors that end a walk early
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("{0}")]
    Fetch(FetchError),

    #[error("Unusable page structure: {0}")]
    Parse(FetchError),

    #[error("No eligible link in '{title}'")]
    NoEligibleLink { title: String },

    #[error("Gave up after {steps} steps")]
    StepLimitExceeded { steps: u32 },

    #[error("Returned to '{title}'")]
    TitleRevisited { title: String },

    #[error("Unexpected fault: {0}")]
    Unexpected(String),
}

impl From<FetchError> for WalkError {
    fn from(e: FetchError) -> Self {
        if e.is_parse() {
            Self::Parse(e)
        } else {
            Self::Fetch(e)
        }
    }
}

impl WalkError {
    /// The outcome reason a walk ending with this error is recorded under
    pub fn reason(&self) -> OutcomeReason {
        match self {
            Self::Fetch(_) | Self::Parse(_) | Self::Unexpected(_) => OutcomeReason::FetchError,
            Self::NoEligibleLink { .. } => OutcomeReason::DeadEnd,
            Self::StepLimitExceeded { .. } => OutcomeReason::StepLimit,
            Self::TitleRevisited { .. } => OutcomeReason::Cycle,
        }
    }

    /// Short classification used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Parse(_) => "parse",
            Self::NoEligibleLink { .. } => "no-eligible-link",
            Self::StepLimitExceeded { .. } => "step-limit",
            Self::TitleRevisited { .. } => "title-revisited",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

/// Progress of one walk; private to that walk and dropped when it ends
#[derive(Debug, Default)]
struct Walk {
    start_article: String,
    visited: VisitedSet,
    degrees: u32,
    path: Vec<String>,
}

impl Walk {
    fn new(start_article: &str) -> Self {
        Self {
            start_article: start_article.to_string(),
            ..Self::default()
        }
    }

    fn finish(self, reason: OutcomeReason) -> TraversalOutcome {
        if reason.is_success() {
            TraversalOutcome::converged(&self.start_article, self.degrees, self.path)
        } else {
            TraversalOutcome::failed(&self.start_article, reason, self.degrees, self.path)
        }
    }
}

/// Runs walks against a document fetcher
pub struct TraversalEngine<F> {
    fetcher: F,
    target_title: String,
    max_steps: u32,
    stop_on_title_revisit: bool,
}

impl<F: DocumentFetcher> TraversalEngine<F> {
    /// Creates an engine from the walker configuration
    pub fn new(fetcher: F, config: &WalkerConfig) -> Self {
        Self {
            fetcher,
            target_title: config.target_title.clone(),
            max_steps: config.max_steps,
            stop_on_title_revisit: config.stop_on_title_revisit,
        }
    }

    /// Creates an engine with an explicit target and hop bound
    pub fn with_target(fetcher: F, target_title: &str, max_steps: u32) -> Self {
        Self {
            fetcher,
            target_title: target_title.to_string(),
            max_steps,
            stop_on_title_revisit: false,
        }
    }

    /// Ends walks as soon as they come back to a title they already visited
    pub fn stop_on_title_revisit(mut self, enabled: bool) -> Self {
        self.stop_on_title_revisit = enabled;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn target_title(&self) -> &str {
        &self.target_title
    }

    /// Walks from `start_article` until a terminal state is reached
    ///
    /// Never fails: every error, including a panic inside the fetcher, is turned
    /// into a failed outcome so a batch can always move on to its next article.
    pub async fn walk(&self, start_article: &str) -> TraversalOutcome {
        tracing::info!("-------------------------------------");

        match AssertUnwindSafe(self.run(start_article)).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                let error = WalkError::Unexpected(message);
                tracing::error!(
                    "Walk from '{}' aborted [{}]: {}",
                    start_article,
                    error.kind(),
                    error
                );
                TraversalOutcome::failed(start_article, error.reason(), 0, Vec::new())
            }
        }
    }

    async fn run(&self, start_article: &str) -> TraversalOutcome {
        let mut walk = Walk::new(start_article);
        let mut state = WalkState::Fetching {
            article_id: start_article.to_string(),
        };

        loop {
            if let WalkState::Finished(reason) = state {
                tracing::info!(
                    "Walk from '{}' finished: {} after {} steps",
                    start_article,
                    reason,
                    walk.degrees
                );
                return walk.finish(reason);
            }

            let current = state.name();
            state = match self.advance(state, &mut walk).await {
                Ok(next) => next,
                Err(error) => {
                    let reason = error.reason();
                    match &error {
                        WalkError::Unexpected(_) => tracing::error!(
                            "Walk from '{}' failed while {} [{}]: {}",
                            start_article,
                            current,
                            error.kind(),
                            error
                        ),
                        _ => tracing::warn!(
                            "Walk from '{}' failed while {} [{}]: {}",
                            start_article,
                            current,
                            error.kind(),
                            error
                        ),
                    }
                    WalkState::Finished(reason)
                }
            };
        }
    }

    /// Performs one transition of the state machine
    async fn advance(&self, state: WalkState, walk: &mut Walk) -> Result<WalkState, WalkError> {
        match state {
            WalkState::Fetching { article_id } => {
                let document = self.fetcher.fetch(&article_id).await?;
                tracing::info!("{}. {}", walk.degrees, document.title);

                if document.title == self.target_title {
                    walk.path.push(document.title);
                    return Ok(WalkState::Finished(OutcomeReason::Converged));
                }

                if self.stop_on_title_revisit && walk.path.contains(&document.title) {
                    return Err(WalkError::TitleRevisited {
                        title: document.title,
                    });
                }

                walk.path.push(document.title.clone());
                Ok(WalkState::Selecting { document })
            }

            WalkState::Selecting { document } => {
                if walk.degrees >= self.max_steps {
                    return Err(WalkError::StepLimitExceeded {
                        steps: walk.degrees,
                    });
                }

                match select_first_link(&document, &walk.visited) {
                    Some(link) => Ok(WalkState::Following { link: link.clone() }),
                    None => Err(WalkError::NoEligibleLink {
                        title: document.title,
                    }),
                }
            }

            WalkState::Following { link } => {
                let article_id = link
                    .href
                    .strip_prefix(ARTICLE_PREFIX)
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| {
                        WalkError::Unexpected(format!(
                            "selected link '{}' is not an article",
                            link.href
                        ))
                    })?
                    .to_string();

                if !walk.visited.insert(&link.href) {
                    return Err(WalkError::Unexpected(format!(
                        "selected link '{}' was already visited",
                        link.href
                    )));
                }
                walk.degrees += 1;

                Ok(WalkState::Fetching { article_id })
            }

            WalkState::Finished(reason) => Ok(WalkState::Finished(reason)),
        }
    }
}
