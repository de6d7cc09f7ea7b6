//! Degree statistics
//!
//! This module turns finished walks into the distributions that get reported:
//! histogram, five-number summary, rank-vs-degrees pairs and per-category
//! breakdowns.

use crate::config::SampleConfig;
use crate::output::traits::SampleOutcome;
use crate::sample::SampleKind;
use crate::state::OutcomeReason;
use std::collections::BTreeMap;

/// Positions (1-based, within a category) whose popularity is reported
pub const POPULARITY_POSITIONS: [usize; 3] = [1, 10, 30];

/// Distribution of degrees over successful walks
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeStatistics {
    pub count: usize,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub median: f64,

    /// First quartile
    pub q1: f64,

    /// Third quartile
    pub q3: f64,

    /// Degree -> number of walks, ascending by degree
    pub histogram: BTreeMap<u32, usize>,
}

impl DegreeStatistics {
    /// Computes statistics; None when there are no degrees at all
    pub fn from_degrees(degrees: &[u32]) -> Option<Self> {
        if degrees.is_empty() {
            return None;
        }

        let mut sorted = degrees.to_vec();
        sorted.sort_unstable();

        let mut histogram = BTreeMap::new();
        for d in &sorted {
            *histogram.entry(*d).or_insert(0) += 1;
        }

        let sum: u64 = sorted.iter().map(|&d| d as u64).sum();

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean: sum as f64 / sorted.len() as f64,
            median: percentile(&sorted, 50.0),
            q1: percentile(&sorted, 25.0),
            q3: percentile(&sorted, 75.0),
            histogram,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Percentile of sorted data with linear interpolation between closest ranks
fn percentile(sorted: &[u32], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0] as f64;
    }

    let position = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted[lower] as f64 + (sorted[upper] as f64 - sorted[lower] as f64) * fraction
}

/// Statistics for one category table
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category_id: usize,
    pub name: Option<String>,

    /// Display text of the category's most popular article
    pub top_text: String,

    pub statistics: Option<DegreeStatistics>,

    /// (position, popularity) for each entry of `POPULARITY_POSITIONS`
    pub popularity_at: Vec<(usize, Option<f64>)>,
}

/// Statistics for one sample
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSummary {
    pub kind: SampleKind,
    pub attempted: usize,
    pub succeeded: usize,

    /// Failed walks by reason
    pub failures: BTreeMap<OutcomeReason, usize>,

    pub statistics: Option<DegreeStatistics>,

    /// (rank, degrees) of successful walks that carry a rank
    pub rank_vs_degrees: Vec<(u32, u32)>,

    pub categories: Vec<CategorySummary>,
}

impl SampleSummary {
    /// Aggregates the finished walks of one sample
    pub fn from_outcomes(kind: SampleKind, outcomes: &[SampleOutcome], config: &SampleConfig) -> Self {
        let degrees: Vec<u32> = outcomes.iter().filter_map(|o| o.outcome.degrees).collect();

        let mut failures = BTreeMap::new();
        for o in outcomes.iter().filter(|o| !o.outcome.is_success()) {
            *failures.entry(o.outcome.reason).or_insert(0) += 1;
        }

        let rank_vs_degrees = if kind == SampleKind::TopRanked {
            outcomes
                .iter()
                .filter_map(|o| Some((o.record.rank?, o.outcome.degrees?)))
                .collect()
        } else {
            Vec::new()
        };

        let categories = if kind == SampleKind::Category {
            summarize_categories(outcomes, config)
        } else {
            Vec::new()
        };

        Self {
            kind,
            attempted: outcomes.len(),
            succeeded: degrees.len(),
            failures,
            statistics: DegreeStatistics::from_degrees(&degrees),
            rank_vs_degrees,
            categories,
        }
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.attempted as f64) * 100.0
    }

    /// Number of failed walks
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

fn summarize_categories(outcomes: &[SampleOutcome], config: &SampleConfig) -> Vec<CategorySummary> {
    let mut by_category: BTreeMap<usize, Vec<&SampleOutcome>> = BTreeMap::new();
    for o in outcomes {
        if let Some(id) = o.record.category_id {
            by_category.entry(id).or_default().push(o);
        }
    }

    by_category
        .into_iter()
        .map(|(category_id, members)| {
            let degrees: Vec<u32> = members.iter().filter_map(|o| o.outcome.degrees).collect();
            let popularity_at = POPULARITY_POSITIONS
                .iter()
                .map(|&pos| (pos, members.get(pos - 1).and_then(|o| o.record.popularity)))
                .collect();

            CategorySummary {
                category_id,
                name: config.category_name(category_id).map(str::to_string),
                top_text: members
                    .first()
                    .map(|o| o.display_text().to_string())
                    .unwrap_or_default(),
                statistics: DegreeStatistics::from_degrees(&degrees),
                popularity_at,
            }
        })
        .collect()
}
