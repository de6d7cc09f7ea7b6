//! Corpus sampling - which articles the walks start from
//!
//! Three samples are supported:
//! - Random: `Special:Random`, fetched N times
//! - Top-ranked: the most viewed articles, from the ranking page's first table
//! - Categories: the per-category ranking tables on the same page

mod ranking;

pub use ranking::{parse_ranking_tables, RankingRow, RankingTable};

use crate::config::SampleConfig;
use crate::walk::{DocumentFetcher, FetchError, ARTICLE_PREFIX};
use std::fmt;
use thiserror::Error;

/// Identifier that redirects to a different random article on every request
pub const RANDOM_ARTICLE: &str = "Special:Random";

/// Errors that can occur while building a sample
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Failed to fetch ranking page: {0}")]
    Fetch(#[from] FetchError),

    #[error("Ranking page '{page}' has no table at index {index}")]
    MissingTable { page: String, index: usize },
}

/// Which sample a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    Random,
    TopRanked,
    Category,
}

impl SampleKind {
    /// Name used for export files and tables
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::TopRanked => "top100",
            Self::Category => "topcategories",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Random => "Random articles",
            Self::TopRanked => "Most viewed articles",
            Self::Category => "Most viewed articles by category",
        })
    }
}

/// One starting article
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    /// Article identifier handed to the fetcher (no `/wiki/` prefix)
    pub identifier: String,

    /// Text shown for the article; empty until resolved for random records
    pub display_text: String,

    /// Link as found on the listing page
    pub href: String,

    pub rank: Option<u32>,

    /// Page views, as listed on the ranking page
    pub popularity: Option<f64>,

    /// Index of the ranking table the record came from
    pub category_id: Option<usize>,
}

impl SampleRecord {
    /// Builds a record from a listing link, stripping the article prefix
    ///
    /// Returns None for links that do not point at an article.
    pub fn from_href(href: &str, display_text: &str) -> Option<Self> {
        let identifier = href.strip_prefix(ARTICLE_PREFIX)?;
        if identifier.is_empty() {
            return None;
        }

        Some(Self {
            identifier: identifier.to_string(),
            display_text: display_text.to_string(),
            href: href.to_string(),
            rank: None,
            popularity: None,
            category_id: None,
        })
    }

    fn from_row(row: &RankingRow, category_id: Option<usize>) -> Option<Self> {
        let mut record = Self::from_href(&row.href, &row.text)?;
        record.rank = Some(row.rank);
        record.popularity = row.popularity;
        record.category_id = category_id;
        Some(record)
    }
}

/// A sample of starting articles
#[derive(Debug, Clone)]
pub struct SampleSet {
    pub kind: SampleKind,
    pub records: Vec<SampleRecord>,
}

/// Builds `count` random records; each walk resolves its own article
pub fn random_sample(count: u32) -> SampleSet {
    let records = (0..count)
        .map(|_| SampleRecord {
            identifier: RANDOM_ARTICLE.to_string(),
            display_text: String::new(),
            href: format!("{}{}", ARTICLE_PREFIX, RANDOM_ARTICLE),
            rank: None,
            popularity: None,
            category_id: None,
        })
        .collect();

    SampleSet {
        kind: SampleKind::Random,
        records,
    }
}

/// Takes the first `count` rows of the first ranking table
pub fn top_ranked_sample(
    tables: &[RankingTable],
    page: &str,
    count: u32,
) -> Result<SampleSet, SampleError> {
    let table = tables.first().ok_or_else(|| SampleError::MissingTable {
        page: page.to_string(),
        index: 0,
    })?;

    let records = table
        .rows
        .iter()
        .filter_map(|row| SampleRecord::from_row(row, None))
        .take(count as usize)
        .collect();

    Ok(SampleSet {
        kind: SampleKind::TopRanked,
        records,
    })
}

/// Takes the first `per_category` rows of every table from `first_table` on
pub fn category_sample(
    tables: &[RankingTable],
    page: &str,
    first_table: usize,
    per_category: u32,
) -> Result<SampleSet, SampleError> {
    if tables.len() <= first_table {
        return Err(SampleError::MissingTable {
            page: page.to_string(),
            index: first_table,
        });
    }

    let records = tables
        .iter()
        .filter(|table| table.index >= first_table)
        .flat_map(|table| {
            table
                .rows
                .iter()
                .filter_map(move |row| SampleRecord::from_row(row, Some(table.index)))
                .take(per_category as usize)
        })
        .collect();

    Ok(SampleSet {
        kind: SampleKind::Category,
        records,
    })
}

/// Builds every sample enabled in the configuration
///
/// The ranking page is fetched once and shared by the top-ranked and category
/// samples. A sample that cannot be built is logged and skipped; the others are
/// still returned.
pub async fn collect_samples<F: DocumentFetcher>(
    fetcher: &F,
    config: &SampleConfig,
) -> Vec<SampleSet> {
    let mut samples = Vec::new();

    if config.random_count > 0 {
        tracing::info!("Random sample: {} articles", config.random_count);
        samples.push(random_sample(config.random_count));
    }

    if config.top_count == 0 && config.per_category_count == 0 {
        return samples;
    }

    tracing::info!("Fetching ranking page: {}", config.ranking_page);
    let tables = match fetcher.fetch(&config.ranking_page).await {
        Ok(document) => parse_ranking_tables(&document),
        Err(e) => {
            tracing::error!("Skipping ranked samples: {}", e);
            return samples;
        }
    };
    tracing::debug!("Ranking page has {} tables", tables.len());

    if config.top_count > 0 {
        match top_ranked_sample(&tables, &config.ranking_page, config.top_count) {
            Ok(sample) => {
                tracing::info!("Top-ranked sample: {} articles", sample.records.len());
                samples.push(sample);
            }
            Err(e) => tracing::error!("Skipping top-ranked sample: {}", e),
        }
    }

    if config.per_category_count > 0 {
        match category_sample(
            &tables,
            &config.ranking_page,
            config.first_category_table,
            config.per_category_count,
        ) {
            Ok(sample) => {
                tracing::info!("Category sample: {} articles", sample.records.len());
                samples.push(sample);
            }
            Err(e) => tracing::error!("Skipping category sample: {}", e),
        }
    }

    samples
}
