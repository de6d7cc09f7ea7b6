use serde::Deserialize;

/// Main configuration structure for Philo-Walk
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub walker: WalkerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub sample: SampleConfig,
    pub output: OutputConfig,
}

/// Traversal behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WalkerConfig {
    /// Site root that article identifiers are resolved against
    pub base_url: String,

    /// Title of the article every walk is trying to reach
    pub target_title: String,

    /// Suffix the site appends to every `<title>`, stripped before comparison
    pub title_suffix: String,

    /// Maximum number of hops before a walk is abandoned
    pub max_steps: u32,

    /// Stop a walk as soon as it revisits an already seen title
    pub stop_on_title_revisit: bool,

    /// Number of walks allowed in flight at once
    pub max_concurrent_walks: u32,

    /// Minimum time between the start of two requests (milliseconds)
    pub request_delay_ms: u64,

    /// Upper bound for the delay after consecutive fetch failures (milliseconds)
    pub max_backoff_ms: u64,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            target_title: "Philosophy".to_string(),
            title_suffix: " - Wikipedia".to_string(),
            max_steps: 50,
            stop_on_title_revisit: false,
            max_concurrent_walks: 1,
            request_delay_ms: 100,
            max_backoff_ms: 30_000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the walker
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the walker
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the walker
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for walker-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Which starting articles to sample
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SampleConfig {
    /// Number of random articles to walk (0 disables the random sample)
    pub random_count: u32,

    /// Number of rows taken from the most-viewed ranking (0 disables it)
    pub top_count: u32,

    /// Rows taken from each category table (0 disables the category sample)
    pub per_category_count: u32,

    /// Article identifier of the page holding the ranking tables
    pub ranking_page: String,

    /// Index of the first ranking table that is a per-category table
    pub first_category_table: usize,

    /// Human-readable labels for category tables, in table order
    pub category_names: Vec<String>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            random_count: 500,
            top_count: 100,
            per_category_count: 30,
            ranking_page: "Wikipedia:Multiyear_ranking_of_most_viewed_pages".to_string(),
            first_category_table: 2,
            category_names: [
                "Countries",
                "Cities",
                "People",
                "Singers",
                "Actors",
                "Sportsmen",
                "Modern political leaders",
                "Pre-modern people",
                "3rd-millenium people",
                "Music bands",
                "Sports teams",
                "Films and TV series",
                "Albums",
                "Books and book series",
                "Pre-modern books and texts",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl SampleConfig {
    /// Returns the label of a category table, if one is configured
    pub fn category_name(&self, category_id: usize) -> Option<&str> {
        category_id
            .checked_sub(self.first_category_table)
            .and_then(|i| self.category_names.get(i))
            .map(String::as_str)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the CSV tables are written to
    #[serde(rename = "export-dir")]
    pub export_dir: String,

    /// Optional SQLite database receiving the same tables
    #[serde(rename = "database-path", default)]
    pub database_path: Option<String>,

    /// Path to the markdown summary file
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}
