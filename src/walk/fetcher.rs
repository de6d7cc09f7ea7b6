//! Document fetching
//!
//! This module handles all HTTP requests for the walker, including:
//! - Building HTTP clients with proper user agent strings
//! - Resolving article identifiers against the site root
//! - Pacing requests and backing off after failures
//! - Error classification
//!
//! The engine only sees the `DocumentFetcher` trait, so tests can drive it with
//! in-memory documents.

use crate::config::{UserAgentConfig, WalkerConfig};
use crate::state::PacingState;
use crate::walk::document::Document;
use crate::walk::parser::parse_document;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;
use url::Url;

/// Why a document could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Invalid article identifier '{article_id}': {message}")]
    InvalidArticle { article_id: String, message: String },

    #[error("HTTP {status_code} for {url}")]
    Http { url: String, status_code: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Expected HTML from {url}, got '{content_type}'")]
    ContentMismatch { url: String, content_type: String },

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },
}

impl FetchError {
    /// Returns true if the page was retrieved but its structure was unusable
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Source of parsed article documents
///
/// `article_id` is a path-safe identifier with no leading slash, such as
/// `Canada` or `Special:Random`.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, article_id: &str) -> Result<Document, FetchError>;

    /// Number of requests issued so far, if the fetcher keeps count
    async fn request_count(&self) -> u64 {
        0
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use philo_walk::config::UserAgentConfig;
/// use philo_walk::walk::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "PhiloWalk".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10)) // Special:Random answers with a redirect
        .gzip(true)
        .brotli(true)
        .build()
}

/// Formats the user agent: `Name/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Resolves an article identifier to its full URL: `<base>/wiki/<article_id>`
pub fn article_url(base: &Url, article_id: &str) -> Result<Url, FetchError> {
    if article_id.is_empty() || article_id.starts_with('/') {
        return Err(FetchError::InvalidArticle {
            article_id: article_id.to_string(),
            message: "expected a non-empty identifier without a leading slash".to_string(),
        });
    }

    base.join(&format!("/wiki/{}", article_id))
        .map_err(|e| FetchError::InvalidArticle {
            article_id: article_id.to_string(),
            message: e.to_string(),
        })
}

/// Fetches article pages over HTTP and parses them into documents
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
    title_suffix: String,
    pacing: Mutex<PacingState>,
}

impl HttpFetcher {
    /// Creates a fetcher from the walker and user agent configuration
    pub fn new(walker: &WalkerConfig, user_agent: &UserAgentConfig) -> crate::Result<Self> {
        let client = build_http_client(user_agent)?;
        let base_url = Url::parse(&walker.base_url)?;

        Ok(Self {
            client,
            base_url,
            title_suffix: walker.title_suffix.clone(),
            pacing: Mutex::new(PacingState::new(walker)),
        })
    }

    /// Waits until the pacing state allows the next request, then records it
    ///
    /// The lock is held while sleeping so concurrent walks queue up behind each
    /// other instead of all firing once the delay expires.
    async fn wait_for_turn(&self) {
        let mut pacing = self.pacing.lock().await;
        if let Some(wait) = pacing.time_until_next_request(Instant::now()) {
            tracing::trace!("Pacing: waiting {:?} before next request", wait);
            tokio::time::sleep(wait).await;
        }
        pacing.record_request(Instant::now());
    }

    async fn record_result(&self, result: &Result<Document, FetchError>) {
        let mut pacing = self.pacing.lock().await;
        match result {
            Ok(_) => pacing.record_success(),
            Err(e) => {
                pacing.record_failure();
                tracing::debug!(
                    "Fetch failed ({}), next delay {:?}",
                    e,
                    pacing.current_delay()
                );
            }
        }
    }

    async fn fetch_page(&self, url: &Url) -> Result<Document, FetchError> {
        let url_str = url.as_str();

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_request_error(url_str, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: url_str.to_string(),
                status_code: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(FetchError::ContentMismatch {
                url: url_str.to_string(),
                content_type,
            });
        }

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| classify_request_error(url_str, e))?;

        parse_document(&body, &self.title_suffix).map_err(|message| FetchError::Parse {
            url: final_url,
            message,
        })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, article_id: &str) -> Result<Document, FetchError> {
        let url = article_url(&self.base_url, article_id)?;

        self.wait_for_turn().await;
        tracing::trace!("GET {}", url);

        let result = self.fetch_page(&url).await;
        self.record_result(&result).await;
        result
    }

    async fn request_count(&self) -> u64 {
        self.pacing.lock().await.request_count
    }
}

/// Maps a transport error to a `FetchError`
fn classify_request_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestWalker".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_user_agent_format() {
        let config = create_test_config();
        assert_eq!(
            user_agent_string(&config),
            "TestWalker/1.0 (+https://example.com/about; admin@example.com)"
        );
    }

    #[test]
    fn test_article_url() {
        let base = Url::parse("https://en.wikipedia.org").unwrap();
        assert_eq!(
            article_url(&base, "Canada").unwrap().as_str(),
            "https://en.wikipedia.org/wiki/Canada"
        );
        assert_eq!(
            article_url(&base, "Special:Random").unwrap().as_str(),
            "https://en.wikipedia.org/wiki/Special:Random"
        );
        assert_eq!(
            article_url(&base, "Mercury_(planet)").unwrap().as_str(),
            "https://en.wikipedia.org/wiki/Mercury_(planet)"
        );
    }

    #[test]
    fn test_article_url_rejects_leading_slash() {
        let base = Url::parse("https://en.wikipedia.org").unwrap();
        assert!(matches!(
            article_url(&base, "/wiki/Canada"),
            Err(FetchError::InvalidArticle { .. })
        ));
        assert!(article_url(&base, "").is_err());
    }

    #[test]
    fn test_http_fetcher_creation() {
        let walker = WalkerConfig::default();
        assert!(HttpFetcher::new(&walker, &create_test_config()).is_ok());
    }
}
