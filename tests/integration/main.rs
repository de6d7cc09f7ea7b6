//! Integration tests for Philo-Walk
//!
//! These tests use wiremock to serve article pages and exercise walks,
//! sampling and full runs end-to-end over HTTP.

mod pipeline_tests;
mod walk_tests;

use philo_walk::config::{Config, OutputConfig, SampleConfig, UserAgentConfig, WalkerConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wraps body markup in a minimal article page
pub fn article_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{} - Wikipedia</title></head>
<body>
<div id="content">
<h1 id="firstHeading">{}</h1>
<div id="bodyContent"><div class="mw-parser-output">{}</div></div>
</div>
</body>
</html>"#,
        title, title, body
    )
}

/// Serves an article page at `/wiki/<id>`
pub async fn mount_article(server: &MockServer, id: &str, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", id)))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(article_html(title, body), "text/html"),
        )
        .mount(server)
        .await;
}

/// Creates a walker configuration pointing at the mock server, without pacing
pub fn walker_config(base_url: &str) -> WalkerConfig {
    WalkerConfig {
        base_url: base_url.to_string(),
        request_delay_ms: 0,
        max_backoff_ms: 0,
        ..WalkerConfig::default()
    }
}

pub fn user_agent_config() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

/// Creates a full configuration writing into `out_dir`
pub fn create_test_config(base_url: &str, sample: SampleConfig, out_dir: &std::path::Path) -> Config {
    Config {
        walker: walker_config(base_url),
        user_agent: user_agent_config(),
        sample,
        output: OutputConfig {
            export_dir: out_dir.join("exports").display().to_string(),
            database_path: Some(out_dir.join("walks.db").display().to_string()),
            summary_path: out_dir.join("summary.md").display().to_string(),
        },
    }
}
