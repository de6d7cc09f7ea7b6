//! Sampling and full runs against a mock wiki

use super::{article_html, create_test_config, mount_article, user_agent_config, walker_config};
use philo_walk::config::SampleConfig;
use philo_walk::sample::{collect_samples, SampleKind};
use philo_walk::walk::{run_pipeline, HttpFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RANKING_PAGE: &str = "Wikipedia:Multiyear_ranking_of_most_viewed_pages";

fn ranking_body() -> String {
    r#"<p>This page lists the most viewed articles.</p>
<table class="wikitable sortable">
<tr><th>Rank</th><th>Article</th><th>Views (millions)</th></tr>
<tr><td>1</td><td><a href="/wiki/Stoa" title="Stoa">Stoa</a></td><td>1,234</td></tr>
<tr><td>2</td><td><a href="/wiki/Stoicism" title="Stoicism">Stoicism</a></td><td>56.5</td></tr>
<tr><td>3</td><td><a href="/wiki/Orphan" title="Orphan">Orphan</a></td><td>12</td></tr>
</table>
<h2>Countries</h2>
<table class="wikitable">
<tr><th>Rank</th><th>Country</th><th>Views</th></tr>
<tr><td>1</td><td><a href="/wiki/Greece">Greece</a></td><td>900</td></tr>
<tr><td>2</td><td><a href="/wiki/Orphan">Orphan</a></td><td>800</td></tr>
<tr><td>3</td><td><a href="/wiki/Stoa">Stoa</a></td><td>700</td></tr>
</table>"#
        .to_string()
}

/// Mounts a small wiki: Stoa -> Stoicism -> Philosophy, Greece -> Philosophy,
/// Orphan is a dead end and Special:Random always lands on Stoa
async fn mount_wiki(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/wiki/Special:Random"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/wiki/Stoa", server.uri()).as_str()),
        )
        .mount(server)
        .await;

    mount_article(
        server,
        "Stoa",
        "Stoa",
        r#"<p>A <b>stoa</b> is a walkway associated with <a href="/wiki/Stoicism">Stoicism</a>.</p>"#,
    )
    .await;
    mount_article(
        server,
        "Stoicism",
        "Stoicism",
        r#"<p><b>Stoicism</b> is a school of <a href="/wiki/Philosophy">philosophy</a>.</p>"#,
    )
    .await;
    mount_article(
        server,
        "Greece",
        "Greece",
        r#"<p>Greece is the birthplace of Western <a href="/wiki/Philosophy">philosophy</a>.</p>"#,
    )
    .await;
    mount_article(server, "Orphan", "Orphan", "<p>No links at all.</p>").await;
    mount_article(
        server,
        "Philosophy",
        "Philosophy",
        r#"<p>Philosophy is the study of <a href="/wiki/Knowledge">knowledge</a>.</p>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", RANKING_PAGE)))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                article_html("Wikipedia:Multiyear ranking of most viewed pages", &ranking_body()),
                "text/html",
            ),
        )
        .mount(server)
        .await;
}

fn sample_config() -> SampleConfig {
    SampleConfig {
        random_count: 2,
        top_count: 2,
        per_category_count: 2,
        first_category_table: 1,
        ..SampleConfig::default()
    }
}

fn read(dir: &std::path::Path, name: &str) -> String {
    std::fs::read_to_string(dir.join("exports").join(name))
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
}

#[tokio::test]
async fn test_collect_samples_from_ranking_page() {
    let server = MockServer::start().await;
    mount_wiki(&server).await;

    let fetcher = HttpFetcher::new(&walker_config(&server.uri()), &user_agent_config()).unwrap();
    let samples = collect_samples(&fetcher, &sample_config()).await;

    let kinds: Vec<SampleKind> = samples.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![SampleKind::Random, SampleKind::TopRanked, SampleKind::Category]
    );

    let top = &samples[1].records;
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].identifier, "Stoa");
    assert_eq!(top[0].popularity, Some(1234.0));
    assert_eq!(top[1].rank, Some(2));

    let categories = &samples[2].records;
    assert_eq!(categories.len(), 2);
    assert!(categories.iter().all(|r| r.category_id == Some(1)));
    assert_eq!(categories[0].identifier, "Greece");
}

#[tokio::test]
async fn test_missing_ranking_page_skips_ranked_samples() {
    let server = MockServer::start().await;

    let fetcher = HttpFetcher::new(&walker_config(&server.uri()), &user_agent_config()).unwrap();
    let samples = collect_samples(&fetcher, &sample_config()).await;

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].kind, SampleKind::Random);
    assert_eq!(samples[0].records.len(), 2);
}

#[tokio::test]
async fn test_full_run_writes_exports() {
    let server = MockServer::start().await;
    mount_wiki(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), sample_config(), dir.path());

    let summary = run_pipeline(&config, "test-hash")
        .await
        .expect("Run should complete");

    assert_eq!(summary.attempted(), 6);
    assert_eq!(summary.succeeded(), 5);
    assert_eq!(summary.requests, 15);

    assert_eq!(read(dir.path(), "random.csv"), "Text,Degrees\nStoa,2\nStoa,2\n");
    assert_eq!(
        read(dir.path(), "top100.csv"),
        "Rank,Text,Link,Popularity,Degrees\n1,Stoa,/wiki/Stoa,1234,2\n2,Stoicism,/wiki/Stoicism,56.5,1\n"
    );
    assert_eq!(
        read(dir.path(), "topcategories.csv"),
        "Table,Rank,Text,Link,Popularity,Degrees\n1,1,Greece,/wiki/Greece,900,1\n"
    );

    let conn = rusqlite::Connection::open(dir.path().join("walks.db")).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM top100", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);

    let md = std::fs::read_to_string(dir.path().join("summary.md")).unwrap();
    assert!(md.contains("- **Config Hash**: test-hash"));
    assert!(md.contains("## Most viewed articles by category"));
    assert!(md.contains("Countries"));
    assert!(md.contains("| dead-end | 1 |"));
}

#[tokio::test]
async fn test_concurrent_run_preserves_order() {
    let server = MockServer::start().await;
    mount_wiki(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&server.uri(), sample_config(), dir.path());
    config.walker.max_concurrent_walks = 3;

    let summary = run_pipeline(&config, "test-hash").await.unwrap();

    assert_eq!(summary.succeeded(), 5);
    assert_eq!(
        read(dir.path(), "top100.csv"),
        "Rank,Text,Link,Popularity,Degrees\n1,Stoa,/wiki/Stoa,1234,2\n2,Stoicism,/wiki/Stoicism,56.5,1\n"
    );
}
