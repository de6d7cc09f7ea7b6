//! Walks against a mock wiki

use super::{mount_article, user_agent_config, walker_config};
use philo_walk::walk::{DocumentFetcher, FetchError, HttpFetcher, TraversalEngine};
use philo_walk::OutcomeReason;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine(server: &MockServer) -> TraversalEngine<HttpFetcher> {
    let walker = walker_config(&server.uri());
    let fetcher = HttpFetcher::new(&walker, &user_agent_config()).expect("Failed to build fetcher");
    TraversalEngine::new(fetcher, &walker)
}

async fn mount_philosophy(server: &MockServer) {
    mount_article(
        server,
        "Philosophy",
        "Philosophy",
        r#"<p><b>Philosophy</b> is the study of <a href="/wiki/Knowledge">knowledge</a>.</p>"#,
    )
    .await;
}

#[tokio::test]
async fn test_walk_converges() {
    let server = MockServer::start().await;

    mount_article(
        &server,
        "Stoa",
        "Stoa",
        r#"<p>A <b>stoa</b> is a covered walkway associated with <a href="/wiki/Stoicism">Stoicism</a>.</p>"#,
    )
    .await;
    mount_article(
        &server,
        "Stoicism",
        "Stoicism",
        r#"<p><b>Stoicism</b> is a school of <a href="/wiki/Philosophy">philosophy</a>.</p>"#,
    )
    .await;
    mount_philosophy(&server).await;

    let outcome = engine(&server).walk("Stoa").await;

    assert_eq!(outcome.reason, OutcomeReason::Converged);
    assert_eq!(outcome.degrees, Some(2));
    assert!(outcome.reached_target);
    assert_eq!(outcome.path, vec!["Stoa", "Stoicism", "Philosophy"]);
    assert_eq!(outcome.start_title.as_deref(), Some("Stoa"));
}

#[tokio::test]
async fn test_start_is_target() {
    let server = MockServer::start().await;
    mount_philosophy(&server).await;

    let outcome = engine(&server).walk("Philosophy").await;

    assert_eq!(outcome.degrees, Some(0));
    assert_eq!(outcome.path, vec!["Philosophy"]);
}

#[tokio::test]
async fn test_skips_coordinates_parentheses_and_namespaces() {
    let server = MockServer::start().await;

    mount_article(
        &server,
        "Athens",
        "Athens",
        r#"<table class="infobox"><tr><td><a href="/wiki/Greece">Greece</a></td></tr></table>
<p><span>Coordinates: </span><a href="/wiki/Geographic_coordinate_system">37°N</a></p>
<p><b>Athens</b> (<a href="/wiki/Help:IPA">listen</a>; from <a href="/wiki/Ancient_Greek">Ancient Greek</a>) is the capital of <a href="/wiki/Greece">Greece</a>.</p>"#,
    )
    .await;
    mount_article(
        &server,
        "Greece",
        "Greece",
        r#"<p><a href="/wiki/File:Flag.svg">Flag</a> Greece is a country with a long <a href="/wiki/Philosophy">philosophical</a> tradition.</p>"#,
    )
    .await;
    mount_philosophy(&server).await;

    let outcome = engine(&server).walk("Athens").await;

    assert_eq!(outcome.degrees, Some(2));
    assert_eq!(outcome.path, vec!["Athens", "Greece", "Philosophy"]);
}

#[tokio::test]
async fn test_follows_list_when_paragraph_has_no_links() {
    let server = MockServer::start().await;

    mount_article(
        &server,
        "Mercury",
        "Mercury",
        r#"<p><b>Mercury</b> may refer to:</p>
<ul><li><a href="/wiki/Mercury_(planet)">Mercury (planet)</a>, the closest planet to the Sun</li></ul>"#,
    )
    .await;
    mount_article(
        &server,
        "Mercury_(planet)",
        "Mercury (planet)",
        r#"<p>Mercury is studied by <a href="/wiki/Philosophy">natural philosophers</a>.</p>"#,
    )
    .await;
    mount_philosophy(&server).await;

    let outcome = engine(&server).walk("Mercury").await;

    assert_eq!(outcome.degrees, Some(2));
    assert_eq!(outcome.path[1], "Mercury (planet)");
}

#[tokio::test]
async fn test_dead_end() {
    let server = MockServer::start().await;

    mount_article(
        &server,
        "Orphan",
        "Orphan",
        r#"<p>An article that links <a href="https://example.org/">nowhere</a> useful.</p>"#,
    )
    .await;

    let outcome = engine(&server).walk("Orphan").await;

    assert_eq!(outcome.reason, OutcomeReason::DeadEnd);
    assert_eq!(outcome.degrees, None);
    assert!(!outcome.reached_target);
    assert_eq!(outcome.steps, 0);
}

#[tokio::test]
async fn test_server_error_mid_walk() {
    let server = MockServer::start().await;

    mount_article(&server, "A", "A", r#"<p>See <a href="/wiki/B">B</a>.</p>"#).await;
    mount_article(&server, "B", "B", r#"<p>See <a href="/wiki/C">C</a>.</p>"#).await;
    mount_article(&server, "C", "C", r#"<p>See <a href="/wiki/D">D</a>.</p>"#).await;
    Mock::given(method("GET"))
        .and(path("/wiki/D"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = engine(&server).walk("A").await;

    assert_eq!(outcome.reason, OutcomeReason::FetchError);
    assert_eq!(outcome.degrees, None);
    assert_eq!(outcome.steps, 3);
    assert_eq!(outcome.path, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_random_article_follows_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Special:Random"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/wiki/Stoicism", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    mount_article(
        &server,
        "Stoicism",
        "Stoicism",
        r#"<p><b>Stoicism</b> is a school of <a href="/wiki/Philosophy">philosophy</a>.</p>"#,
    )
    .await;
    mount_philosophy(&server).await;

    let outcome = engine(&server).walk("Special:Random").await;

    assert_eq!(outcome.degrees, Some(1));
    assert_eq!(outcome.start_article, "Special:Random");
    assert_eq!(outcome.display_title(), "Stoicism");
}

#[tokio::test]
async fn test_fetcher_rejects_non_html() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let walker = walker_config(&server.uri());
    let fetcher = HttpFetcher::new(&walker, &user_agent_config()).unwrap();
    let result = fetcher.fetch("Data").await;

    assert!(matches!(result, Err(FetchError::ContentMismatch { .. })));
    assert_eq!(fetcher.request_count().await, 1);
}

#[tokio::test]
async fn test_fetcher_reports_missing_body_container() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Bare"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>Bare - Wikipedia</title></head><body><p>x</p></body></html>",
            "text/html",
        ))
        .mount(&server)
        .await;

    let walker = walker_config(&server.uri());
    let fetcher = HttpFetcher::new(&walker, &user_agent_config()).unwrap();
    let result = fetcher.fetch("Bare").await;

    assert!(matches!(result, Err(FetchError::Parse { .. })));

    let outcome = TraversalEngine::new(fetcher, &walker).walk("Bare").await;
    assert_eq!(outcome.reason, OutcomeReason::FetchError);
}

#[tokio::test]
async fn test_not_found_start() {
    let server = MockServer::start().await;

    let outcome = engine(&server).walk("Does_not_exist").await;

    assert_eq!(outcome.reason, OutcomeReason::FetchError);
    assert_eq!(outcome.steps, 0);
    assert!(outcome.path.is_empty());
    assert_eq!(outcome.display_title(), "Does_not_exist");
}
