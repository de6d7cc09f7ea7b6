//! HTML parser for article pages
//!
//! This module turns a rendered article page into a `Document`:
//! - The title comes from the `<title>` tag, minus the site suffix
//! - The body is the `div.mw-parser-output` container
//! - Each direct element child of the container becomes one `ContentBlock`
//! - The `<a href>` descendants of a block become its links, in document order

use crate::walk::document::{BlockKind, ContentBlock, Document, Link};
use scraper::{ElementRef, Html, Selector};

/// CSS selector for the article body container
pub const BODY_CONTAINER: &str = "div.mw-parser-output";

/// Parses an article page into a `Document`
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `title_suffix` - Suffix the site appends to every title (e.g. `" - Wikipedia"`)
///
/// # Returns
///
/// * `Ok(Document)` - Successfully parsed page
/// * `Err(String)` - The page has no title or no body container
///
/// # Example
///
/// ```
/// use philo_walk::walk::parse_document;
///
/// let html = r#"<html><head><title>Canada - Wikipedia</title></head><body>
///     <div class="mw-parser-output"><p>A <a href="/wiki/Country">country</a>.</p></div>
/// </body></html>"#;
/// let doc = parse_document(html, " - Wikipedia").unwrap();
/// assert_eq!(doc.title, "Canada");
/// assert_eq!(doc.blocks[0].links[0].href, "/wiki/Country");
/// ```
pub fn parse_document(html: &str, title_suffix: &str) -> Result<Document, String> {
    let document = Html::parse_document(html);

    let title = extract_title(&document, title_suffix).ok_or("page has no <title>")?;

    let container_selector = selector(BODY_CONTAINER)?;
    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| format!("page '{}' has no {} container", title, BODY_CONTAINER))?;

    let link_selector = selector("a[href]")?;
    let blocks = container
        .children()
        .filter_map(ElementRef::wrap)
        .map(|element| extract_block(element, &link_selector))
        .collect();

    Ok(Document { title, blocks })
}

/// Extracts the page title, stripping the site suffix
pub fn extract_title(document: &Html, title_suffix: &str) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .map(|title| strip_title_suffix(title.trim(), title_suffix).to_string())
        .filter(|s| !s.is_empty())
}

/// Removes the site suffix from a page title, if present
pub fn strip_title_suffix<'a>(title: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return title;
    }
    title.strip_suffix(suffix).unwrap_or(title).trim_end()
}

/// Builds one content block from a direct child of the body container
fn extract_block(element: ElementRef<'_>, link_selector: &Selector) -> ContentBlock {
    let kind = BlockKind::from_tag(element.value().name());
    let text = element.text().collect::<String>();
    let raw = element.html();

    let mut links = Vec::new();
    let mut cursor = 0;

    for anchor in element.select(link_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let source = anchor.html();
        let position = raw
            .get(cursor..)
            .and_then(|rest| rest.find(&source))
            .map(|offset| cursor + offset)
            .unwrap_or(cursor);
        cursor = (position + source.len()).min(raw.len());

        links.push(Link {
            href: href.to_string(),
            text: anchor.text().collect::<String>(),
            source,
            position,
        });
    }

    ContentBlock {
        kind,
        text,
        raw,
        links,
    }
}

fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("invalid selector '{}': {:?}", css, e))
}
