//! Ranking table scraping
//!
//! The ranking page lists the most viewed articles in `table.wikitable` tables.
//! A row counts when its first cell is an integer rank; the second cell's first
//! link names the article and the third cell holds its page views.

use crate::walk::Document;
use scraper::{ElementRef, Html, Selector};

/// One ranked article
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub rank: u32,
    pub text: String,
    pub href: String,
    pub popularity: Option<f64>,
}

/// A ranking table and its position among the page's ranking tables
#[derive(Debug, Clone, PartialEq)]
pub struct RankingTable {
    pub index: usize,
    pub rows: Vec<RankingRow>,
}

/// Extracts every `table.wikitable` from the body of a ranking page
///
/// Tables are numbered in document order, starting at zero.
pub fn parse_ranking_tables(document: &Document) -> Vec<RankingTable> {
    let (Ok(table_selector), Ok(row_selector), Ok(link_selector)) = (
        Selector::parse("table.wikitable"),
        Selector::parse("tr"),
        Selector::parse("a[href]"),
    ) else {
        return Vec::new();
    };

    let mut tables = Vec::new();

    for block in &document.blocks {
        let fragment = Html::parse_fragment(&block.raw);

        for table in fragment.select(&table_selector) {
            let rows = table
                .select(&row_selector)
                .filter_map(|tr| parse_row(tr, &link_selector))
                .collect();

            tables.push(RankingTable {
                index: tables.len(),
                rows,
            });
        }
    }

    tables
}

/// Parses one table row; header rows and malformed rows yield None
fn parse_row(tr: ElementRef<'_>, link_selector: &Selector) -> Option<RankingRow> {
    let cells: Vec<ElementRef<'_>> = tr
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .collect();

    let rank = cell_text(cells.first()?).parse::<u32>().ok()?;

    let Some(link) = cells.get(1).and_then(|cell| cell.select(link_selector).next()) else {
        tracing::debug!("Ranking row {} has no article link", rank);
        return None;
    };
    let href = link.value().attr("href")?.to_string();
    let text = link.text().collect::<String>().trim().to_string();

    let popularity = cells.get(2).and_then(|cell| parse_popularity(&cell_text(cell)));

    Some(RankingRow {
        rank,
        text,
        href,
        popularity,
    })
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parses a page-view figure, ignoring thousands separators
pub fn parse_popularity(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, ',' | '\u{a0}' | ' '))
        .collect();
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::parse_document;

    fn ranking_page(tables: &[&str]) -> Document {
        let html = format!(
            r#"<html><head><title>Ranking</title></head><body>
            <div class="mw-parser-output"><p>Intro</p>{}</div></body></html>"#,
            tables.join("\n")
        );
        parse_document(&html, "").unwrap()
    }

    const TOP_TABLE: &str = r#"<table class="wikitable sortable">
        <tr><th>Rank</th><th>Article</th><th>Views (millions)</th></tr>
        <tr><td>1</td><td><a href="/wiki/Main_Page" title="Main Page">Main Page</a></td><td>19,452</td></tr>
        <tr><td>2</td><td><a href="/wiki/Facebook">Facebook</a></td><td>351.7</td></tr>
        <tr><td>3</td><td>No link here</td><td>10</td></tr>
        <tr><td>4</td><td><a href="/wiki/YouTube">YouTube</a></td><td>n/a</td></tr>
    </table>"#;

    #[test]
    fn test_parse_top_table() {
        let doc = ranking_page(&[TOP_TABLE]);
        let tables = parse_ranking_tables(&doc);

        assert_eq!(tables.len(), 1);
        let rows = &tables[0].rows;
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].text, "Main Page");
        assert_eq!(rows[0].href, "/wiki/Main_Page");
        assert_eq!(rows[0].popularity, Some(19452.0));

        assert_eq!(rows[1].popularity, Some(351.7));
        assert_eq!(rows[2].href, "/wiki/YouTube");
        assert_eq!(rows[2].popularity, None);
    }

    #[test]
    fn test_tables_numbered_in_order() {
        let second = r#"<div><table class="wikitable">
            <tr><td>1</td><td><a href="/wiki/Canada">Canada</a></td><td>50</td></tr>
        </table></div>"#;
        let not_ranking = r#"<table class="infobox"><tr><td>1</td></tr></table>"#;

        let doc = ranking_page(&[TOP_TABLE, not_ranking, second]);
        let tables = parse_ranking_tables(&doc);

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].index, 0);
        assert_eq!(tables[1].index, 1);
        assert_eq!(tables[1].rows[0].href, "/wiki/Canada");
    }

    #[test]
    fn test_parse_popularity() {
        assert_eq!(parse_popularity("1,234"), Some(1234.0));
        assert_eq!(parse_popularity("12.5"), Some(12.5));
        assert_eq!(parse_popularity("1\u{a0}234"), Some(1234.0));
        assert_eq!(parse_popularity(""), None);
        assert_eq!(parse_popularity("—"), None);
    }
}
