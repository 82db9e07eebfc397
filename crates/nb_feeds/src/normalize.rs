use chrono::{DateTime, Utc};
use scraper::Html;

use nb_core::{Article, RawItem};

/// Convert one raw feed item into a canonical Article.
///
/// Fallback rules: missing title becomes "Untitled"; missing link becomes
/// the empty string (later dedup will collapse those); missing timestamp
/// becomes the fetch time, so an undated item is always treated as fresh;
/// content falls back content -> snippet -> summary -> empty.
pub fn normalize(raw: RawItem, source: &str, fetched_at: DateTime<Utc>) -> Article {
    let title = raw
        .title
        .map(|t| strip_html(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    let link = raw.link.map(|l| canonical_link(&l)).unwrap_or_default();

    let content = raw
        .content
        .or(raw.snippet)
        .or(raw.summary)
        .map(|c| strip_html(&c))
        .unwrap_or_default();

    Article {
        title,
        link,
        published_at: raw.published_at.unwrap_or(fetched_at),
        content,
        source: source.to_string(),
    }
}

/// Feed bodies routinely carry markup and entities; reduce to plain text
/// with collapsed whitespace.
pub fn strip_html(text: &str) -> String {
    let fragment = Html::parse_fragment(text);
    let raw = fragment.root_element().text().collect::<String>();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical form of a link for dedup purposes: trimmed, fragment removed.
fn canonical_link(link: &str) -> String {
    let trimmed = link.trim();
    match url::Url::parse(trimmed) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => trimmed.to_string(),
    }
}
