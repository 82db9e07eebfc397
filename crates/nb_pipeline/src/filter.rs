use std::collections::HashSet;

use chrono::{DateTime, Utc};

use nb_core::Article;

/// Keep articles published strictly after `cutoff`, then drop repeat
/// links. First occurrence wins, so feed-iteration order decides which
/// copy of a cross-posted story survives. Never errors.
pub fn window_and_dedup(articles: Vec<Article>, cutoff: DateTime<Utc>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| a.published_at > cutoff)
        .filter(|a| seen.insert(a.link.clone()))
        .collect()
}

/// True when any keyword appears in the article's title or content.
/// Plain case-insensitive substring match: biased toward recall, since a
/// false positive only costs a little judge budget.
pub fn matches_keywords(keywords: &[String], article: &Article) -> bool {
    let haystack = format!("{} {}", article.title, article.content).to_lowercase();
    keywords.iter().any(|k| haystack.contains(&k.to_lowercase()))
}

/// Apply the keyword pre-filter; an empty keyword set disables it.
pub fn keyword_filter(keywords: &[String], articles: Vec<Article>) -> Vec<Article> {
    if keywords.is_empty() {
        return articles;
    }
    articles
        .into_iter()
        .filter(|a| matches_keywords(keywords, a))
        .collect()
}
