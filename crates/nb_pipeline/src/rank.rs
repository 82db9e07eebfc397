use nb_core::AnalyzedArticle;

/// Sort by score descending and cap the digest size. `sort_by` is
/// stable, so tied scores keep their emission order.
pub fn rank(mut articles: Vec<AnalyzedArticle>, max: usize) -> Vec<AnalyzedArticle> {
    articles.sort_by(|a, b| b.score.cmp(&a.score));
    articles.truncate(max);
    articles
}
