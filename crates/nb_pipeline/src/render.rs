use std::fmt::Write;

use chrono::{DateTime, Utc};

use nb_core::{AnalyzedArticle, Tag};

/// Render the ranked list into the digest document (markdown).
///
/// Sectioning is inclusion-based: an article tagged both Regulatory and
/// Jobs shows up in both sections and again in the full list. Empty
/// sections are omitted entirely.
pub fn render_digest(articles: &[AnalyzedArticle], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "# News Brief — {}\n\n{} item(s) selected.\n",
        now.format("%Y-%m-%d"),
        articles.len()
    );

    render_section(&mut out, "Regulatory", articles, |a| {
        a.has_tag(Tag::Regulatory)
    });
    render_section(&mut out, "Market & Jobs", articles, |a| {
        a.has_tag(Tag::Market) || a.has_tag(Tag::Jobs)
    });

    let opportunities: Vec<&str> = articles
        .iter()
        .filter_map(|a| a.opportunity.as_deref())
        .collect();
    if !opportunities.is_empty() {
        out.push_str("\n## Opportunities\n\n");
        for opportunity in opportunities {
            let _ = writeln!(out, "- {}", opportunity);
        }
    }

    if !articles.is_empty() {
        out.push_str("\n## All stories\n");
        for article in articles {
            render_entry(&mut out, article);
        }
    }

    out
}

fn render_section(
    out: &mut String,
    heading: &str,
    articles: &[AnalyzedArticle],
    include: impl Fn(&AnalyzedArticle) -> bool,
) {
    let members: Vec<&AnalyzedArticle> = articles.iter().filter(|a| include(a)).collect();
    if members.is_empty() {
        return;
    }
    let _ = write!(out, "\n## {}\n\n", heading);
    for article in members {
        let _ = writeln!(out, "- [{}]({})", article.title, article.url);
    }
}

fn render_entry(out: &mut String, article: &AnalyzedArticle) {
    let _ = write!(out, "\n### {} ({}/10)\n\n", article.title, article.score);
    if !article.tags.is_empty() {
        let tags: Vec<&str> = article.tags.iter().map(|t| t.label()).collect();
        let _ = writeln!(out, "Tags: {}", tags.join(", "));
    }
    for bullet in &article.summary {
        let _ = writeln!(out, "- {}", bullet);
    }
    if !article.why_matters.is_empty() {
        let _ = writeln!(out, "\nWhy it matters: {}", article.why_matters);
    }
    if let Some(opportunity) = &article.opportunity {
        let _ = writeln!(out, "\n**Opportunity:** {}", opportunity);
    }
    let _ = writeln!(out, "\n[Source]({})", article.url);
}
