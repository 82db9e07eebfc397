use std::fmt::Write;

use nb_core::{Article, Rubric};

/// Per-article cap on content shipped to the judge, to bound prompt size.
const MAX_CONTENT_CHARS: usize = 1200;

/// Build the single prompt for one batch: the scoring rubric followed by
/// the batch's articles as title/URL/content triples.
pub fn build_prompt(rubric: &Rubric, min_score: u8, articles: &[Article]) -> String {
    let mut prompt = String::new();

    let _ = write!(
        prompt,
        "You are a relevance analyst for a daily briefing on {topic}.\n\
         Score each article below from 1 to 10 for how relevant and significant it is.\n",
        topic = rubric.topic
    );
    if !rubric.focus.is_empty() {
        let _ = write!(prompt, "Prioritize: {}.\n", rubric.focus.join(", "));
    }
    if !rubric.ignore.is_empty() {
        let _ = write!(prompt, "Ignore: {}.\n", rubric.ignore.join(", "));
    }
    let _ = write!(
        prompt,
        "Any article scoring below {min} must be marked as skipped.\n\n\
         Respond with ONLY a JSON array, one object per article in the same order:\n\
         {{\"score\": <1-10>, \"skip\": <true if below {min}>, \"title\": \"...\",\n\
         \"summary\": [\"up to 3 bullets, 15 words each\"],\n\
         \"whyMatters\": \"one sentence\",\n\
         \"tags\": [\"Regulatory\"|\"Market\"|\"Jobs\"|\"Technology\"|\"Risk\"],\n\
         \"url\": \"echo the article URL\",\n\
         \"opportunity\": \"only when there is a genuine actionable business angle, else omit\"}}\n\n\
         Articles:\n\n",
        min = min_score
    );

    for article in articles {
        let content: String = article.content.chars().take(MAX_CONTENT_CHARS).collect();
        let _ = write!(
            prompt,
            "Title: {}\nURL: {}\nContent: {}\n\n",
            article.title, article.link, content
        );
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(title: &str, link: &str, content: &str) -> Article {
        Article {
            title: title.to_string(),
            link: link.to_string(),
            published_at: Utc::now(),
            content: content.to_string(),
            source: "test".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_rubric_and_every_article() {
        let rubric = Rubric {
            topic: "hemp beverages".to_string(),
            focus: vec!["regulation".to_string(), "market moves".to_string()],
            ignore: vec!["recipes".to_string()],
        };
        let batch = vec![
            article("A", "http://x.com/a", "alpha"),
            article("B", "http://x.com/b", "beta"),
        ];
        let prompt = build_prompt(&rubric, 7, &batch);

        assert!(prompt.contains("hemp beverages"));
        assert!(prompt.contains("regulation, market moves"));
        assert!(prompt.contains("recipes"));
        assert!(prompt.contains("below 7"));
        assert!(prompt.contains("Title: A"));
        assert!(prompt.contains("URL: http://x.com/b"));
    }

    #[test]
    fn test_prompt_caps_article_content() {
        let long = "x".repeat(10_000);
        let prompt = build_prompt(
            &Rubric::default(),
            7,
            &[article("Long", "http://x.com/long", &long)],
        );
        assert!(prompt.len() < 4_000);
    }
}
