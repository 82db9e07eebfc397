use serde::Deserialize;

use nb_core::{AnalyzedArticle, Error, Result, Tag};

/// One record from the judge, as loosely as it may arrive. Everything
/// defaults so a sloppy verdict still parses; strictness is applied when
/// converting into an AnalyzedArticle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: Vec<String>,
    #[serde(default)]
    pub why_matters: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub opportunity: Option<String>,
}

impl Verdict {
    /// Convert into the digest record. Unknown tag strings are dropped
    /// rather than failing the record; the score is clamped to 1-10.
    pub fn into_article(self) -> AnalyzedArticle {
        AnalyzedArticle {
            score: self.score.clamp(1, 10) as u8,
            title: self.title,
            summary: self.summary,
            why_matters: self.why_matters,
            tags: self.tags.iter().filter_map(|t| Tag::parse(t)).collect(),
            url: self.url,
            opportunity: self.opportunity.filter(|o| !o.trim().is_empty()),
        }
    }
}

/// Parse the judge's response as untrusted text: locate the first
/// well-formed JSON array anywhere in it and validate the records.
pub fn parse_verdicts(text: &str) -> Result<Vec<Verdict>> {
    for (start, _) in text.char_indices().filter(|&(_, c)| c == '[') {
        let Some(end) = matching_bracket(&text[start..]) else {
            continue;
        };
        let candidate = &text[start..start + end];
        if let Ok(verdicts) = serde_json::from_str::<Vec<Verdict>>(candidate) {
            return Ok(verdicts);
        }
    }
    Err(Error::JudgeParse(format!(
        "no JSON array found in judge response ({} chars)",
        text.len()
    )))
}

/// Byte offset one past the bracket matching the `[` at the start of
/// `text`, scanning with string and escape awareness.
fn matching_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_clean_array() {
        let verdicts = parse_verdicts(
            r#"[{"score": 8, "title": "A", "summary": ["one"], "whyMatters": "w", "tags": ["Market"], "url": "http://a.com"}]"#,
        )
        .unwrap();
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].score, 8);
        assert!(!verdicts[0].skip);
    }

    #[test]
    fn test_parses_array_embedded_in_prose() {
        let response = r#"Sure! Here are the scored articles you asked for:

```json
[{"score": 9, "skip": false, "title": "Big [important] news", "url": "http://a.com"},
 {"score": 3, "skip": true}]
```

Let me know if you need anything else."#;
        let verdicts = parse_verdicts(response).unwrap();
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].title, "Big [important] news");
        assert!(verdicts[1].skip);
    }

    #[test]
    fn test_skips_non_verdict_arrays_in_prose() {
        let response = r#"I looked at sources [1] and then produced:
[{"score": 7, "title": "Real", "url": "http://a.com"}]"#;
        let verdicts = parse_verdicts(response).unwrap();
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].title, "Real");
    }

    #[test]
    fn test_malformed_response_is_a_typed_error() {
        let result = parse_verdicts("no structured data here at all");
        assert!(matches!(result, Err(Error::JudgeParse(_))));

        let result = parse_verdicts(r#"[{"score": "#);
        assert!(matches!(result, Err(Error::JudgeParse(_))));
    }

    #[test]
    fn test_into_article_clamps_and_filters() {
        let verdict = Verdict {
            score: 14,
            skip: false,
            title: "T".to_string(),
            summary: vec!["b".to_string()],
            why_matters: "w".to_string(),
            tags: vec![
                "Regulatory".to_string(),
                "Sports".to_string(),
                "market".to_string(),
            ],
            url: "http://a.com".to_string(),
            opportunity: Some("   ".to_string()),
        };
        let article = verdict.into_article();
        assert_eq!(article.score, 10);
        assert_eq!(article.tags, vec![Tag::Regulatory, Tag::Market]);
        assert!(article.opportunity.is_none());
    }
}
