use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::config::Rubric;
use crate::models::{ArticleRecord, ScoredArticle};

const EXACT_TOPIC_POINTS: u32 = 10;
const LOOSE_TOPIC_POINTS: u32 = 7;
const AUTHORITATIVE_POINTS: u32 = 5;
const FRESH_POINTS: u32 = 5;
const RECENT_POINTS: u32 = 3;
const LONG_CONTENT_POINTS: u32 = 3;
const KEYWORD_POINTS: u32 = 2;

const LONG_CONTENT_CHARS: usize = 500;

/// Scores articles against a rubric at a fixed point in time
pub struct Scorer<'a> {
    rubric: &'a Rubric,
    topic: String,
    topic_words: Vec<String>,
    now: DateTime<Utc>,
}

impl<'a> Scorer<'a> {
    pub fn new(rubric: &'a Rubric, now: DateTime<Utc>) -> Self {
        let topic = rubric.topic.to_lowercase();
        let topic_words = topic.split_whitespace().map(str::to_string).collect();

        Self {
            rubric,
            topic,
            topic_words,
            now,
        }
    }

    pub fn score(&self, article: &ArticleRecord) -> u32 {
        let text = article.search_text();

        let mut score = self.topic_points(&text);

        let domain = extract_domain(&article.url);
        if self
            .rubric
            .authoritative_sources
            .iter()
            .any(|source| domain.contains(&source.to_lowercase()))
        {
            score += AUTHORITATIVE_POINTS;
        }

        score += self.recency_points(article.published_at.as_deref());

        let content_len = article.content.as_deref().map_or(0, |c| c.chars().count());
        if content_len > LONG_CONTENT_CHARS {
            score += LONG_CONTENT_POINTS;
        }

        let keyword_hits = self
            .rubric
            .priority_keywords
            .iter()
            .filter(|keyword| text.contains(&keyword.to_lowercase()))
            .count() as u32;
        score += keyword_hits * KEYWORD_POINTS;

        score
    }

    pub fn score_all(&self, articles: Vec<ArticleRecord>) -> Vec<ScoredArticle> {
        articles
            .into_iter()
            .map(|article| {
                let score = self.score(&article);
                debug!(score, url = %article.url, "Scored article");
                ScoredArticle { article, score }
            })
            .collect()
    }

    fn topic_points(&self, text: &str) -> u32 {
        if self.topic.is_empty() {
            return 0;
        }
        if text.contains(&self.topic) {
            EXACT_TOPIC_POINTS
        } else if self.topic_words.iter().all(|word| text.contains(word.as_str())) {
            LOOSE_TOPIC_POINTS
        } else {
            0
        }
    }

    fn recency_points(&self, published_at: Option<&str>) -> u32 {
        let Some(published) = published_at.and_then(parse_timestamp) else {
            return 0;
        };

        let hours_ago = (self.now - published).num_seconds() as f64 / 3600.0;
        if hours_ago < 24.0 {
            FRESH_POINTS
        } else if hours_ago < 48.0 {
            RECENT_POINTS
        } else {
            0
        }
    }
}

/// Parse an ISO-8601 timestamp; values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Lower-cased host of a URL, or empty text when it doesn't parse.
pub fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-02-10T12:00:00Z".parse().unwrap()
    }

    fn article(title: &str, url: &str) -> ArticleRecord {
        ArticleRecord::new(title, url)
    }

    #[test]
    fn test_frontier_scenario_scores_23() {
        let rubric = Rubric::default();
        let scorer = Scorer::new(&rubric, now());
        let record = ArticleRecord {
            title: Some("OpenAI Frontier gets a new home".into()),
            url: "https://techcrunch.com/2026/02/10/frontier".into(),
            source: Some("TechCrunch".into()),
            published_at: Some((now() - Duration::hours(10)).to_rfc3339()),
            description: None,
            content: Some("a".repeat(600)),
        };
        assert_eq!(scorer.score(&record), 23);
    }

    #[test]
    fn test_keywords_add_two_per_distinct_keyword() {
        let rubric = Rubric::default();
        let scorer = Scorer::new(&rubric, now());
        let mut record = article("OpenAI Frontier", "");
        record.description = Some("Enterprise security, enterprise security, partnership".into());
        assert_eq!(scorer.score(&record), 10 + 3 * 2);
    }

    #[test]
    fn test_loose_topic_match_is_exclusive_with_exact() {
        let rubric = Rubric::default();
        let scorer = Scorer::new(&rubric, now());

        let loose = article("Frontier models from OpenAI", "");
        assert_eq!(scorer.score(&loose), 7);

        let both = article("OpenAI Frontier: the frontier of OpenAI", "");
        assert_eq!(scorer.score(&both), 10);

        let neither = article("OpenAI ships a model", "");
        assert_eq!(scorer.score(&neither), 0);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let rubric = Rubric::default();
        let scorer = Scorer::new(&rubric, now());
        assert_eq!(scorer.score(&article("OPENAI FRONTIER", "")), 10);
    }

    #[test]
    fn test_authoritative_domain_is_substring_match_on_host() {
        let rubric = Rubric::default();
        let scorer = Scorer::new(&rubric, now());
        assert_eq!(scorer.score(&article("x", "https://www.Reuters.com/tech/1")), 5);
        assert_eq!(scorer.score(&article("x", "https://example.com/reuters.com")), 0);
        assert_eq!(scorer.score(&article("x", "not a url")), 0);
    }

    #[test]
    fn test_recency_buckets() {
        let rubric = Rubric::default();
        let scorer = Scorer::new(&rubric, now());
        let aged = |hours: i64| ArticleRecord {
            published_at: Some((now() - Duration::hours(hours)).to_rfc3339()),
            ..Default::default()
        };
        assert_eq!(scorer.score(&aged(1)), 5);
        assert_eq!(scorer.score(&aged(30)), 3);
        assert_eq!(scorer.score(&aged(48)), 0);
        assert_eq!(scorer.score(&aged(100)), 0);
    }

    #[test]
    fn test_unparseable_timestamps_score_nothing() {
        let rubric = Rubric::default();
        let scorer = Scorer::new(&rubric, now());
        for raw in ["", "yesterday", "2026-13-45T00:00:00Z"] {
            let record = ArticleRecord {
                published_at: Some(raw.into()),
                ..Default::default()
            };
            assert_eq!(scorer.score(&record), 0, "{raw}");
        }
    }

    #[test]
    fn test_parses_naive_and_date_only_timestamps() {
        assert_eq!(
            parse_timestamp("2026-02-10T08:30:00"),
            Some("2026-02-10T08:30:00Z".parse().unwrap())
        );
        assert_eq!(
            parse_timestamp("2026-02-10T08:30:00.123456"),
            Some("2026-02-10T08:30:00.123456Z".parse().unwrap())
        );
        assert_eq!(
            parse_timestamp("2026-02-10"),
            Some("2026-02-10T00:00:00Z".parse().unwrap())
        );
        assert_eq!(
            parse_timestamp("2026-02-10T08:30:00+02:00"),
            Some("2026-02-10T06:30:00Z".parse().unwrap())
        );
    }

    #[test]
    fn test_content_length_counts_characters() {
        let rubric = Rubric::default();
        let scorer = Scorer::new(&rubric, now());
        let long = ArticleRecord {
            content: Some("é".repeat(501)),
            ..Default::default()
        };
        let short = ArticleRecord {
            content: Some("é".repeat(300)),
            ..Default::default()
        };
        assert_eq!(scorer.score(&long), 3);
        assert_eq!(scorer.score(&short), 0);
    }

    #[test]
    fn test_score_all_keeps_input_order() {
        let rubric = Rubric::default();
        let scorer = Scorer::new(&rubric, now());
        let scored = scorer.score_all(vec![article("nothing", "a"), article("OpenAI Frontier", "b")]);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].score, 0);
        assert_eq!(scored[1].score, 10);
        assert_eq!(scored[1].article.url, "b");
    }
}
