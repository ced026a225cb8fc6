use chrono::{DateTime, NaiveDate, Utc};

/// One article as handed over by the fetch collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: Option<String>,
    pub url: String,
    pub source: Option<String>,
    pub published_at: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

impl ArticleRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Lower-cased `title description content`, absent fields as empty text.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or(""),
            self.content.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredArticle {
    pub article: ArticleRecord,
    pub score: u32,
}

/// A scored article that survived selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub article: ArticleRecord,
    pub score: u32,
}

impl From<ScoredArticle> for Story {
    fn from(scored: ScoredArticle) -> Self {
        Self {
            article: scored.article,
            score: scored.score,
        }
    }
}

/// The "why you should care" / "what this means" pair attached to a story
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub why_care: String,
    pub what_means: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    pub rank: usize,
    pub story: Story,
    pub insight: Insight,
}

/// Static wording of the digest document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestTemplate {
    pub topic: String,
    pub title: String,
    pub about: String,
    pub subject_template: String,
}

impl Default for DigestTemplate {
    fn default() -> Self {
        Self {
            topic: "OpenAI Frontier".to_string(),
            title: "OpenAI Frontier Daily Digest".to_string(),
            about: "This automated digest tracks news and developments related to OpenAI Frontier,\n\
                    the enterprise AI agent platform launched in February 2026. Stories are selected based on relevance,\n\
                    source authority, and recency."
                .to_string(),
            subject_template: "{topic} Daily Digest - {date}".to_string(),
        }
    }
}

/// One run's finished document, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub template: DigestTemplate,
    pub date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<DigestEntry>,
}

impl Digest {
    pub fn new(
        template: DigestTemplate,
        date: NaiveDate,
        generated_at: DateTime<Utc>,
        entries: Vec<DigestEntry>,
    ) -> Self {
        Self {
            template,
            date,
            generated_at,
            entries,
        }
    }

    pub fn subject(&self) -> String {
        self.template
            .subject_template
            .replace("{topic}", &self.template.topic)
            .replace("{date}", &self.long_date())
    }

    /// e.g. "February 10, 2026"
    pub fn long_date(&self) -> String {
        self.date.format("%B %d, %Y").to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_treats_missing_fields_as_empty() {
        let article = ArticleRecord {
            title: Some("OpenAI Frontier".into()),
            content: Some("Enterprise Agents".into()),
            ..Default::default()
        };
        assert_eq!(article.search_text(), "openai frontier  enterprise agents");
    }

    #[test]
    fn test_subject_uses_long_date() {
        let digest = Digest::new(
            DigestTemplate::default(),
            NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            Utc::now(),
            Vec::new(),
        );
        assert_eq!(digest.subject(), "OpenAI Frontier Daily Digest - February 10, 2026");
    }

    #[test]
    fn test_subject_follows_template_topic() {
        let template = DigestTemplate {
            topic: "Agent Platforms".into(),
            ..DigestTemplate::default()
        };
        let digest = Digest::new(
            template,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            Utc::now(),
            Vec::new(),
        );
        assert_eq!(digest.subject(), "Agent Platforms Daily Digest - March 01, 2026");
    }
}
