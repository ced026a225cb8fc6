use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SEARCH_QUERIES: &[&str] = &[
    "OpenAI Frontier news",
    "OpenAI Frontier enterprise",
    "OpenAI Frontier security",
    "OpenAI Frontier updates",
    "OpenAI Frontier partnership",
];

pub const DEFAULT_AUTHORITATIVE_SOURCES: &[&str] = &[
    "openai.com",
    "techcrunch.com",
    "theverge.com",
    "arstechnica.com",
    "wired.com",
    "forbes.com",
    "reuters.com",
    "bloomberg.com",
    "venturebeat.com",
    "zdnet.com",
    "microsoft.com",
    "cnbc.com",
    "fortune.com",
];

pub const DEFAULT_PRIORITY_KEYWORDS: &[&str] =
    &["enterprise", "security", "partnership", "customer", "integration"];

/// Static scoring and selection rules for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rubric {
    pub topic: String,
    pub authoritative_sources: Vec<String>,
    pub priority_keywords: Vec<String>,
    pub min_stories: usize,
    pub max_stories: usize,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            topic: "OpenAI Frontier".to_string(),
            authoritative_sources: to_strings(DEFAULT_AUTHORITATIVE_SOURCES),
            priority_keywords: to_strings(DEFAULT_PRIORITY_KEYWORDS),
            min_stories: 3,
            max_stories: 7,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub newsapi_key: Option<String>,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_base_url: String,
    pub recipient_email: Option<String>,
    pub sender_email: String,
    pub sender_name: String,
    pub digest_dir: PathBuf,
    pub search_queries: Vec<String>,
    pub rubric: Rubric,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut rubric = Rubric::default();
        if let Some(min) = get("DIGEST_MIN_STORIES") {
            rubric.min_stories = min
                .trim()
                .parse()
                .with_context(|| format!("DIGEST_MIN_STORIES is not a number: {}", min))?;
        }
        if let Some(max) = get("DIGEST_MAX_STORIES") {
            rubric.max_stories = max
                .trim()
                .parse()
                .with_context(|| format!("DIGEST_MAX_STORIES is not a number: {}", max))?;
        }

        if rubric.max_stories == 0 {
            anyhow::bail!("DIGEST_MAX_STORIES must be at least 1");
        }
        if rubric.min_stories > rubric.max_stories {
            anyhow::bail!(
                "DIGEST_MIN_STORIES ({}) must not exceed DIGEST_MAX_STORIES ({})",
                rubric.min_stories,
                rubric.max_stories
            );
        }

        Ok(Self {
            newsapi_key: get("NEWSAPI_KEY"),
            sendgrid_api_key: get("SENDGRID_API_KEY"),
            sendgrid_base_url: get("SENDGRID_BASE_URL")
                .unwrap_or_else(|| "https://api.sendgrid.com".to_string()),
            recipient_email: get("RECIPIENT_EMAIL"),
            sender_email: get("SENDER_EMAIL")
                .unwrap_or_else(|| "digest@openai-frontier.com".to_string()),
            sender_name: "OpenAI Frontier Digest".to_string(),
            digest_dir: PathBuf::from(
                get("DIGEST_FOLDER").unwrap_or_else(|| "daily-digests".to_string()),
            ),
            search_queries: to_strings(DEFAULT_SEARCH_QUERIES),
            rubric,
        })
    }

    fn try_load_dotenv() {
        // Try locations in order of preference:

        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/frontier-digest/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("frontier-digest").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }

        // If none found, the variables may be set system-wide
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
