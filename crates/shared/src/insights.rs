use crate::models::{Insight, Story};

/// A keyword bucket: the first bucket with any keyword in the text wins.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    pub keywords: &'static [&'static str],
    pub text: &'static str,
}

impl Bucket {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

pub const WHY_CARE_BUCKETS: &[Bucket] = &[
    Bucket {
        keywords: &["security", "breach", "vulnerability", "risk"],
        text: "Security implications for enterprise AI deployments may affect your OpenAI Frontier implementation strategy.",
    },
    Bucket {
        keywords: &["partnership", "integration", "customer"],
        text: "New partnerships and integrations could expand Frontier's capabilities and ecosystem.",
    },
    Bucket {
        keywords: &["feature", "update", "release", "launch"],
        text: "New features or updates may enhance your organization's AI agent capabilities.",
    },
    Bucket {
        keywords: &["compliance", "regulation", "gdpr", "privacy"],
        text: "Regulatory developments may impact how you deploy and govern AI agents.",
    },
];

pub const WHY_CARE_FALLBACK: &str =
    "This development may influence enterprise AI strategy and OpenAI Frontier adoption.";

pub const WHAT_MEANS_BUCKETS: &[Bucket] = &[
    Bucket {
        keywords: &["enterprise", "business", "customer"],
        text: "Enterprise adoption patterns are evolving, potentially validating or challenging your implementation approach.",
    },
    Bucket {
        keywords: &["competition", "competitor", "alternative"],
        text: "The competitive landscape is shifting, which may affect feature development and pricing.",
    },
    Bucket {
        keywords: &["technical", "capability", "performance"],
        text: "Technical capabilities are advancing, potentially enabling new use cases for your organization.",
    },
];

pub const WHAT_MEANS_FALLBACK: &str =
    "Monitor how this development aligns with your organization's OpenAI Frontier roadmap.";

fn first_match(buckets: &[Bucket], text: &str, fallback: &'static str) -> &'static str {
    buckets
        .iter()
        .find(|bucket| bucket.matches(text))
        .map_or(fallback, |bucket| bucket.text)
}

pub fn classify(story: &Story) -> Insight {
    let text = story.article.search_text();

    Insight {
        why_care: first_match(WHY_CARE_BUCKETS, &text, WHY_CARE_FALLBACK).to_string(),
        what_means: first_match(WHAT_MEANS_BUCKETS, &text, WHAT_MEANS_FALLBACK).to_string(),
    }
}
