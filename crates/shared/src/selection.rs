use std::collections::HashSet;
use tracing::{info, warn};

use crate::config::Rubric;
use crate::models::{ScoredArticle, Story};

/// Rank, dedupe and bound the scored articles.
///
/// Articles are stably sorted by score (highest first), deduplicated by URL
/// and truncated to `max_stories`. Only articles with a positive score are
/// kept, unless that leaves fewer than `min_stories`; then the first
/// `min_stories` of the truncated list are returned, zero scores included.
///
/// An empty URL is never a duplicate key: every article without a URL is kept.
/// The result may be empty; callers decide whether that ends the run.
pub fn select(mut scored: Vec<ScoredArticle>, rubric: &Rubric) -> Vec<Story> {
    // sort_by is stable, ties keep their fetch order
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut unique: Vec<ScoredArticle> = Vec::with_capacity(scored.len());
    for item in scored {
        if item.article.url.is_empty() || seen_urls.insert(item.article.url.clone()) {
            unique.push(item);
        }
    }

    unique.truncate(rubric.max_stories);

    let meaningful = unique.iter().filter(|item| item.score > 0).count();
    if meaningful < rubric.min_stories {
        warn!(
            meaningful,
            min_stories = rubric.min_stories,
            "Too few relevant articles, filling up with the top of the list"
        );
        return unique
            .into_iter()
            .take(rubric.min_stories)
            .map(Story::from)
            .collect();
    }

    info!(selected = meaningful, "Selected top articles");
    unique
        .into_iter()
        .filter(|item| item.score > 0)
        .map(Story::from)
        .collect()
}
