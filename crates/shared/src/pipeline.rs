use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::{Config, Rubric};
use crate::digest::DigestRenderer;
use crate::error::{DigestError, Result};
use crate::insights::classify;
use crate::io::save_digest;
use crate::mailer::deliver;
use crate::models::{ArticleRecord, Digest, DigestEntry, DigestTemplate};
use crate::scoring::Scorer;
use crate::selection::select;

/// Score, select and classify one run's articles into a digest.
///
/// `now` is used both for recency scoring and as the digest's generation
/// timestamp, so a frozen clock gives a fully reproducible result.
pub fn build_digest(
    articles: Vec<ArticleRecord>,
    rubric: &Rubric,
    template: &DigestTemplate,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<Digest> {
    if articles.is_empty() {
        return Err(DigestError::NoCandidates);
    }
    let found = articles.len();

    info!(count = found, "Analyzing and ranking articles");
    let scored = Scorer::new(rubric, now).score_all(articles);

    let stories = select(scored, rubric);
    if stories.is_empty() {
        return Err(DigestError::NoSelection { found });
    }

    let entries = stories
        .into_iter()
        .enumerate()
        .map(|(i, story)| {
            let insight = classify(&story);
            DigestEntry {
                rank: i + 1,
                story,
                insight,
            }
        })
        .collect::<Vec<_>>();

    info!(stories = entries.len(), "Generating digest");
    Ok(Digest::new(template.clone(), date, now, entries))
}

/// Turn fetched articles into a saved and (optionally) mailed digest.
///
/// Only fatal errors end the run early. A failed save still lets delivery
/// go ahead, and a failed delivery is reported in the summary.
pub async fn run(
    articles: Vec<ArticleRecord>,
    config: &Config,
    digest_dir: &Path,
    send_email: bool,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let found = articles.len();
    let date = now.date_naive();

    let digest = build_digest(
        articles,
        &config.rubric,
        &DigestTemplate::default(),
        date,
        now,
    )?;

    let markdown = DigestRenderer::markdown(&digest);

    let saved_path = match save_digest(digest_dir, date, &markdown) {
        Ok(path) => {
            info!(path = %path.display(), "Digest saved");
            Some(path)
        }
        Err(e) => {
            error!(error = %e, "Failed to save digest");
            None
        }
    };

    let delivered = if send_email {
        let html = DigestRenderer::html(&digest);
        match deliver(config, digest.subject(), markdown, html).await {
            Ok(()) => true,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(error = %e, "Email not sent");
                false
            }
        }
    } else {
        info!("Skipping e-mail delivery");
        false
    };

    Ok(RunSummary {
        found,
        selected: digest.len(),
        saved_path,
        delivered,
    })
}

/// What one run did, printed at the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub selected: usize,
    pub saved_path: Option<PathBuf>,
    pub delivered: bool,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stories found: {}", self.found)?;
        writeln!(f, "Stories selected: {}", self.selected)?;
        writeln!(f, "Digest saved: {}", yes_no(self.saved_path.is_some()))?;
        write!(f, "Email sent: {}", yes_no(self.delivered))
    }
}
