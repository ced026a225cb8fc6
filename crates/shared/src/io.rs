use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// File name for a run date, e.g. `2026-02-10.md`
pub fn digest_filename(date: NaiveDate) -> String {
    format!("{}.md", date.format("%Y-%m-%d"))
}

/// Save the rendered digest into `dir`, creating it if needed
pub fn save_digest(dir: &Path, date: NaiveDate, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create digest directory: {}", dir.display()))?;

    let filepath = dir.join(digest_filename(date));

    fs::write(&filepath, content)
        .with_context(|| format!("Failed to write digest file: {}", filepath.display()))?;

    Ok(filepath)
}
