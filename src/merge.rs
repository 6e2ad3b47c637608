//! The two persistence policies. They are kept as separate functions because
//! mixing them up loses data: overwrite never looks at history, append never
//! drops it.

use crate::record::{ActivityRecord, ActivityRow, ArticleRecord, UrlKeyed, ACTIVITY_COLUMNS, ARTICLE_COLUMNS};
use crate::store::{count_rows, read_rows, write_rows};
use ahash::AHashSet;
use anyhow::Result;
use std::path::Path;

/// Keep the first row seen for every `url`, preserving input order.
pub fn dedup_first_by_url<T: UrlKeyed>(rows: Vec<T>) -> Vec<T> {
    let mut seen: AHashSet<String> = AHashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert(row.url().to_string()))
        .collect()
}

/// Overwrite mode: write `activity + upvoted` to `path`, replacing whatever is
/// there. No dedup against prior runs. Returns rows written.
pub fn overwrite_save(activity: &[ActivityRecord], upvoted: &[ActivityRecord], path: &Path) -> Result<usize> {
    let combined: Vec<ActivityRow> = activity.iter().chain(upvoted).map(ActivityRecord::to_row).collect();
    let n = write_rows(path, &ACTIVITY_COLUMNS, &combined)?;
    tracing::info!("Saved {} items to {}", n, path.display());
    Ok(n)
}

/// Append mode: merge `articles` into the file at `path`, first occurrence per
/// `url` wins (stored rows come first). Returns the number of rows now stored.
///
/// With no new rows an existing file is left unparsed and untouched (the count
/// is of raw records); a missing file is created header-only.
pub fn append_merge_save(articles: &[ArticleRecord], path: &Path) -> Result<usize> {
    if articles.is_empty() {
        tracing::info!("No new articles found.");
        if path.exists() {
            return count_rows(path);
        }
        write_rows::<ArticleRecord>(path, &ARTICLE_COLUMNS, &[])?;
        return Ok(0);
    }

    let mut rows: Vec<ArticleRecord> = if path.exists() { read_rows(path)? } else { Vec::new() };
    let existing = rows.len();
    rows.extend_from_slice(articles);
    let merged = dedup_first_by_url(rows);

    let n = write_rows(path, &ARTICLE_COLUMNS, &merged)?;
    tracing::info!(
        existing,
        added = n - existing.min(n),
        "Saved {} articles to {}",
        n,
        path.display()
    );
    Ok(n)
}
