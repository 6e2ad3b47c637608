//! Collection steps: pull raw items from an `ActivitySource` and normalize them.

use crate::normalize::Normalizer;
use crate::progress::ProgressScope;
use crate::record::{ActivityKind, ActivityRecord};
use crate::source::{ActivitySource, SourceItem};
use anyhow::{Context, Result};

/// The user's submissions followed by their comments.
pub fn collect_user_activity(
    source: &mut dyn ActivitySource,
    normalizer: &Normalizer,
    progress: &ProgressScope,
) -> Result<Vec<ActivityRecord>> {
    let submissions = source.submissions().context("fetch submissions")?;
    let comments = source.comments().context("fetch comments")?;

    let mut activity = Vec::with_capacity(submissions.len() + comments.len());
    for s in &submissions {
        activity.push(normalizer.submission(s, ActivityKind::Submission)?);
        progress.inc_items(1);
    }
    for c in &comments {
        activity.push(normalizer.comment(c)?);
        progress.inc_items(1);
    }
    tracing::info!(submissions = submissions.len(), comments = comments.len(), "collected user activity");
    Ok(activity)
}

/// Upvoted submissions. Upvoted comments and other things are skipped.
pub fn collect_upvoted_posts(
    source: &mut dyn ActivitySource,
    normalizer: &Normalizer,
    progress: &ProgressScope,
) -> Result<Vec<ActivityRecord>> {
    let items = source.upvoted().context("fetch upvoted")?;

    let mut upvoted = Vec::with_capacity(items.len());
    let mut skipped = 0usize;
    for item in &items {
        match item {
            SourceItem::Submission(s) => {
                upvoted.push(normalizer.submission(s, ActivityKind::UpvotedPost)?);
                progress.inc_items(1);
            }
            SourceItem::Comment(_) | SourceItem::Other(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "skipped upvoted items that are not submissions");
    }
    tracing::info!(upvoted = upvoted.len(), "collected upvoted posts");
    Ok(upvoted)
}
