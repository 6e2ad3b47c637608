//! Normalized row types: the combined activity row and the incremental article row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column order of the combined activity/upvoted file.
pub const ACTIVITY_COLUMNS: [&str; 10] = [
    "id", "type", "subreddit", "title", "body", "author", "url", "published", "score", "num_comments",
];

/// Column order of the incremental article file.
pub const ARTICLE_COLUMNS: [&str; 4] = ["title", "author", "published", "url"];

/// Rendering of an absent author (deleted or suspended account).
pub const MISSING_AUTHOR: &str = "None";

/// Item kind toggle (submission, comment, upvoted post).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Submission,
    Comment,
    UpvotedPost,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Submission => "submission",
            ActivityKind::Comment => "comment",
            ActivityKind::UpvotedPost => "upvoted_post",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submission" => Ok(Self::Submission),
            "comment" => Ok(Self::Comment),
            "upvoted_post" => Ok(Self::UpvotedPost),
            other => Err(format!("unknown activity kind: {other:?}")),
        }
    }
}

/// Kind-specific fields. Comments carry neither a title nor a comment count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordDetails {
    Submission { title: String, num_comments: i64 },
    Comment,
    UpvotedPost { title: String, num_comments: i64 },
}

impl RecordDetails {
    pub fn kind(&self) -> ActivityKind {
        match self {
            RecordDetails::Submission { .. } => ActivityKind::Submission,
            RecordDetails::Comment => ActivityKind::Comment,
            RecordDetails::UpvotedPost { .. } => ActivityKind::UpvotedPost,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            RecordDetails::Submission { title, .. } | RecordDetails::UpvotedPost { title, .. } => title,
            RecordDetails::Comment => "",
        }
    }

    pub fn num_comments(&self) -> Option<i64> {
        match self {
            RecordDetails::Submission { num_comments, .. } | RecordDetails::UpvotedPost { num_comments, .. } => {
                Some(*num_comments)
            }
            RecordDetails::Comment => None,
        }
    }
}

/// One unit of user activity or one upvoted post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRecord {
    pub id: String,
    pub subreddit: String,
    pub body: String,
    pub author: String,
    pub url: String,
    pub published: String,
    pub score: i64,
    pub details: RecordDetails,
}

impl ActivityRecord {
    pub fn kind(&self) -> ActivityKind {
        self.details.kind()
    }
    pub fn title(&self) -> &str {
        self.details.title()
    }
    pub fn num_comments(&self) -> Option<i64> {
        self.details.num_comments()
    }

    /// Flatten into the on-disk row shape.
    pub fn to_row(&self) -> ActivityRow {
        ActivityRow {
            id: self.id.clone(),
            kind: self.kind(),
            subreddit: self.subreddit.clone(),
            title: self.title().to_string(),
            body: self.body.clone(),
            author: self.author.clone(),
            url: self.url.clone(),
            published: self.published.clone(),
            score: self.score,
            num_comments: self.num_comments(),
        }
    }
}

/// Flat CSV row for the combined file. Field order is the column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRow {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub subreddit: String,
    pub title: String,
    pub body: String,
    pub author: String,
    pub url: String,
    pub published: String,
    pub score: i64,
    pub num_comments: Option<i64>,
}

impl TryFrom<ActivityRow> for ActivityRecord {
    type Error = anyhow::Error;

    /// Rebuild the tagged record, rejecting rows whose optional fields contradict the kind.
    fn try_from(row: ActivityRow) -> anyhow::Result<Self> {
        let details = match (row.kind, row.num_comments) {
            (ActivityKind::Comment, None) if row.title.is_empty() => RecordDetails::Comment,
            (ActivityKind::Comment, _) => {
                anyhow::bail!("comment row {} carries a title or comment count", row.id)
            }
            (ActivityKind::Submission, Some(n)) => RecordDetails::Submission { title: row.title, num_comments: n },
            (ActivityKind::UpvotedPost, Some(n)) => RecordDetails::UpvotedPost { title: row.title, num_comments: n },
            (kind, None) => anyhow::bail!("{kind} row {} is missing num_comments", row.id),
        };
        Ok(ActivityRecord {
            id: row.id,
            subreddit: row.subreddit,
            body: row.body,
            author: row.author,
            url: row.url,
            published: row.published,
            score: row.score,
            details,
        })
    }
}

/// Row of the incremental article file. Identity key is `url`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub author: String,
    pub published: String,
    pub url: String,
}

impl From<&ActivityRecord> for ArticleRecord {
    fn from(r: &ActivityRecord) -> Self {
        Self {
            title: r.title().to_string(),
            author: r.author.clone(),
            published: r.published.clone(),
            url: r.url.clone(),
        }
    }
}

/// Anything with a dedup identity key.
pub trait UrlKeyed {
    fn url(&self) -> &str;
}

impl UrlKeyed for ActivityRow {
    fn url(&self) -> &str {
        &self.url
    }
}

impl UrlKeyed for ArticleRecord {
    fn url(&self) -> &str {
        &self.url
    }
}
