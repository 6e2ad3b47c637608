#![allow(dead_code)]

use anyhow::Result;
use reddit_activity::{ActivitySource, ArticleRecord, ChartSink, RawComment, RawSubmission, SourceItem};
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory `ActivitySource` returning fixed items.
#[derive(Clone, Default)]
pub struct FakeSource {
    pub submissions: Vec<RawSubmission>,
    pub comments: Vec<RawComment>,
    pub upvoted: Vec<SourceItem>,
}

impl ActivitySource for FakeSource {
    fn submissions(&mut self) -> Result<Vec<RawSubmission>> {
        Ok(self.submissions.clone())
    }
    fn comments(&mut self) -> Result<Vec<RawComment>> {
        Ok(self.comments.clone())
    }
    fn upvoted(&mut self) -> Result<Vec<SourceItem>> {
        Ok(self.upvoted.clone())
    }
}

/// Source whose every call fails, to check errors propagate.
pub struct FailingSource;

impl ActivitySource for FailingSource {
    fn submissions(&mut self) -> Result<Vec<RawSubmission>> {
        anyhow::bail!("401 Unauthorized")
    }
    fn comments(&mut self) -> Result<Vec<RawComment>> {
        anyhow::bail!("401 Unauthorized")
    }
    fn upvoted(&mut self) -> Result<Vec<SourceItem>> {
        anyhow::bail!("401 Unauthorized")
    }
}

/// `ChartSink` that remembers every chart it was given.
#[derive(Default)]
pub struct RecordingChart {
    pub charts: Vec<(String, Vec<(String, u64)>)>,
}

impl ChartSink for RecordingChart {
    fn bar_chart(&mut self, title: &str, _y_label: &str, bars: &[(String, u64)]) -> Result<()> {
        self.charts.push((title.to_string(), bars.to_vec()));
        Ok(())
    }
}

// 2024-01-15T12:00:00Z and 2024-02-20T08:30:00Z
pub const JAN_15_2024: f64 = 1_705_320_000.0;
pub const FEB_20_2024: f64 = 1_708_417_800.0;

pub fn submission(id: &str, author: Option<&str>, created_utc: f64) -> RawSubmission {
    RawSubmission {
        id: id.to_string(),
        subreddit: "rust".to_string(),
        title: format!("Post {id}"),
        selftext: Some(format!("body of {id}")),
        author: author.map(str::to_string),
        url: format!("https://example.com/{id}"),
        created_utc,
        score: 10,
        num_comments: 4,
    }
}

pub fn comment(id: &str, author: Option<&str>, created_utc: f64) -> RawComment {
    RawComment {
        id: id.to_string(),
        subreddit: "rust".to_string(),
        body: format!("comment {id}"),
        author: author.map(str::to_string),
        permalink: format!("/r/rust/comments/abc/post/{id}/"),
        created_utc,
        score: -2,
    }
}

pub fn article(url: &str, author: &str, title: &str) -> ArticleRecord {
    ArticleRecord {
        title: title.to_string(),
        author: author.to_string(),
        published: "2024-01-15T12:00:00".to_string(),
        url: url.to_string(),
    }
}

/// 2 submissions + 1 comment of activity, 3 upvoted submissions, all distinct urls.
pub fn make_source_basic() -> FakeSource {
    FakeSource {
        submissions: vec![
            submission("s1", Some("me"), JAN_15_2024),
            submission("s2", Some("me"), FEB_20_2024),
        ],
        comments: vec![comment("c1", Some("me"), FEB_20_2024)],
        upvoted: vec![
            SourceItem::Submission(submission("u1", Some("alice"), JAN_15_2024)),
            SourceItem::Submission(submission("u2", Some("bob"), JAN_15_2024)),
            SourceItem::Submission(submission("u3", None, FEB_20_2024)),
        ],
    }
}

/// Fresh scratch directory that outlives the test (kept for inspection on failure).
pub fn scratch_dir() -> PathBuf {
    tempfile::tempdir().unwrap().into_path()
}

/// Read a text file line-by-line into strings (skips empty lines).
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
