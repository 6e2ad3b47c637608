use crate::aggregate::DEFAULT_TOP_N;
use std::path::{Path, PathBuf};

pub const DEFAULT_CSV_PATH: &str = "reddit_activity.csv";
pub const ACTIVITY_USER_AGENT: &str = "activity-tracker";
pub const UPVOTE_USER_AGENT: &str = "upvote-tracker";

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub csv_path: PathBuf,
    pub top_n: usize,                  // authors shown in the report
    pub progress: bool,                // show collection spinners
    pub charts: bool,                  // render charts after saving
    pub activity_user_agent: String,
    pub upvote_user_agent: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            top_n: DEFAULT_TOP_N,
            progress: true,
            charts: true,
            activity_user_agent: ACTIVITY_USER_AGENT.to_string(),
            upvote_user_agent: UPVOTE_USER_AGENT.to_string(),
        }
    }
}

impl PipelineOptions {
    pub fn with_csv_path(mut self, path: impl AsRef<Path>) -> Self {
        self.csv_path = path.as_ref().to_path_buf();
        self
    }
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n.max(1);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_charts(mut self, yes: bool) -> Self {
        self.charts = yes;
        self
    }
    pub fn with_user_agents(mut self, activity: impl Into<String>, upvote: impl Into<String>) -> Self {
        self.activity_user_agent = activity.into();
        self.upvote_user_agent = upvote.into();
        self
    }
}
