use crate::aggregate::{visualize_reading_history, ReadingReport};
use crate::chart::{ChartSink, NoChart};
use crate::collect::{collect_upvoted_posts, collect_user_activity};
use crate::config::PipelineOptions;
use crate::merge::{append_merge_save, overwrite_save};
use crate::normalize::Normalizer;
use crate::progress::ProgressScope;
use crate::record::ArticleRecord;
use crate::source::ActivitySource;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// What one pipeline run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub csv_path: PathBuf,
    pub activity_rows: usize,
    pub upvoted_rows: usize,
    pub rows_written: usize,
    /// `None` when charts are disabled or there was nothing to report.
    pub report: Option<ReadingReport>,
}

/// Collect → normalize → overwrite-save → report, in that order.
#[derive(Clone, Debug, Default)]
pub struct ActivityPipeline {
    pub(crate) opts: PipelineOptions,
    normalizer: Normalizer,
}

impl ActivityPipeline {
    pub fn new() -> Self {
        Self { opts: PipelineOptions::default(), normalizer: Normalizer::default() }
    }

    pub fn from_options(opts: PipelineOptions) -> Self {
        Self { opts, normalizer: Normalizer::default() }
    }

    // -------- Builder methods --------
    pub fn csv_path(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_csv_path(path); self }
    pub fn top_n(mut self, n: usize) -> Self { self.opts = self.opts.with_top_n(n); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn charts(mut self, yes: bool) -> Self { self.opts = self.opts.with_charts(yes); self }
    pub fn normalizer(mut self, normalizer: Normalizer) -> Self { self.normalizer = normalizer; self }

    pub fn options(&self) -> &PipelineOptions {
        &self.opts
    }

    pub fn run(&self, source: &mut dyn ActivitySource, sink: &mut dyn ChartSink) -> Result<RunSummary> {
        let pb = ProgressScope::spinner("Collecting submissions and comments", self.opts.progress);
        let activity = collect_user_activity(source, &self.normalizer, &pb)?;
        pb.finish(format!("collected {} activity items", activity.len()));

        let pb = ProgressScope::spinner("Collecting upvoted posts", self.opts.progress);
        let upvoted = collect_upvoted_posts(source, &self.normalizer, &pb)?;
        pb.finish(format!("collected {} upvoted posts", upvoted.len()));

        let rows_written = overwrite_save(&activity, &upvoted, &self.opts.csv_path)?;

        let report = if self.opts.charts {
            visualize_reading_history(&self.opts.csv_path, self.opts.top_n, sink)?
        } else {
            None
        };

        Ok(RunSummary {
            csv_path: self.opts.csv_path.clone(),
            activity_rows: activity.len(),
            upvoted_rows: upvoted.len(),
            rows_written,
            report,
        })
    }

    /// Run without rendering charts anywhere.
    pub fn run_quiet(&self, source: &mut dyn ActivitySource) -> Result<RunSummary> {
        self.run(source, &mut NoChart)
    }
}

/// Incremental article store: rows accumulate across runs, deduplicated by url.
#[derive(Clone, Debug)]
pub struct ArticleWriter {
    csv_path: PathBuf,
    top_n: usize,
}

impl ArticleWriter {
    pub fn new(csv_path: impl AsRef<Path>) -> Self {
        Self { csv_path: csv_path.as_ref().to_path_buf(), top_n: crate::aggregate::DEFAULT_TOP_N }
    }

    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = n.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.csv_path
    }

    /// Merge `articles` into the store; returns rows now stored.
    pub fn append(&self, articles: &[ArticleRecord]) -> Result<usize> {
        append_merge_save(articles, &self.csv_path)
    }

    pub fn visualize(&self, sink: &mut dyn ChartSink) -> Result<Option<ReadingReport>> {
        visualize_reading_history(&self.csv_path, self.top_n, sink)
    }
}
