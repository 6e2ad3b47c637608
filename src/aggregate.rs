//! Reporting views over a stored CSV: top authors and rows per month.
//! Works for both schemas; only the `author` and `published` columns are read.

use crate::chart::ChartSink;
use crate::date::YearMonth;
use crate::store::{read_header, read_rows};
use ahash::AHashMap;
use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_TOP_N: usize = 10;

pub const MONTHS_CHART_TITLE: &str = "Articles Read Per Month";
pub const CHART_Y_LABEL: &str = "Articles Read";

/// "Top 10 Most-Read Authors" for the default `n`.
pub fn authors_chart_title(n: usize) -> String {
    format!("Top {n} Most-Read Authors")
}

/// The two columns the reports need; everything else in the row is ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct ReportRow {
    pub author: String,
    #[serde(default)]
    pub published: Option<String>,
}

/// Computed views, in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadingReport {
    pub top_authors: Vec<(String, u64)>,
    /// `None` when the store has no `published` column.
    pub per_month: Option<BTreeMap<YearMonth, u64>>,
}

/// Top `n` authors by row count, highest first.
/// Equal counts keep the order in which each author first appears in `authors`.
pub fn top_authors<'a, I>(authors: I, n: usize) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    // author -> (count, first index)
    let mut counts: AHashMap<&'a str, (u64, usize)> = AHashMap::new();
    for (idx, a) in authors.into_iter().enumerate() {
        counts.entry(a).or_insert((0, idx)).0 += 1;
    }
    let mut ranked: Vec<(&str, u64, usize)> = counts.into_iter().map(|(a, (c, first))| (a, c, first)).collect();
    ranked.sort_by(|x, y| y.1.cmp(&x.1).then(x.2.cmp(&y.2)));
    ranked.into_iter().take(n).map(|(a, c, _)| (a.to_string(), c)).collect()
}

/// Rows per calendar month, ascending. Unparseable timestamps are skipped.
pub fn count_by_month<'a, I>(published: I) -> BTreeMap<YearMonth, u64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut m = BTreeMap::<YearMonth, u64>::new();
    for p in published {
        match YearMonth::from_published(p) {
            Some(ym) => *m.entry(ym).or_insert(0) += 1,
            None => tracing::debug!(published = p, "skipping unparseable timestamp"),
        }
    }
    m
}

/// Compute both views over the rows stored at `csv_path`.
/// Missing file or zero rows is the normal "nothing to report" state: `Ok(None)`.
pub fn build_report(csv_path: &Path, top_n: usize) -> Result<Option<ReadingReport>> {
    if !csv_path.exists() {
        tracing::info!("File {} does not exist. Nothing to visualize.", csv_path.display());
        return Ok(None);
    }
    let rows: Vec<ReportRow> = read_rows(csv_path)?;
    if rows.is_empty() {
        tracing::info!("No data to visualize.");
        return Ok(None);
    }

    let top_authors = top_authors(rows.iter().map(|r| r.author.as_str()), top_n);
    let has_published = read_header(csv_path)?.iter().any(|h| h == "published");
    let per_month = has_published.then(|| count_by_month(rows.iter().filter_map(|r| r.published.as_deref())));

    Ok(Some(ReadingReport { top_authors, per_month }))
}

/// Build the report and hand both views to `sink`. Returns the report when
/// there was anything to show.
pub fn visualize_reading_history(csv_path: &Path, top_n: usize, sink: &mut dyn ChartSink) -> Result<Option<ReadingReport>> {
    let Some(report) = build_report(csv_path, top_n)? else {
        return Ok(None);
    };

    tracing::info!("Most-read authors: {:?}", report.top_authors);
    sink.bar_chart(&authors_chart_title(top_n), CHART_Y_LABEL, &report.top_authors)?;

    if let Some(months) = &report.per_month {
        tracing::info!("Articles read per month: {} months", months.len());
        let bars: Vec<(String, u64)> = months.iter().map(|(ym, c)| (ym.to_string(), *c)).collect();
        sink.bar_chart(MONTHS_CHART_TITLE, CHART_Y_LABEL, &bars)?;
    }
    Ok(Some(report))
}
