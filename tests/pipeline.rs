#[path = "common/mod.rs"]
mod common;

use common::*;
use reddit_activity::{
    read_rows, ActivityKind, ActivityPipeline, ActivityRow, ArticleRecord, ArticleWriter, Normalizer, SourceItem,
};

/// 2 submissions + 1 comment + 3 upvoted → 6 data rows plus a header,
/// activity rows first, then upvoted, each in source order.
#[test]
fn end_to_end_writes_six_rows() {
    let dir = scratch_dir();
    let csv = dir.join("reddit_activity.csv");
    let mut source = make_source_basic();
    let mut sink = RecordingChart::default();

    let summary = ActivityPipeline::new()
        .csv_path(&csv)
        .progress(false)
        .run(&mut source, &mut sink)
        .unwrap();

    assert_eq!(summary.activity_rows, 3);
    assert_eq!(summary.upvoted_rows, 3);
    assert_eq!(summary.rows_written, 6);
    assert_eq!(read_lines(&csv).len(), 7);

    let rows: Vec<ActivityRow> = read_rows(&csv).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s2", "c1", "u1", "u2", "u3"]);
    let kinds: Vec<ActivityKind> = rows.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ActivityKind::Submission,
            ActivityKind::Submission,
            ActivityKind::Comment,
            ActivityKind::UpvotedPost,
            ActivityKind::UpvotedPost,
            ActivityKind::UpvotedPost,
        ]
    );
    assert_eq!(rows[5].author, "None");

    // report: "me" wrote 3 rows, then alice/bob/None in first-seen order
    let report = summary.report.unwrap();
    let names: Vec<&str> = report.top_authors.iter().map(|(a, _)| a.as_str()).collect();
    assert_eq!(names, vec!["me", "alice", "bob", "None"]);
    assert_eq!(report.top_authors[0].1, 3);
    assert_eq!(sink.charts.len(), 2);
    assert_eq!(sink.charts[1].1, vec![("2024-01".to_string(), 3), ("2024-02".to_string(), 3)]);
}

/// Upvoted comments and unknown things are not part of the upvoted collection.
#[test]
fn upvoted_keeps_only_submissions() {
    let dir = scratch_dir();
    let csv = dir.join("out.csv");
    let mut source = make_source_basic();
    source.upvoted.push(SourceItem::Comment(comment("uc1", Some("zed"), JAN_15_2024)));
    source.upvoted.push(SourceItem::Other("t5".to_string()));

    let summary = ActivityPipeline::new()
        .csv_path(&csv)
        .progress(false)
        .charts(false)
        .run_quiet(&mut source)
        .unwrap();
    assert_eq!(summary.upvoted_rows, 3);
    assert_eq!(summary.rows_written, 6);
    assert!(summary.report.is_none());
}

/// A second run overwrites the first; nothing from the earlier run survives.
#[test]
fn second_run_overwrites_store() {
    let dir = scratch_dir();
    let csv = dir.join("out.csv");
    let pipeline = ActivityPipeline::new().csv_path(&csv).progress(false).charts(false);

    pipeline.run_quiet(&mut make_source_basic()).unwrap();

    let mut smaller = FakeSource {
        submissions: vec![submission("s9", Some("me"), FEB_20_2024)],
        ..Default::default()
    };
    let summary = pipeline.run_quiet(&mut smaller).unwrap();
    assert_eq!(summary.rows_written, 1);

    let rows: Vec<ActivityRow> = read_rows(&csv).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "s9");
}

/// Nothing collected: the store holds only the header and no charts are drawn.
#[test]
fn empty_collection_writes_header_and_skips_charts() {
    let dir = scratch_dir();
    let csv = dir.join("out.csv");
    let mut sink = RecordingChart::default();

    let summary = ActivityPipeline::new()
        .csv_path(&csv)
        .progress(false)
        .run(&mut FakeSource::default(), &mut sink)
        .unwrap();

    assert_eq!(summary.rows_written, 0);
    assert_eq!(read_lines(&csv).len(), 1);
    assert!(summary.report.is_none());
    assert!(sink.charts.is_empty());
}

/// Collection failures abort the run before anything is written.
#[test]
fn source_errors_propagate() {
    let dir = scratch_dir();
    let csv = dir.join("out.csv");
    let err = ActivityPipeline::new()
        .csv_path(&csv)
        .progress(false)
        .run_quiet(&mut FailingSource)
        .unwrap_err();
    assert!(format!("{err:#}").contains("401 Unauthorized"));
    assert!(!csv.exists());
}

/// The incremental writer accumulates article rows across runs.
#[test]
fn article_writer_accumulates_across_runs() {
    let dir = scratch_dir();
    let writer = ArticleWriter::new(dir.join("articles.csv"));
    let n = Normalizer::default();

    let run1: Vec<ArticleRecord> = [submission("a", Some("alice"), JAN_15_2024), submission("b", Some("bob"), JAN_15_2024)]
        .iter()
        .map(|s| ArticleRecord::from(&n.submission(s, ActivityKind::UpvotedPost).unwrap()))
        .collect();
    let run2: Vec<ArticleRecord> = [submission("b", Some("bob"), FEB_20_2024), submission("c", Some("alice"), FEB_20_2024)]
        .iter()
        .map(|s| ArticleRecord::from(&n.submission(s, ActivityKind::UpvotedPost).unwrap()))
        .collect();

    assert_eq!(writer.append(&run1).unwrap(), 2);
    assert_eq!(writer.append(&run2).unwrap(), 3);
    assert_eq!(writer.append(&[]).unwrap(), 3);

    let mut sink = RecordingChart::default();
    let report = writer.visualize(&mut sink).unwrap().unwrap();
    assert_eq!(report.top_authors, vec![("alice".to_string(), 2), ("bob".to_string(), 1)]);
    // "b" kept its January timestamp from the first run
    assert_eq!(sink.charts[1].1, vec![("2024-01".to_string(), 2), ("2024-02".to_string(), 1)]);
}
