#[path = "common/mod.rs"]
mod common;

use common::*;
use reddit_activity::{format_local_iso, ActivityKind, LocalZone, Normalizer, RecordDetails};
use time::macros::offset;

/// Comment urls are the permalink glued verbatim onto the fixed domain prefix.
#[test]
fn comment_url_is_prefix_plus_permalink() {
    let mut raw = comment("c9", Some("me"), JAN_15_2024);
    raw.permalink = "/r/test/comments/abc/title/".to_string();

    let rec = Normalizer::default().comment(&raw).unwrap();
    assert_eq!(rec.url, "https://reddit.com/r/test/comments/abc/title/");
}

/// Comments never carry a title or a comment count, in the record or the flat row.
#[test]
fn comments_have_empty_title_and_num_comments() {
    let rec = Normalizer::default().comment(&comment("c1", Some("me"), JAN_15_2024)).unwrap();
    assert_eq!(rec.kind(), ActivityKind::Comment);
    assert_eq!(rec.details, RecordDetails::Comment);

    let row = rec.to_row();
    assert_eq!(row.title, "");
    assert_eq!(row.num_comments, None);
    assert_eq!(row.body, "comment c1");
    assert_eq!(row.score, -2);
}

/// Submissions and upvoted posts share a shape and differ only in kind.
#[test]
fn submission_kinds_keep_title_body_and_count() {
    let n = Normalizer::default();
    let raw = submission("s1", Some("alice"), JAN_15_2024);

    let own = n.submission(&raw, ActivityKind::Submission).unwrap();
    let up = n.submission(&raw, ActivityKind::UpvotedPost).unwrap();

    assert_eq!(own.kind(), ActivityKind::Submission);
    assert_eq!(up.kind(), ActivityKind::UpvotedPost);
    for rec in [&own, &up] {
        assert_eq!(rec.title(), "Post s1");
        assert_eq!(rec.body, "body of s1");
        assert_eq!(rec.num_comments(), Some(4));
        assert_eq!(rec.url, "https://example.com/s1");
        assert_eq!(rec.subreddit, "rust");
    }
    assert!(n.submission(&raw, ActivityKind::Comment).is_err());
}

/// Link posts without selftext get an empty body.
#[test]
fn missing_selftext_becomes_empty_body() {
    let mut raw = submission("s1", Some("alice"), JAN_15_2024);
    raw.selftext = None;
    let rec = Normalizer::default().submission(&raw, ActivityKind::Submission).unwrap();
    assert_eq!(rec.body, "");
}

/// A deleted or missing author is rendered as the literal "None".
#[test]
fn missing_author_renders_as_none_sentinel() {
    let n = Normalizer::default();
    let s = n.submission(&submission("s1", None, JAN_15_2024), ActivityKind::UpvotedPost).unwrap();
    let c = n.comment(&comment("c1", None, JAN_15_2024)).unwrap();
    assert_eq!(s.author, "None");
    assert_eq!(c.author, "None");
}

/// "[deleted]" from the API decodes to a missing author.
#[test]
fn deleted_author_from_json_renders_as_none() {
    let raw: reddit_activity::RawComment = serde_json::from_value(serde_json::json!({
        "id": "c1", "subreddit": "rust", "body": "[removed]", "author": "[deleted]",
        "permalink": "/r/rust/comments/x/y/c1/", "created_utc": JAN_15_2024, "score": 1
    }))
    .unwrap();
    let rec = Normalizer::default().comment(&raw).unwrap();
    assert_eq!(rec.author, "None");
}

/// Timestamps are rendered without a zone suffix in the normalizer's offset.
#[test]
fn published_is_local_naive_iso() {
    let utc = Normalizer::default();
    assert_eq!(utc.published(JAN_15_2024).unwrap(), "2024-01-15T12:00:00");

    let plus2 = Normalizer::new(offset!(+2));
    assert_eq!(plus2.published(JAN_15_2024).unwrap(), "2024-01-15T14:00:00");

    let minus13 = Normalizer::new(offset!(-13));
    assert_eq!(minus13.published(JAN_15_2024).unwrap(), "2024-01-14T23:00:00");

    // fractional seconds show up as microseconds
    assert_eq!(utc.published(JAN_15_2024 + 0.5).unwrap(), "2024-01-15T12:00:00.500000");
    assert!(utc.published(f64::NAN).is_err());
}

/// Normalizing the same input twice yields identical records.
#[test]
fn normalization_is_deterministic() {
    let n = Normalizer::new(offset!(-5));
    let s = submission("s1", Some("alice"), FEB_20_2024);
    let c = comment("c1", None, FEB_20_2024);

    assert_eq!(
        n.submission(&s, ActivityKind::Submission).unwrap(),
        n.submission(&s, ActivityKind::Submission).unwrap()
    );
    assert_eq!(n.comment(&c).unwrap(), n.comment(&c).unwrap());
}

/// A fixed zone applies the same offset regardless of the date.
#[test]
fn fixed_zone_ignores_season() {
    let n = Normalizer::new(offset!(+1));
    assert_eq!(n.zone(), LocalZone::Fixed(offset!(+1)));
    assert_eq!(n.published(JAN_15_2024).unwrap(), "2024-01-15T13:00:00");
    // 2024-07-15T12:00:00Z
    assert_eq!(n.published(1_721_044_800.0).unwrap(), "2024-07-15T13:00:00");
}

/// Shifting past the last representable year is an error, not a panic.
#[test]
fn timestamp_beyond_year_9999_is_an_error() {
    // 9999-12-31T23:59:59Z
    let last = 253_402_300_799.0;
    assert_eq!(format_local_iso(last, offset!(UTC)).unwrap(), "9999-12-31T23:59:59");
    assert!(format_local_iso(last, offset!(+1)).is_err());
    assert!(Normalizer::new(offset!(+1)).published(last).is_err());
    assert!(format_local_iso(1e300, offset!(UTC)).is_err());
}
