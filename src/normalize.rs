//! Raw listing item → `ActivityRecord`.

use crate::record::{ActivityKind, ActivityRecord, RecordDetails, MISSING_AUTHOR};
use crate::source::{RawComment, RawSubmission};
use anyhow::{anyhow, Context, Result};
use chrono::TimeZone;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Prefix joined verbatim with a comment permalink.
pub const COMMENT_URL_PREFIX: &str = "https://reddit.com";

/// Which UTC offset applies to a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalZone {
    /// Same offset for every instant.
    Fixed(UtcOffset),
    /// The host zone's rules at each instant, so daylight saving is followed.
    System,
}

impl LocalZone {
    pub fn offset_at(&self, at: OffsetDateTime) -> Result<UtcOffset> {
        match self {
            LocalZone::Fixed(offset) => Ok(*offset),
            LocalZone::System => system_offset_at(at.unix_timestamp()),
        }
    }
}

fn system_offset_at(unix_secs: i64) -> Result<UtcOffset> {
    let utc = chrono::DateTime::from_timestamp(unix_secs, 0)
        .ok_or_else(|| anyhow!("timestamp {unix_secs} outside the host zone's range"))?;
    let secs = chrono::Local.offset_from_utc_datetime(&utc.naive_utc()).local_minus_utc();
    UtcOffset::from_whole_seconds(secs).map_err(|e| anyhow!("host offset {secs}s at {unix_secs}: {e}"))
}

/// Pure mapper from raw items to rows. Holds the zone used to render
/// `published` as a local wall-clock time.
#[derive(Clone, Copy, Debug)]
pub struct Normalizer {
    zone: LocalZone,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(UtcOffset::UTC)
    }
}

impl Normalizer {
    pub fn new(offset: UtcOffset) -> Self {
        Self { zone: LocalZone::Fixed(offset) }
    }

    /// Render in the host's zone, resolving the offset per timestamp.
    pub fn local() -> Self {
        Self { zone: LocalZone::System }
    }

    pub fn zone(&self) -> LocalZone {
        self.zone
    }

    /// Normalize a submission. `kind` must be `Submission` or `UpvotedPost`.
    pub fn submission(&self, raw: &RawSubmission, kind: ActivityKind) -> Result<ActivityRecord> {
        let title = raw.title.clone();
        let num_comments = raw.num_comments;
        let details = match kind {
            ActivityKind::Submission => RecordDetails::Submission { title, num_comments },
            ActivityKind::UpvotedPost => RecordDetails::UpvotedPost { title, num_comments },
            ActivityKind::Comment => return Err(anyhow!("submission {} cannot be normalized as a comment", raw.id)),
        };
        Ok(ActivityRecord {
            id: raw.id.clone(),
            subreddit: raw.subreddit.clone(),
            body: raw.selftext.clone().unwrap_or_default(),
            author: render_author(raw.author.as_deref()),
            url: raw.url.clone(),
            published: self.published(raw.created_utc).with_context(|| format!("submission {}", raw.id))?,
            score: raw.score,
            details,
        })
    }

    pub fn comment(&self, raw: &RawComment) -> Result<ActivityRecord> {
        Ok(ActivityRecord {
            id: raw.id.clone(),
            subreddit: raw.subreddit.clone(),
            body: raw.body.clone(),
            author: render_author(raw.author.as_deref()),
            url: comment_url(&raw.permalink),
            published: self.published(raw.created_utc).with_context(|| format!("comment {}", raw.id))?,
            score: raw.score,
            details: RecordDetails::Comment,
        })
    }

    /// Epoch seconds → `YYYY-MM-DDTHH:MM:SS[.ffffff]` in this normalizer's offset, no suffix.
    pub fn published(&self, epoch_secs: f64) -> Result<String> {
        let at = utc_instant(epoch_secs)?;
        render_iso(at, self.zone.offset_at(at)?)
    }
}

pub fn comment_url(permalink: &str) -> String {
    format!("{COMMENT_URL_PREFIX}{permalink}")
}

pub fn render_author(author: Option<&str>) -> String {
    author.unwrap_or(MISSING_AUTHOR).to_string()
}

/// Microseconds are only printed when non-zero.
pub fn format_local_iso(epoch_secs: f64, offset: UtcOffset) -> Result<String> {
    render_iso(utc_instant(epoch_secs)?, offset)
}

fn utc_instant(epoch_secs: f64) -> Result<OffsetDateTime> {
    if !epoch_secs.is_finite() {
        return Err(anyhow!("invalid epoch timestamp {epoch_secs}"));
    }
    let micros = (epoch_secs * 1_000_000.0).round() as i128;
    let nanos = micros
        .checked_mul(1_000)
        .ok_or_else(|| anyhow!("epoch timestamp {epoch_secs} out of range"))?;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .map_err(|e| anyhow!("epoch timestamp {epoch_secs} out of range: {e}"))
}

fn render_iso(at: OffsetDateTime, offset: UtcOffset) -> Result<String> {
    let dt = at
        .checked_to_offset(offset)
        .ok_or_else(|| anyhow!("timestamp {} out of range at offset {offset}", at.unix_timestamp()))?;
    let base = dt.format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))?;
    let frac = dt.microsecond();
    Ok(if frac == 0 { base } else { format!("{base}.{frac:06}") })
}
