//! Raw listing items as the Reddit API returns them, and the collection seam.
//! Extra fields are ignored by serde.

use anyhow::Result;
use serde::{Deserialize, Deserializer};

/// Submission fields used by normalization (`t3` things).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSubmission {
    pub id: String,
    pub subreddit: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: Option<String>,
    #[serde(default, deserialize_with = "account_name")]
    pub author: Option<String>,
    #[serde(default)]
    pub url: String,
    pub created_utc: f64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: i64,
}

/// Comment fields used by normalization (`t1` things).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawComment {
    pub id: String,
    pub subreddit: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, deserialize_with = "account_name")]
    pub author: Option<String>,
    pub permalink: String,
    pub created_utc: f64,
    #[serde(default)]
    pub score: i64,
}

/// A listing child. Only `t1` and `t3` are shaped; anything else is kept as `Other`.
#[derive(Clone, Debug)]
pub enum SourceItem {
    Submission(RawSubmission),
    Comment(RawComment),
    Other(String),
}

impl SourceItem {
    /// Decode one `{"kind": "...", "data": {...}}` listing child.
    pub fn from_thing(thing: &serde_json::Value) -> Result<Self> {
        let kind = thing.get("kind").and_then(|k| k.as_str()).unwrap_or_default();
        let data = thing.get("data").cloned().unwrap_or(serde_json::Value::Null);
        Ok(match kind {
            "t3" => SourceItem::Submission(serde_json::from_value(data)?),
            "t1" => SourceItem::Comment(serde_json::from_value(data)?),
            other => SourceItem::Other(other.to_string()),
        })
    }
}

/// Deleted accounts come back as `"[deleted]"`; treat them like a missing author.
fn account_name<'de, D>(de: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    Ok(raw.filter(|name| !name.is_empty() && name != "[deleted]"))
}

/// Where raw activity comes from. Authentication, pagination and rate limiting
/// live behind this trait.
pub trait ActivitySource {
    /// The user's own submissions, newest first.
    fn submissions(&mut self) -> Result<Vec<RawSubmission>>;
    /// The user's own comments, newest first.
    fn comments(&mut self) -> Result<Vec<RawComment>>;
    /// Everything the user upvoted. May contain non-submission things.
    fn upvoted(&mut self) -> Result<Vec<SourceItem>>;
}
