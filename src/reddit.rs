//! Blocking Reddit API session: OAuth password grant, listing pagination and
//! header-driven rate limiting. Implements `ActivitySource`.

use crate::credentials::Credentials;
use crate::source::{ActivitySource, RawComment, RawSubmission, SourceItem};
use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use serde_json::Value;
use std::thread::sleep;
use std::time::Duration;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_BASE: &str = "https://oauth.reddit.com";
const PAGE_LIMIT: u32 = 100;
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    name: String,
}

/// One page of a listing: the things on it and the cursor for the next page.
#[derive(Debug)]
pub struct ListingPage {
    pub items: Vec<SourceItem>,
    pub after: Option<String>,
}

/// Decode a `{"kind":"Listing","data":{"after":..,"children":[..]}}` body.
pub fn parse_listing_page(body: &Value) -> Result<ListingPage> {
    let data = body.get("data").ok_or_else(|| anyhow!("listing response has no `data`"))?;
    let children = data
        .get("children")
        .and_then(|c| c.as_array())
        .ok_or_else(|| anyhow!("listing response has no `children`"))?;
    let items = children.iter().map(SourceItem::from_thing).collect::<Result<Vec<_>>>()?;
    let after = data.get("after").and_then(|a| a.as_str()).filter(|a| !a.is_empty()).map(str::to_string);
    Ok(ListingPage { items, after })
}

pub struct RedditClient {
    http: Client,
    token: String,
    username: String,
    activity_user_agent: String,
    upvote_user_agent: String,
}

impl RedditClient {
    /// Authenticate with the password grant and resolve the account name.
    pub fn login(creds: &Credentials, activity_user_agent: &str, upvote_user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed to construct reqwest client")?;

        let resp = http
            .post(TOKEN_URL)
            .header(USER_AGENT, activity_user_agent)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", creds.username.as_str()),
                ("password", creds.password.as_str()),
            ])
            .send()
            .context("request access token")?;
        let token: TokenResponse = check_status(resp, TOKEN_URL)?.json().context("decode token response")?;
        let token = match (token.access_token, token.error) {
            (Some(t), _) => t,
            (None, Some(err)) => bail!("reddit authentication failed: {err}"),
            (None, None) => bail!("reddit authentication failed: no access token in response"),
        };

        let mut client = Self {
            http,
            token,
            username: String::new(),
            activity_user_agent: activity_user_agent.to_string(),
            upvote_user_agent: upvote_user_agent.to_string(),
        };
        let me: MeResponse = serde_json::from_value(client.get_json("/api/v1/me", &[], activity_user_agent)?)
            .context("decode /api/v1/me")?;
        tracing::info!(user = %me.name, "authenticated");
        client.username = me.name;
        Ok(client)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn get_json(&self, path: &str, query: &[(&str, String)], user_agent: &str) -> Result<Value> {
        let url = format!("{OAUTH_BASE}{path}");
        let resp = self
            .http
            .get(&url)
            .header(USER_AGENT, user_agent)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .with_context(|| format!("GET {url}"))?;
        respect_rate_limit(&resp);
        check_status(resp, &url)?.json().with_context(|| format!("decode {url}"))
    }

    /// Walk every page of `/user/{name}/{what}`.
    fn listing(&self, what: &str, extra: &[(&str, &str)], user_agent: &str) -> Result<Vec<SourceItem>> {
        let path = format!("/user/{}/{}", self.username, what);
        walk_pages(|after| {
            let mut query: Vec<(&str, String)> = vec![("limit", PAGE_LIMIT.to_string()), ("raw_json", "1".to_string())];
            query.extend(extra.iter().map(|(k, v)| (*k, v.to_string())));
            if let Some(a) = after {
                query.push(("after", a.to_string()));
            }
            let page = parse_listing_page(&self.get_json(&path, &query, user_agent)?)
                .with_context(|| format!("listing {path}"))?;
            tracing::debug!(path = %path, items = page.items.len(), "fetched listing page");
            Ok(page)
        })
    }
}

impl ActivitySource for RedditClient {
    fn submissions(&mut self) -> Result<Vec<RawSubmission>> {
        let items = self.listing("submitted", &[("sort", "new")], &self.activity_user_agent)?;
        Ok(items
            .into_iter()
            .filter_map(|i| match i {
                SourceItem::Submission(s) => Some(s),
                _ => None,
            })
            .collect())
    }

    fn comments(&mut self) -> Result<Vec<RawComment>> {
        let items = self.listing("comments", &[("sort", "new")], &self.activity_user_agent)?;
        Ok(items
            .into_iter()
            .filter_map(|i| match i {
                SourceItem::Comment(c) => Some(c),
                _ => None,
            })
            .collect())
    }

    fn upvoted(&mut self) -> Result<Vec<SourceItem>> {
        self.listing("upvoted", &[], &self.upvote_user_agent)
    }
}

/// Follow `after` cursors from the first page until a page has none.
/// `fetch` receives the cursor of the page to load (`None` for the first).
pub fn walk_pages<F>(mut fetch: F) -> Result<Vec<SourceItem>>
where
    F: FnMut(Option<&str>) -> Result<ListingPage>,
{
    let mut out = Vec::new();
    let mut after: Option<String> = None;
    loop {
        let page = fetch(after.as_deref())?;
        out.extend(page.items);
        match page.after {
            Some(next) if after.as_deref() != Some(next.as_str()) => after = Some(next),
            Some(next) => bail!("listing repeated cursor {next}"),
            None => break,
        }
    }
    Ok(out)
}

fn check_status(resp: Response, url: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    bail!("{url} returned {status}: {}", body.chars().take(500).collect::<String>())
}

/// How long to wait before the next request, from the `x-ratelimit-remaining`
/// and `x-ratelimit-reset` header values. Only a spent budget waits.
pub fn rate_limit_wait(remaining: Option<f64>, reset: Option<f64>) -> Option<Duration> {
    match (remaining, reset) {
        (Some(remaining), Some(reset)) if remaining < 1.0 && reset > 0.0 => Duration::try_from_secs_f64(reset).ok(),
        _ => None,
    }
}

/// Sleep until the window resets once the remaining request budget is spent.
fn respect_rate_limit(resp: &Response) {
    let header = |name: &str| {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<f64>().ok())
    };
    if let Some(wait) = rate_limit_wait(header("x-ratelimit-remaining"), header("x-ratelimit-reset")) {
        tracing::warn!(reset_secs = wait.as_secs_f64(), "rate limit exhausted; waiting for reset");
        sleep(wait);
    }
}
