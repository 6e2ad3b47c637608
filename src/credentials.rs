//! Credential resolution: CLI flag, then environment, then an interactive prompt.
//! Lives outside the pipeline; the core only ever sees a finished `Credentials`.

use anyhow::{anyhow, Context, Result};
use std::io::{self, BufRead, Write};

pub const ENV_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
pub const ENV_USERNAME: &str = "REDDIT_USERNAME";
pub const ENV_PASSWORD: &str = "REDDIT_PASSWORD";

#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Values supplied on the command line, any of which may be missing.
#[derive(Clone, Debug, Default)]
pub struct CredentialFlags {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// First non-empty of: `flag`, `env(var)`, `prompt(label)`.
pub fn resolve_one(
    flag: Option<String>,
    var: &str,
    label: &str,
    env: &dyn Fn(&str) -> Option<String>,
    prompt: &mut dyn FnMut(&str) -> Result<String>,
) -> Result<String> {
    let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    if let Some(v) = present(flag) {
        return Ok(v);
    }
    if let Some(v) = present(env(var)) {
        return Ok(v);
    }
    let v = prompt(label)?;
    if v.trim().is_empty() {
        return Err(anyhow!("{label} is required"));
    }
    Ok(v)
}

/// Resolve all four fields in order with injectable env lookup and prompt.
pub fn resolve_with(
    flags: CredentialFlags,
    env: &dyn Fn(&str) -> Option<String>,
    prompt: &mut dyn FnMut(&str) -> Result<String>,
) -> Result<Credentials> {
    Ok(Credentials {
        client_id: resolve_one(flags.client_id, ENV_CLIENT_ID, "Reddit client_id", env, prompt)?,
        client_secret: resolve_one(flags.client_secret, ENV_CLIENT_SECRET, "Reddit client_secret", env, prompt)?,
        username: resolve_one(flags.username, ENV_USERNAME, "Reddit username", env, prompt)?,
        password: resolve_one(flags.password, ENV_PASSWORD, "Reddit password", env, prompt)?,
    })
}

/// Process-level resolution: loads `.env` if present, reads the real
/// environment, prompts on stdin.
pub fn resolve(flags: CredentialFlags) -> Result<Credentials> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
    let env = |var: &str| std::env::var(var).ok();
    resolve_with(flags, &env, &mut stdin_prompt)
}

fn stdin_prompt(label: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}: ")?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
