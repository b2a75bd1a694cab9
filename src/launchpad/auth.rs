use anyhow::{bail, Context, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Consumer key identifying this application to Launchpad.
pub const CONSUMER_KEY: &str = "lp-triage";

/// OAuth 1.0a access token, cached on disk after the first interactive
/// authorization so later runs skip the browser round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub oauth_token: String,
    pub oauth_token_secret: String,
}

pub struct LaunchpadAuth {
    credentials: Credentials,
}

impl LaunchpadAuth {
    /// Load cached credentials, or walk the interactive request-token /
    /// authorize / access-token flow and cache the result.
    pub async fn login(client: &Client, web_root: &str, cache_path: &Path) -> Result<Self> {
        if let Some(credentials) = load_cached(cache_path) {
            tracing::debug!(path = %cache_path.display(), "using cached Launchpad credentials");
            return Ok(Self { credentials });
        }
        let credentials = authorize_interactive(client, web_root).await?;
        store(cache_path, &credentials);
        Ok(Self { credentials })
    }

    pub fn from_credentials(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Authorization header for an API request. Launchpad consumers have no
    /// secret, so the PLAINTEXT signature is just `&<token secret>`.
    pub fn authorization_header(&self) -> String {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();
        format!(
            "OAuth realm=\"\", oauth_version=\"1.0\", oauth_consumer_key=\"{}\", \
             oauth_token=\"{}\", oauth_signature_method=\"PLAINTEXT\", \
             oauth_signature=\"%26{}\", oauth_timestamp=\"{}\", oauth_nonce=\"{}\"",
            CONSUMER_KEY,
            self.credentials.oauth_token,
            urlencoding::encode(&self.credentials.oauth_token_secret),
            timestamp,
            nonce
        )
    }
}

fn load_cached(path: &Path) -> Option<Credentials> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

fn store(path: &Path, credentials: &Credentials) {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match toml::to_string(credentials) {
        Ok(body) => {
            if let Err(e) = std::fs::write(path, body) {
                tracing::warn!(error = %e, path = %path.display(), "could not cache credentials");
            }
        }
        Err(e) => tracing::warn!(error = %e, "could not serialize credentials"),
    }
}

/// First-run authorization: obtain a request token, send the user to the
/// authorize page, then exchange the request token for an access token.
async fn authorize_interactive(client: &Client, web_root: &str) -> Result<Credentials> {
    let request_token = token_exchange(
        client,
        &format!("{}/+request-token", web_root),
        None,
        "&",
    )
    .await
    .context("request token exchange failed")?;

    let authorize_url = format!(
        "{}/+authorize-token?oauth_token={}&allow_permission=DESKTOP_INTEGRATION",
        web_root,
        urlencoding::encode(&request_token.oauth_token)
    );
    println!("Authorize this application in your browser:");
    println!("  {}", authorize_url);
    let _ = open::that_detached(&authorize_url);

    print!("Press Enter once access has been granted > ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    let signature = format!("&{}", request_token.oauth_token_secret);
    token_exchange(
        client,
        &format!("{}/+access-token", web_root),
        Some(&request_token.oauth_token),
        &signature,
    )
    .await
    .context("access token exchange failed; was the request authorized?")
}

async fn token_exchange(
    client: &Client,
    url: &str,
    oauth_token: Option<&str>,
    signature: &str,
) -> Result<Credentials> {
    let mut form = vec![
        ("oauth_consumer_key", CONSUMER_KEY.to_string()),
        ("oauth_signature_method", "PLAINTEXT".to_string()),
        ("oauth_signature", signature.to_string()),
    ];
    if let Some(token) = oauth_token {
        form.push(("oauth_token", token.to_string()));
    }

    let resp = client
        .post(url)
        .form(&form)
        .send()
        .await
        .with_context(|| format!("POST {} failed", url))?;
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    if status.as_u16() == 401 {
        bail!("Launchpad authentication failed (401): {}", body.trim());
    }
    if !status.is_success() {
        bail!("token request failed ({}): {}", status, body.trim());
    }
    parse_token_response(&body)
}

/// Token responses are form-encoded: `oauth_token=...&oauth_token_secret=...`.
fn parse_token_response(body: &str) -> Result<Credentials> {
    let mut token = None;
    let mut secret = None;
    for pair in body.trim().split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(value)
            .with_context(|| format!("undecodable token field '{}'", key))?
            .into_owned();
        match key {
            "oauth_token" => token = Some(value),
            "oauth_token_secret" => secret = Some(value),
            _ => {}
        }
    }
    match (token, secret) {
        (Some(oauth_token), Some(oauth_token_secret)) => Ok(Credentials {
            oauth_token,
            oauth_token_secret,
        }),
        _ => bail!("malformed token response: {}", body.trim()),
    }
}
