use super::auth::LaunchpadAuth;
use super::types::{BugTaskEntry, TaskPage};
use super::{TaskQuery, TaskSearch};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header;
use reqwest::Client;

/// Page size requested from the collection; Launchpad caps this server-side.
const PAGE_SIZE: &str = "300";

pub struct LaunchpadRest {
    client: Client,
    auth: LaunchpadAuth,
    api_root: String,
    distribution: String,
}

impl LaunchpadRest {
    pub fn new(client: Client, auth: LaunchpadAuth, api_root: &str, distribution: &str) -> Self {
        Self {
            client,
            auth,
            api_root: api_root.trim_end_matches('/').to_string(),
            distribution: distribution.to_string(),
        }
    }

    fn person_link(&self, team: &str) -> String {
        format!("{}/~{}", self.api_root, team)
    }

    fn search_params(&self, query: &TaskQuery) -> Vec<(String, String)> {
        let mut params = vec![
            ("ws.op".to_string(), "searchTasks".to_string()),
            ("ws.size".to_string(), PAGE_SIZE.to_string()),
        ];
        if let Some(date) = query.modified_since {
            params.push(("modified_since".to_string(), date.format("%Y-%m-%d").to_string()));
        }
        if let Some(team) = &query.structural_subscriber {
            params.push(("structural_subscriber".to_string(), self.person_link(team)));
        }
        if let Some(team) = &query.bug_subscriber {
            params.push(("bug_subscriber".to_string(), self.person_link(team)));
        }
        params
    }

    async fn get_page(&self, url: &str, params: &[(String, String)]) -> Result<TaskPage> {
        let resp = self
            .client
            .get(url)
            .query(params)
            .header(header::AUTHORIZATION, self.auth.authorization_header())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .context("searchTasks request failed")?;
        let status = resp.status();
        if status.as_u16() == 401 {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "Launchpad rejected the cached credentials (401): {}. \
                 Delete the credentials file and re-authorize.",
                body.trim()
            );
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("searchTasks failed ({}): {}", status, body);
        }
        resp.json().await.context("failed to parse searchTasks response")
    }
}

#[async_trait]
impl TaskSearch for LaunchpadRest {
    /// Run one query against the distribution's task collection, following
    /// `next_collection_link` until the whole result set has been fetched.
    async fn search_tasks(&self, query: &TaskQuery) -> Result<Vec<BugTaskEntry>> {
        let url = format!("{}/{}", self.api_root, self.distribution);
        let params = self.search_params(query);

        let mut entries = Vec::new();
        let mut page = self.get_page(&url, &params).await?;
        loop {
            entries.append(&mut page.entries);
            let Some(next) = page.next_collection_link else {
                break;
            };
            // the next link carries the full query string already
            page = self.get_page(&next, &[]).await?;
        }
        tracing::debug!(count = entries.len(), "searchTasks complete");
        Ok(entries)
    }
}
