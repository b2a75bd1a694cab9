pub mod auth;
pub mod rest;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use types::BugTaskEntry;

/// One `searchTasks` query. Field names mirror the Launchpad API parameters;
/// subscriber fields hold bare team names, expanded to person links by the
/// client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Inclusive lower bound on a task's last-modified timestamp.
    pub modified_since: Option<NaiveDate>,
    /// Team subscribed to the whole package/project.
    pub structural_subscriber: Option<String>,
    /// Team subscribed to the individual bug.
    pub bug_subscriber: Option<String>,
}

/// Search boundary over the Launchpad bug task collection. The REST client is
/// the production implementation; tests substitute a canned fake.
#[async_trait]
pub trait TaskSearch: Send + Sync {
    async fn search_tasks(&self, query: &TaskQuery) -> Result<Vec<BugTaskEntry>>;
}
