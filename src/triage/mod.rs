pub mod dates;
pub mod task;

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use tracing::{debug, info};

use crate::launchpad::{TaskQuery, TaskSearch};
use dates::DateRange;
use task::TriageTask;

/// Bugs modified in `[start, end_exclusive)`, derived by subtraction: the API
/// only filters on `modified_since`, so we fetch everything modified since
/// `start`, everything modified since `end_exclusive` (a subset of the first),
/// and keep the difference.
///
/// In structural-subscriber mode a third query (structural AND direct
/// subscriber) marks which in-range bugs the team is already directly
/// subscribed to. In bug-subscriber mode that annotation is meaningless and
/// `subscribed` stays false.
pub async fn find_bugs_in_range(
    search: &dyn TaskSearch,
    range: &DateRange,
    team: &str,
    bug_subscriber: bool,
) -> Result<Vec<TriageTask>> {
    let start = range.modified_since_start();

    let (since_start, since_end, already_subscribed) = if bug_subscriber {
        let since_start = search
            .search_tasks(&TaskQuery {
                modified_since: start,
                bug_subscriber: Some(team.to_string()),
                ..TaskQuery::default()
            })
            .await?;
        let since_end = search
            .search_tasks(&TaskQuery {
                modified_since: Some(range.end_exclusive),
                bug_subscriber: Some(team.to_string()),
                ..TaskQuery::default()
            })
            .await?;
        (since_start, since_end, Vec::new())
    } else {
        let since_start = search
            .search_tasks(&TaskQuery {
                modified_since: start,
                structural_subscriber: Some(team.to_string()),
                ..TaskQuery::default()
            })
            .await?;
        let since_end = search
            .search_tasks(&TaskQuery {
                modified_since: Some(range.end_exclusive),
                structural_subscriber: Some(team.to_string()),
                ..TaskQuery::default()
            })
            .await?;
        let already_subscribed = search
            .search_tasks(&TaskQuery {
                modified_since: start,
                structural_subscriber: Some(team.to_string()),
                bug_subscriber: Some(team.to_string()),
            })
            .await?;
        (since_start, since_end, already_subscribed)
    };

    let modified_after_range: HashSet<&str> =
        since_end.iter().map(|e| e.self_link.as_str()).collect();
    let subscribed_links: HashSet<&str> = already_subscribed
        .iter()
        .map(|e| e.self_link.as_str())
        .collect();

    // keyed by self_link so a task appearing twice collapses to one view
    let mut in_range: HashMap<String, TriageTask> = HashMap::new();
    for entry in &since_start {
        if modified_after_range.contains(entry.self_link.as_str()) {
            continue;
        }
        let subscribed = subscribed_links.contains(entry.self_link.as_str());
        in_range.insert(
            entry.self_link.clone(),
            TriageTask::from_entry(entry, subscribed),
        );
    }
    debug!(count = in_range.len(), "bugs left after range subtraction");

    Ok(in_range.into_values().collect())
}

/// How many bugs the team is currently subscribed to, date-free. Tracked run
/// over run to see whether the backlog grows or shrinks.
pub async fn report_current_backlog(search: &dyn TaskSearch, team: &str) -> Result<()> {
    let subscribed = search
        .search_tasks(&TaskQuery {
            bug_subscriber: Some(team.to_string()),
            ..TaskQuery::default()
        })
        .await?;
    info!("team {} currently subscribed to {} bugs", team, subscribed.len());
    info!("---");
    Ok(())
}

/// Print one line per bug to stdout, optionally opening each in the browser.
/// Browser launches are fire-and-forget.
pub fn print_bugs(tasks: &[TriageTask], open_in_browser: bool, shortlinks: bool) {
    for task in tasks {
        println!("{}", task.compose_pretty(shortlinks));
        if open_in_browser {
            if let Err(e) = open::that_detached(task.url()) {
                tracing::warn!(bug = %task.number, error = %e, "failed to open browser");
            }
        }
    }
}
