use serde::Deserialize;

/// One page of a Launchpad collection. Large result sets carry a
/// `next_collection_link` to the following page.
#[derive(Debug, Deserialize)]
pub struct TaskPage {
    #[serde(default)]
    pub entries: Vec<BugTaskEntry>,
    pub next_collection_link: Option<String>,
}

/// A bug task as returned by `searchTasks`. Only the fields we read; the rest
/// of the (large) representation is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct BugTaskEntry {
    /// Canonical API link to this task, unique and stable. Used as the map key
    /// when deduplicating across queries.
    pub self_link: String,
    /// Free text of the form `Bug #<n> in <package> (Ubuntu): "<summary>"`.
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub web_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_search_tasks_page() {
        let body = r#"{
            "total_size": 2,
            "start": 0,
            "next_collection_link": "https://api.launchpad.net/1.0/ubuntu?ws.op=searchTasks&ws.start=75",
            "entries": [
                {
                    "self_link": "https://api.launchpad.net/1.0/ubuntu/+source/openssh/+bug/1",
                    "web_link": "https://bugs.launchpad.net/ubuntu/+source/openssh/+bug/1",
                    "title": "Bug #1 in openssh (Ubuntu): \"demo\"",
                    "status": "New",
                    "importance": "Undecided"
                }
            ]
        }"#;
        let page: TaskPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].status, "New");
        assert!(page.next_collection_link.is_some());
    }

    #[test]
    fn final_page_has_no_next_link() {
        let page: TaskPage = serde_json::from_str(r#"{"total_size": 0, "entries": []}"#).unwrap();
        assert!(page.entries.is_empty());
        assert!(page.next_collection_link.is_none());
    }
}
