use crate::launchpad::types::BugTaskEntry;

pub const LONG_URL_ROOT: &str = "https://bugs.launchpad.net/bugs/";
pub const SHORTLINK_ROOT: &str = "LP: #";
pub const BUG_NUMBER_LENGTH: usize = 7;

/// Display view of one bug task. All fields are derived once at construction
/// from the remote entry's title and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageTask {
    pub number: String,
    pub src: String,
    pub short_title: String,
    pub status: String,
    /// True when the team is already directly subscribed to the bug. Only
    /// meaningful in structural-subscriber mode; always false otherwise.
    pub subscribed: bool,
}

impl TriageTask {
    pub fn from_entry(entry: &BugTaskEntry, subscribed: bool) -> Self {
        Self::from_title(&entry.title, &entry.status, subscribed)
    }

    /// Derivation is positional over the fixed Launchpad title layout
    /// `Bug #<number> in <package> (Ubuntu): "<summary>"`. A title that does
    /// not match yields empty fields rather than an error; callers get wrong
    /// output, not a crash, if Launchpad ever changes the format.
    pub fn from_title(title: &str, status: &str, subscribed: bool) -> Self {
        let tokens: Vec<&str> = title.split(' ').collect();
        let number = tokens
            .get(1)
            .map(|t| t.replace('#', ""))
            .unwrap_or_default();
        let src = tokens.get(3).copied().unwrap_or_default().to_string();
        let short_title = if tokens.len() > 5 {
            tokens[5..].join(" ").replace('"', "")
        } else {
            String::new()
        };
        Self {
            number,
            src,
            short_title,
            status: status.to_string(),
            subscribed,
        }
    }

    /// The user-facing bug URL.
    pub fn url(&self) -> String {
        format!("{}{}", LONG_URL_ROOT, self.number)
    }

    /// The `LP: #` shortlink that gnome-terminal autolinks.
    pub fn shortlink(&self) -> String {
        format!("{}{}", SHORTLINK_ROOT, self.number)
    }

    /// One scannable output line. No wrapping or truncation; the link column
    /// is sized for a seven-digit bug number.
    pub fn compose_pretty(&self, shortlinks: bool) -> String {
        let link = if shortlinks {
            format!(
                "{:<width$}",
                self.shortlink(),
                width = BUG_NUMBER_LENGTH + SHORTLINK_ROOT.len()
            )
        } else {
            format!(
                "{:<width$}",
                self.url(),
                width = BUG_NUMBER_LENGTH + LONG_URL_ROOT.len()
            )
        };
        let marker = if self.subscribed { "*" } else { "" };
        format!(
            "{} - {:<16} {:<16} - {}",
            link,
            format!("{}({})", marker, self.status),
            format!("[{}]", self.src),
            self.short_title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: &str = "Bug #123456 in thunderbird (Ubuntu): \"Crashes on startup\"";

    #[test]
    fn derives_fields_from_title() {
        let task = TriageTask::from_title(TITLE, "Confirmed", false);
        assert_eq!(task.number, "123456");
        assert_eq!(task.src, "thunderbird");
        assert_eq!(task.short_title, "Crashes on startup");
        assert_eq!(task.status, "Confirmed");
        assert_eq!(task.url(), "https://bugs.launchpad.net/bugs/123456");
        assert_eq!(task.shortlink(), "LP: #123456");
    }

    #[test]
    fn compose_pretty_shortlink_subscribed() {
        let task = TriageTask::from_title(TITLE, "Confirmed", true);
        let line = task.compose_pretty(true);
        assert_eq!(
            line,
            "LP: #123456  - *(Confirmed)     [thunderbird]    - Crashes on startup"
        );
        // link column is left-justified to 7 digits + prefix
        assert!(line.starts_with("LP: #123456 "));
    }

    #[test]
    fn compose_pretty_unsubscribed_has_no_marker() {
        let task = TriageTask::from_title(TITLE, "New", false);
        let line = task.compose_pretty(true);
        assert_eq!(
            line,
            "LP: #123456  - (New)            [thunderbird]    - Crashes on startup"
        );
    }

    #[test]
    fn compose_pretty_full_url() {
        let task = TriageTask::from_title(TITLE, "New", false);
        let line = task.compose_pretty(false);
        assert!(line.starts_with("https://bugs.launchpad.net/bugs/123456"));
        let width = BUG_NUMBER_LENGTH + LONG_URL_ROOT.len();
        assert_eq!(line.find(" - "), Some(width));
    }

    // Title parsing is positional and unvalidated. Pin down what happens to a
    // title that does not follow the expected layout: wrong or empty fields,
    // never a panic.
    #[test]
    fn malformed_title_yields_garbage_not_a_panic() {
        let task = TriageTask::from_title("not a bug title", "New", false);
        assert_eq!(task.number, "a");
        assert_eq!(task.src, "title");
        assert_eq!(task.short_title, "");
    }

    #[test]
    fn empty_title_yields_empty_fields() {
        let task = TriageTask::from_title("", "New", false);
        assert_eq!(task.number, "");
        assert_eq!(task.src, "");
        assert_eq!(task.short_title, "");
    }
}
