use clap::Parser;
use std::path::PathBuf;

/// Find Launchpad bugs for triage: every bug a team's packages saw modified
/// in a date range, one line per bug.
#[derive(Debug, Parser)]
#[command(name = "lp-triage", version, about)]
pub struct Cli {
    /// Date to start finding bugs (e.g. 2016-07-15)
    pub start_date: Option<String>,

    /// Date to stop finding bugs, inclusive (e.g. 2016-07-31)
    pub end_date: Option<String>,

    /// Debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Open each bug in the web browser
    #[arg(short, long)]
    pub open: bool,

    /// Show all bugs, no date restriction
    #[arg(short = 'a', long)]
    pub no_date_filter: bool,

    /// Launchpad team to search for (default from config, normally
    /// ubuntu-server)
    #[arg(short = 'n', long)]
    pub team: Option<String>,

    /// Filter the team as direct bug subscriber instead of structural
    /// subscriber
    #[arg(short = 'b', long)]
    pub bug_subscriber: bool,

    /// Show full URLs instead of shortlinks
    #[arg(long)]
    pub full_urls: bool,

    /// Config file path (default: ~/.config/lp-triage/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_dates_are_optional() {
        let cli = Cli::parse_from(["lp-triage"]);
        assert!(cli.start_date.is_none());
        assert!(cli.end_date.is_none());
        assert!(!cli.bug_subscriber);

        let cli = Cli::parse_from(["lp-triage", "2016-07-15", "2016-07-31", "-b", "-o"]);
        assert_eq!(cli.start_date.as_deref(), Some("2016-07-15"));
        assert_eq!(cli.end_date.as_deref(), Some("2016-07-31"));
        assert!(cli.bug_subscriber);
        assert!(cli.open);
    }

    #[test]
    fn short_flags_match_the_classic_tool() {
        let cli = Cli::parse_from(["lp-triage", "-a", "-d", "-n", "kernel-team"]);
        assert!(cli.no_date_filter);
        assert!(cli.debug);
        assert_eq!(cli.team.as_deref(), Some("kernel-team"));
    }
}
