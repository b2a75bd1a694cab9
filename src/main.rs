use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lp_triage::cli::Cli;
use lp_triage::config::Config;
use lp_triage::launchpad::auth::LaunchpadAuth;
use lp_triage::launchpad::rest::LaunchpadRest;
use lp_triage::triage::{self, dates};

// The whole run is three or four sequential API calls; a single-threaded
// runtime is all it needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let filter = if args.debug {
        "lp_triage=debug"
    } else {
        "lp_triage=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .without_time()
        .with_target(false)
        .init();

    let config = Config::load(args.config.as_deref())?;
    let team = args.team.clone().unwrap_or_else(|| config.team.clone());
    let shortlinks = !(args.full_urls || config.full_urls);
    let (web_root, api_root) = config.service_roots()?;

    let credentials_path = Config::credentials_path()
        .context("could not determine a config directory for cached credentials")?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("lp-triage/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let auth = LaunchpadAuth::login(&client, &web_root, &credentials_path).await?;
    let launchpad = LaunchpadRest::new(client, auth, &api_root, &config.distribution);

    info!("Ubuntu Server Bug List");
    triage::report_current_backlog(&launchpad, &team).await?;

    let range = dates::resolve_dates(
        args.start_date.as_deref(),
        args.end_date.as_deref(),
        args.no_date_filter,
    )?;

    info!("please be patient, this can take a few minutes...");
    let bugs = triage::find_bugs_in_range(&launchpad, &range, &team, args.bug_subscriber).await?;
    info!("found {} bugs", bugs.len());
    info!("---");

    triage::print_bugs(&bugs, args.open, shortlinks);
    Ok(())
}
