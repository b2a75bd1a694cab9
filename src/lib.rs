pub mod cli;
pub mod config;
pub mod launchpad;
pub mod triage;
