//! Command-line interface parsing for folio
//!
//! Runtime options are limited to where to fetch from and whom to show; the
//! cache TTL and listing caps are fixed.

use std::path::PathBuf;

use clap::Parser;

use crate::github::GITHUB_API_BASE;
use crate::projects::FilterPolicy;
use crate::state::DEFAULT_USERNAME;

/// folio - browse a GitHub user's most recently updated projects
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Portfolio grid of a GitHub user's recent projects")]
#[command(version)]
pub struct Cli {
    /// GitHub username to load on startup
    #[arg(short, long, default_value = DEFAULT_USERNAME)]
    pub username: String,

    /// Hide forked repositories
    #[arg(long)]
    pub no_forks: bool,

    /// GitHub API base URL
    #[arg(long, env = "FOLIO_API_BASE", default_value = GITHUB_API_BASE)]
    pub api_base: String,

    /// GitHub token; optional, raises the API rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Print the project cards to stdout instead of starting the TUI
    #[arg(long)]
    pub print: bool,

    /// Write the loaded listings as JSON to this path (with --print)
    #[arg(long, value_name = "PATH", requires = "print")]
    pub export: Option<PathBuf>,
}

impl Cli {
    pub fn policy(&self) -> FilterPolicy {
        FilterPolicy {
            include_forks: !self.no_forks,
        }
    }
}
