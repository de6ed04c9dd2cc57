//! Command-line interface definition.

use clap::Parser;
use regex::Regex;

/// A GitHub repository pinned to a branch or commit reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub owner: String,
    pub repo: String,
    pub reference: String,
}

impl RepoSpec {
    /// Parse an `owner/repo@ref` argument.
    pub fn parse(arg: &str) -> Result<Self, String> {
        let pattern = Regex::new("^(.+)/(.+)@(.+)$").map_err(|e| e.to_string())?;
        let captures = pattern
            .captures(arg)
            .ok_or_else(|| format!("invalid source repository {arg:?} (format: owner/repo@ref)"))?;
        Ok(Self {
            owner: captures[1].to_string(),
            repo: captures[2].to_string(),
            reference: captures[3].to_string(),
        })
    }
}

#[derive(Parser, Debug)]
#[command(name = "yagfuncs")]
#[command(about = "List available YAGPDB template function names", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Source repository to inspect
    #[arg(value_name = "OWNER/REPO@REF", default_value = "botlabs-gg/yagpdb@master",
          value_parser = RepoSpec::parse)]
    pub repo: RepoSpec,

    /// Timeout in seconds for fetching data
    #[arg(long, default_value = "5", value_name = "SECS")]
    pub timeout: u64,

    /// GitHub personal access token used to authenticate requests
    #[arg(long, env = "YAGFUNCS_GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
