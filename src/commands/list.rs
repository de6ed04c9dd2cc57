//! The list command: fetch every configured source and print the
//! deduplicated function names.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::cli::RepoSpec;
use crate::providers::GithubFileProvider;
use crate::sources::{default_sources, fetch_all_within};

pub struct ListConfig {
    pub repo: RepoSpec,
    pub timeout: Duration,
    pub token: Option<String>,
}

pub async fn run_list(config: ListConfig) -> Result<()> {
    debug!(
        repo = %format!("{}/{}", config.repo.owner, config.repo.repo),
        reference = %config.repo.reference,
        timeout = ?config.timeout,
        authenticated = config.token.is_some(),
        "listing template functions"
    );

    let provider = GithubFileProvider::new(
        config.repo.owner,
        config.repo.repo,
        config.repo.reference,
    )
    .with_token(config.token);

    let sources = default_sources(Arc::new(provider));
    let funcs = fetch_all_within(config.timeout, &sources).await?;

    let mut stdout = io::stdout().lock();
    for name in &funcs {
        writeln!(stdout, "{name}")?;
    }
    Ok(())
}
