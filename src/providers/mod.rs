//! Content providers supplying raw file text by path.
//!
//! Abstracting retrieval behind a trait keeps extraction logic free of I/O
//! and lets tests run against an in-memory tree instead of the network.

mod github;

pub use github::GithubFileProvider;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::errors::{Error, Result};

/// Access to file content within the target source tree.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Return the full text of the file at `path`.
    async fn get(&self, path: &str) -> Result<String>;
}

/// A provider backed by a static in-memory mapping of path to content, for
/// testing and offline use.
pub struct StaticFileProvider {
    files: HashMap<String, String>,
}

impl StaticFileProvider {
    /// For every `path` such that `files[path] == content`,
    /// `get(path)` returns `content`.
    pub fn new(files: HashMap<String, String>) -> Self {
        Self { files }
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for StaticFileProvider {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(path, content)| (path.into(), content.into()))
                .collect(),
        )
    }
}

#[async_trait]
impl ContentProvider for StaticFileProvider {
    async fn get(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::retrieval(path, format!("could not access {path}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_returns_known_content() {
        let provider: StaticFileProvider = [("a.go", "package a\n")].into_iter().collect();
        assert_eq!(provider.get("a.go").await.unwrap(), "package a\n");
    }

    #[tokio::test]
    async fn static_provider_fails_on_unknown_path() {
        let provider = StaticFileProvider::new(HashMap::new());
        let err = provider.get("missing.go").await.unwrap_err();
        match err {
            Error::Retrieval { path, message } => {
                assert_eq!(path, "missing.go");
                assert_eq!(message, "could not access missing.go");
            }
            other => panic!("expected Retrieval error, got {other:?}"),
        }
    }
}
