//! GitHub-backed content provider.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::core::errors::{Error, Result};

use super::ContentProvider;

const API_ROOT: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("yagfuncs/", env!("CARGO_PKG_VERSION"));

/// Fetches decoded file content from a GitHub repository at a specific
/// branch or commit reference using the repository contents API.
///
/// Unauthenticated requests work but are subject to a low rate limit; pass
/// a personal access token through [`GithubFileProvider::with_token`] to
/// raise it.
pub struct GithubFileProvider {
    client: Client,
    owner: String,
    repo: String,
    reference: String,
    token: Option<String>,
}

/// The contents API returns a JSON array when the path is a directory and
/// an object when it is a file, symlink, or submodule.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsPayload {
    File(FileContents),
    Directory(Vec<serde_json::Value>),
}

#[derive(Debug, Deserialize)]
struct FileContents {
    #[serde(rename = "type")]
    kind: String,
    encoding: Option<String>,
    content: Option<String>,
}

impl GithubFileProvider {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            owner: owner.into(),
            repo: repo.into(),
            reference: reference.into(),
            token: None,
        }
    }

    /// Authenticate requests with a bearer token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{API_ROOT}/repos/{}/{}/contents/{path}",
            self.owner, self.repo
        )
    }
}

#[async_trait]
impl ContentProvider for GithubFileProvider {
    async fn get(&self, path: &str) -> Result<String> {
        debug!(
            path,
            repo = %format!("{}/{}", self.owner, self.repo),
            reference = %self.reference,
            "fetching file from GitHub"
        );

        let mut request = self
            .client
            .get(self.contents_url(path))
            .query(&[("ref", self.reference.as_str())])
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(header::USER_AGENT, USER_AGENT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::retrieval(path, format!("fetching {path} from GitHub: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::retrieval(
                path,
                format!(
                    "{path} does not exist in {}/{} at {}",
                    self.owner, self.repo, self.reference
                ),
            ));
        }
        if !status.is_success() {
            return Err(Error::retrieval(
                path,
                format!("fetching {path} from GitHub: unexpected status {status}"),
            ));
        }

        let payload: ContentsPayload = response
            .json()
            .await
            .map_err(|e| Error::retrieval(path, format!("reading response for {path}: {e}")))?;

        match payload {
            ContentsPayload::Directory(_) => Err(Error::retrieval(
                path,
                format!("{path} is a directory, not a file"),
            )),
            ContentsPayload::File(contents) => decode_contents(path, contents),
        }
    }
}

fn decode_contents(path: &str, contents: FileContents) -> Result<String> {
    if contents.kind != "file" {
        return Err(Error::retrieval(
            path,
            format!("{path} is a {}, not a file", contents.kind),
        ));
    }

    let encoding = contents.encoding.as_deref().unwrap_or("none");
    if encoding != "base64" {
        return Err(Error::retrieval(
            path,
            format!("could not decode content of {path}: unsupported encoding {encoding}"),
        ));
    }

    // The API wraps base64 payloads with newlines.
    let packed: String = contents
        .content
        .unwrap_or_default()
        .split_whitespace()
        .collect();
    let bytes = STANDARD
        .decode(packed)
        .map_err(|e| Error::retrieval(path, format!("could not decode content of {path}: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::retrieval(path, format!("could not decode content of {path}: {e}")))
}
