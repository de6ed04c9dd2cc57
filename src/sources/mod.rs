//! Extraction sources and the aggregating fetch.
//!
//! A source binds one shape matcher to one file path in the target tree.
//! [`fetch_all`] runs the configured sources strictly in order and merges
//! their results; [`fetch_all_within`] bounds the whole run with a single
//! deadline.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::core::ast::{parse_go_source, GoAst};
use crate::core::errors::{Error, Result, ResultExt};
use crate::extractors::{
    map_literal_keys, registration_calls, returned_map_keys, setup_callback_keys,
};
use crate::providers::ContentProvider;

/// A source of template function names.
#[async_trait]
pub trait Source: Send + Sync {
    /// Fetch, parse, and extract the names this source knows about.
    async fn fetch(&self) -> Result<Vec<String>>;
}

/// The builtin sources covering every known registration site in the
/// target tree, in their canonical order.
pub fn default_sources(provider: Arc<dyn ContentProvider>) -> Vec<Box<dyn Source>> {
    vec![
        Box::new(BaseContextFuncSource::new(provider.clone())),
        Box::new(BuiltinFuncSource::new(provider.clone())),
        Box::new(PluginExtensionFuncSource::logs(provider.clone())),
        Box::new(PluginExtensionFuncSource::tickets(provider.clone())),
        Box::new(PluginExtensionFuncSource::commands(provider.clone())),
        Box::new(PluginExtensionFuncSource::custom_commands(provider)),
    ]
}

/// Run every source in order, concatenate their results, and deduplicate
/// by exact name while preserving first-seen order.
///
/// Fail-fast: the first source error aborts the run with no partial output.
pub async fn fetch_all(sources: &[Box<dyn Source>]) -> Result<Vec<String>> {
    let mut funcs = Vec::new();
    for source in sources {
        funcs.extend(source.fetch().await?);
    }

    let mut seen = HashSet::with_capacity(funcs.len());
    let deduplicated: Vec<String> = funcs
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect();
    debug!(count = deduplicated.len(), "aggregated function names");
    Ok(deduplicated)
}

/// [`fetch_all`] bounded by a single overall deadline. When the deadline
/// elapses, in-flight work is dropped and no further fetches are issued.
pub async fn fetch_all_within(
    timeout: Duration,
    sources: &[Box<dyn Source>],
) -> Result<Vec<String>> {
    tokio::time::timeout(timeout, fetch_all(sources))
        .await
        .map_err(|_| Error::Cancelled { after: timeout })?
}

/// Functions defined in the base templating context: registration calls in
/// `baseContextFuncs` plus the `StandardFuncMap` literal.
pub struct BaseContextFuncSource {
    provider: Arc<dyn ContentProvider>,
}

impl BaseContextFuncSource {
    const FILE_PATH: &'static str = "common/templates/context.go";

    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Source for BaseContextFuncSource {
    async fn fetch(&self) -> Result<Vec<String>> {
        const CONTEXT: &str = "fetching base context functions";

        let ast = fetch_and_parse(&*self.provider, Self::FILE_PATH, CONTEXT).await?;

        let mut funcs =
            registration_calls(&ast, "baseContextFuncs", "addContextFunc").context(CONTEXT)?;
        funcs.extend(map_literal_keys(&ast, "StandardFuncMap").context(CONTEXT)?);
        Ok(funcs)
    }
}

/// Builtin template functions returned as a map literal by `builtins`.
pub struct BuiltinFuncSource {
    provider: Arc<dyn ContentProvider>,
}

impl BuiltinFuncSource {
    const FILE_PATH: &'static str = "lib/template/funcs.go";

    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Source for BuiltinFuncSource {
    async fn fetch(&self) -> Result<Vec<String>> {
        const CONTEXT: &str = "fetching builtin functions";

        let ast = fetch_and_parse(&*self.provider, Self::FILE_PATH, CONTEXT).await?;
        returned_map_keys(&ast, "builtins").context(CONTEXT)
    }
}

/// Extension functions a plugin registers through setup callbacks, e.g. the
/// logs plugin adding `pastUsernames` and `pastNicknames`.
pub struct PluginExtensionFuncSource {
    provider: Arc<dyn ContentProvider>,
    path: &'static str,
}

impl PluginExtensionFuncSource {
    pub fn logs(provider: Arc<dyn ContentProvider>) -> Self {
        Self::new(provider, "logs/template_extensions.go")
    }

    pub fn tickets(provider: Arc<dyn ContentProvider>) -> Self {
        Self::new(provider, "tickets/tmplextensions.go")
    }

    pub fn commands(provider: Arc<dyn ContentProvider>) -> Self {
        Self::new(provider, "commands/tmplexec.go")
    }

    pub fn custom_commands(provider: Arc<dyn ContentProvider>) -> Self {
        Self::new(provider, "customcommands/tmplextensions.go")
    }

    pub fn new(provider: Arc<dyn ContentProvider>, path: &'static str) -> Self {
        Self { provider, path }
    }
}

#[async_trait]
impl Source for PluginExtensionFuncSource {
    async fn fetch(&self) -> Result<Vec<String>> {
        const CONTEXT: &str = "fetching plugin extension functions";

        let ast = fetch_and_parse(&*self.provider, self.path, CONTEXT).await?;
        setup_callback_keys(&ast, "RegisterSetupFunc", "ContextFuncs").context(CONTEXT)
    }
}

async fn fetch_and_parse(
    provider: &dyn ContentProvider,
    path: &str,
    context: &str,
) -> Result<GoAst> {
    let source = provider.get(path).await.context(context)?;
    parse_go_source(path, &source).context(context)
}
