//! Up-to-date information regarding the set of functions available in
//! YAGPDB templates, discovered by static inspection of the bot's source
//! tree. Nothing is executed: known registration sites are fetched, parsed
//! with a Go grammar, and matched against the structural idioms the bot
//! uses to register template functions.

pub mod cli;
pub mod commands;
pub mod core;
pub mod extractors;
pub mod providers;
pub mod sources;

// Re-export commonly used types
pub use crate::core::ast::{parse_go_source, GoAst};
pub use crate::core::errors::{Error, Result, ResultExt};
pub use crate::core::literals::decode_string_literal;
pub use crate::providers::{ContentProvider, GithubFileProvider, StaticFileProvider};
pub use crate::sources::{
    default_sources, fetch_all, fetch_all_within, BaseContextFuncSource, BuiltinFuncSource,
    PluginExtensionFuncSource, Source,
};
