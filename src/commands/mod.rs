//! CLI command implementations.

pub mod list;

pub use list::{run_list, ListConfig};
