//! Shape matchers: one module per registration idiom found in the target
//! source tree.
//!
//! Each matcher encodes hard-coded knowledge of exactly one structural
//! idiom and extracts the literal string keys it registers. The shared
//! failure policy: a missing named declaration (or a deviation from a shape
//! known to be rigid) is a hard [`crate::core::Error::ShapeMismatch`];
//! individual non-matching statements or entries inside a found declaration
//! contribute zero names silently.

mod builtins;
mod context_funcs;
mod helpers;
mod setup_funcs;

pub use builtins::returned_map_keys;
pub use context_funcs::{map_literal_keys, registration_calls};
pub use setup_funcs::setup_callback_keys;
