//! Core types shared across the crate: the parsed source representation,
//! string literal decoding, and the error taxonomy.

pub mod ast;
pub mod errors;
pub mod literals;

pub use ast::{parse_go_source, GoAst};
pub use errors::{Error, Result, ResultExt};
pub use literals::decode_string_literal;
