//! Reader for the script files that carry navigation data.
//!
//! Documentation generators publish their sidebar tables as small scripts
//! made of `var NAME = <literal>;` statements. This crate parses those
//! scripts into `serde_json` values keyed by variable name, without
//! evaluating anything.

pub mod ast;
pub mod error;
mod parser;

// --- Public API ---
pub use ast::{Binding, Script};
pub use error::ScriptError;
pub use parser::{MAX_DEPTH, parse_script, parse_value};
