// src/error.rs
//! Error types for loading and resolving navigation data.

use navtree_script::ScriptError;
use navtree_traits::SourceError;
use serde_json::Value;
use thiserror::Error;

/// Navigation data that doesn't match the expected shape.
///
/// `at` locates the offending value, e.g. `NAVTREE[0][2][1]`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("{at}: expected an array, found {found}")]
    NotAnArray { at: String, found: &'static str },
    #[error("{at}: expected an object, found {found}")]
    NotAnObject { at: String, found: &'static str },
    #[error("{at}: expected 3 elements (title, link, children), found {found}")]
    Arity { at: String, found: usize },
    #[error("{at}: {field} must be a string, found {found}")]
    NotAString {
        at: String,
        field: &'static str,
        found: &'static str,
    },
    #[error("{at}: children must be null, a subtree key or an array, found {found}")]
    InvalidChildren { at: String, found: &'static str },
    #[error("{at}: expected a non-negative integer position, found {found}")]
    InvalidPosition { at: String, found: String },
    #[error("Missing binding '{0}'")]
    MissingBinding(String),
    #[error("Script parsing failed: {0}")]
    Script(#[from] ScriptError),
}

/// The error type of operations that may fetch further scripts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("Failed to fetch script: {0}")]
    Source(#[from] SourceError),
}

impl From<ScriptError> for NavError {
    fn from(e: ScriptError) -> Self {
        NavError::Format(FormatError::Script(e))
    }
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
