pub mod source;

pub use source::{InMemoryScriptSource, ScriptSource, SharedScript, SourceError};
