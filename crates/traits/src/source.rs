//! ScriptSource trait for abstracting how navigation scripts are fetched.
//!
//! Deferred subtrees and index chunks live in separate scripts. This trait
//! lets the navigation model fetch them by name without being tied to
//! filesystem access.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for script loading operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Script not found: {0}")]
    NotFound(String),

    #[error("Failed to load script '{name}': {message}")]
    LoadFailed { name: String, message: String },

    #[error("Script '{0}' is not valid UTF-8")]
    InvalidEncoding(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err.to_string())
    }
}

/// Shared script text (reference-counted).
pub type SharedScript = Arc<str>;

/// A trait for loading navigation scripts by name.
///
/// A name is the script's base name without extension, which is also the
/// variable the script binds (`modules`, `navtreeindex3`).
///
/// # Implementations
///
/// - `FilesystemScriptSource`: Loads `<name>.js` next to the main data file (navtree-resource)
/// - `InMemoryScriptSource`: Loads from pre-populated memory (always available)
///
/// # Example
///
/// ```ignore
/// let source = InMemoryScriptSource::new();
/// source.add("modules", "var modules = [];")?;
/// let text = source.load("modules")?;
/// ```
pub trait ScriptSource: Send + Sync + Debug {
    /// Load a script by name.
    ///
    /// # Arguments
    ///
    /// * `name` - The script name, without extension
    ///
    /// # Returns
    ///
    /// The script text, or an error if it cannot be loaded.
    fn load(&self, name: &str) -> Result<SharedScript, SourceError>;

    /// Check if a script exists.
    fn exists(&self, name: &str) -> bool;

    /// Get the base path scripts are resolved against.
    ///
    /// Returns `None` if the source doesn't use path-based resolution.
    fn base_path(&self) -> Option<&str> {
        None
    }

    /// Returns a human-readable name for this source (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory script source.
///
/// Scripts must be added before use. Useful for tests and for embedding
/// navigation data in a binary.
#[derive(Debug, Default)]
pub struct InMemoryScriptSource {
    scripts: RwLock<HashMap<String, SharedScript>>,
}

impl InMemoryScriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a script under the given name, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(
        &self,
        name: impl Into<String>,
        text: impl Into<SharedScript>,
    ) -> Result<(), SourceError> {
        let name = name.into();
        let mut scripts = self.scripts.write().map_err(|_| SourceError::LoadFailed {
            name: name.clone(),
            message: "script store lock poisoned".to_string(),
        })?;
        scripts.insert(name, text.into());
        Ok(())
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with(
        self,
        name: impl Into<String>,
        text: impl Into<SharedScript>,
    ) -> Result<Self, SourceError> {
        self.add(name, text)?;
        Ok(self)
    }

    /// Remove a script from the store.
    ///
    /// Returns `None` if the lock is poisoned or the script doesn't exist.
    pub fn remove(&self, name: &str) -> Option<SharedScript> {
        self.scripts.write().ok()?.remove(name)
    }

    /// Get the number of scripts in the store.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.scripts.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    ///
    /// Returns `true` if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.scripts.read().map(|s| s.is_empty()).unwrap_or(true)
    }
}

impl ScriptSource for InMemoryScriptSource {
    fn load(&self, name: &str) -> Result<SharedScript, SourceError> {
        let scripts = self.scripts.read().map_err(|_| SourceError::LoadFailed {
            name: name.to_string(),
            message: "script store lock poisoned".to_string(),
        })?;
        scripts
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }

    fn exists(&self, name: &str) -> bool {
        self.scripts
            .read()
            .map(|s| s.contains_key(name))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryScriptSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_source_add_and_load() {
        let source = InMemoryScriptSource::new();
        source.add("modules", "var modules = [];").unwrap();

        let text = source.load("modules").unwrap();
        assert_eq!(&*text, "var modules = [];");
    }

    #[test]
    fn test_in_memory_source_not_found() {
        let source = InMemoryScriptSource::new();
        let result = source.load("navtreeindex0");
        assert_eq!(result, Err(SourceError::NotFound("navtreeindex0".to_string())));
    }

    #[test]
    fn test_in_memory_source_exists_and_remove() {
        let source = InMemoryScriptSource::new()
            .with("files_dup", "var files_dup = [];")
            .unwrap();

        assert!(source.exists("files_dup"));
        assert!(source.remove("files_dup").is_some());
        assert!(!source.exists("files_dup"));
        assert!(source.remove("files_dup").is_none());
    }

    #[test]
    fn test_in_memory_source_overwrite() {
        let source = InMemoryScriptSource::new();
        source.add("a", "var a = 1;").unwrap();
        source.add("a", "var a = 2;").unwrap();

        assert_eq!(&*source.load("a").unwrap(), "var a = 2;");
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_in_memory_source_metadata() {
        let source = InMemoryScriptSource::new();
        assert!(source.is_empty());
        assert!(source.base_path().is_none());
        assert_eq!(source.name(), "InMemoryScriptSource");
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::LoadFailed {
            name: "modules".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("modules"));
        assert!(err.to_string().contains("permission denied"));

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err: SourceError = io_err.into();
        assert!(matches!(err, SourceError::Io(_)));
        assert!(err.to_string().contains("disk on fire"));
    }
}
