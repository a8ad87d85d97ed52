//! Filesystem-based script source for native platforms.
//!
//! Scripts are looked up as `<base>/<name>.<extension>`. Script names come
//! from the navigation data itself, so every resolved path is checked to stay
//! within the base directory (e.g. a deferred key of `../../etc/passwd`).

use log::debug;
use navtree_traits::{ScriptSource, SharedScript, SourceError};
use std::path::{Path, PathBuf};

/// Extension used by generated navigation scripts.
pub const DEFAULT_EXTENSION: &str = "js";

/// A script source that reads scripts from a directory.
///
/// # Security
///
/// Names are canonicalized and verified to remain within the base directory.
/// Anything else is reported as `NotFound`.
#[derive(Debug)]
pub struct FilesystemScriptSource {
    base_path: PathBuf,
    /// Canonicalized base path for security checks
    canonical_base: Option<PathBuf>,
    extension: String,
}

impl FilesystemScriptSource {
    /// Creates a new source reading `<name>.js` files from `base_path`.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail if the directory doesn't exist yet
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Overrides the file extension appended to script names.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Returns the base path for this source.
    pub fn base(&self) -> &Path {
        &self.base_path
    }

    fn file_name(&self, name: &str) -> String {
        if self.extension.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", name, self.extension)
        }
    }

    /// Resolves and validates a script path relative to the base path.
    ///
    /// Returns `None` if the path would escape the base directory.
    fn resolve_path_safe(&self, name: &str) -> Option<PathBuf> {
        let file_name = self.file_name(name);
        let relative = Path::new(&file_name);
        if name.is_empty() || relative.is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(relative);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            if canonical.starts_with(base) {
                return Some(canonical);
            }
            return None;
        }

        // The file doesn't exist (or the base couldn't be canonicalized): reject
        // any parent component outright
        for component in relative.components() {
            if let std::path::Component::ParentDir = component {
                return None;
            }
        }

        Some(full_path)
    }
}

impl ScriptSource for FilesystemScriptSource {
    fn load(&self, name: &str) -> Result<SharedScript, SourceError> {
        let full_path = self
            .resolve_path_safe(name)
            .ok_or_else(|| SourceError::NotFound(format!("{} (path traversal blocked)", name)))?;

        debug!("Loading script '{}' from {}", name, full_path.display());
        let bytes = std::fs::read(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(name.to_string())
            } else {
                SourceError::LoadFailed {
                    name: name.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        String::from_utf8(bytes)
            .map(SharedScript::from)
            .map_err(|_| SourceError::InvalidEncoding(name.to_string()))
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve_path_safe(name)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn base_path(&self) -> Option<&str> {
        self.base_path.to_str()
    }

    fn name(&self) -> &'static str {
        "FilesystemScriptSource"
    }
}
