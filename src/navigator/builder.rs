// src/navigator/builder.rs
use super::config::{BindingNames, DEFAULT_SCRIPT_EXTENSION, IndexStrategy, ScriptLocation};
use super::Navigator;
use crate::error::NavigatorError;
use navtree_core::{InMemoryScriptSource, NavDocument, ScriptSource};
use navtree_resource::FilesystemScriptSource;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A builder for creating a [`Navigator`].
pub struct NavigatorBuilder {
    data: Option<String>,
    data_dir: Option<PathBuf>,
    source: Option<Arc<dyn ScriptSource>>,
    location: ScriptLocation,
    extension: String,
    index_strategy: IndexStrategy,
    names: BindingNames,
}

impl Default for NavigatorBuilder {
    fn default() -> Self {
        Self {
            data: None,
            data_dir: None,
            source: None,
            location: ScriptLocation::default(),
            extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
            index_strategy: IndexStrategy::default(),
            names: BindingNames::default(),
        }
    }
}

impl NavigatorBuilder {
    /// Creates a new `NavigatorBuilder` with default settings.
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads the navigation data script from a file.
    /// Unless configured otherwise, further scripts are looked up next to it.
    pub fn with_data_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, NavigatorError> {
        let path_ref = path.as_ref();
        let text = fs::read_to_string(path_ref).map_err(|e| {
            NavigatorError::Io(io::Error::new(
                e.kind(),
                format!(
                    "Failed to read navigation data from '{}': {}",
                    path_ref.display(),
                    e
                ),
            ))
        })?;
        let dir = match path_ref.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        self.data = Some(text);
        self.data_dir = Some(dir);
        Ok(self)
    }

    /// Uses navigation data held in memory.
    pub fn with_data_source(mut self, text: impl Into<String>) -> Self {
        self.data = Some(text.into());
        self.data_dir = None;
        self
    }

    /// Fetches deferred subtrees and index chunks from `source`.
    /// Takes precedence over any script directory.
    pub fn with_script_source(mut self, source: Arc<dyn ScriptSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Looks up further scripts in `dir` instead of next to the data file.
    pub fn with_script_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.location = ScriptLocation::Directory(dir.as_ref().to_path_buf());
        self
    }

    /// Sets the extension appended to script names on the filesystem.
    pub fn with_script_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Selects how the page index is searched.
    pub fn with_index_strategy(mut self, strategy: IndexStrategy) -> Self {
        self.index_strategy = strategy;
        self
    }

    /// Overrides the variable names looked up in the scripts.
    pub fn with_binding_names(mut self, names: BindingNames) -> Self {
        self.names = names;
        self
    }

    /// Consumes the builder, parses the data and creates the `Navigator`.
    pub fn build(self) -> Result<Navigator, NavigatorError> {
        let data = self.data.as_deref().ok_or_else(|| {
            NavigatorError::Config(
                "No navigation data has been configured. Use `with_data_file` or `with_data_source`."
                    .to_string(),
            )
        })?;
        if self.names.tree.is_empty() {
            return Err(NavigatorError::Config(
                "The tree binding name must not be empty.".to_string(),
            ));
        }

        let document = NavDocument::from_script(data, &self.names)?
            .with_index_strategy(self.index_strategy);
        let source = self.select_source();
        log::debug!(
            "Navigator built with {} ({} tree nodes loaded)",
            source.name(),
            document.tree.len()
        );

        Ok(Navigator::new(document, source, self.names))
    }

    fn select_source(&self) -> Arc<dyn ScriptSource> {
        if let Some(source) = &self.source {
            return Arc::clone(source);
        }
        let dir = match &self.location {
            ScriptLocation::Directory(dir) => Some(dir.clone()),
            ScriptLocation::BesideData => self.data_dir.clone(),
        };
        match dir {
            Some(dir) => Arc::new(
                FilesystemScriptSource::new(dir).with_extension(self.extension.clone()),
            ),
            None => {
                log::info!("No script location configured; deferred subtrees cannot be resolved.");
                Arc::new(InMemoryScriptSource::new())
            }
        }
    }
}
