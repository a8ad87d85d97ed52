// Reuse the lookup and naming options defined in the core crate.
pub use navtree_core::{BindingNames, IndexStrategy};

/// Extension of generated navigation scripts.
pub const DEFAULT_SCRIPT_EXTENSION: &str = navtree_resource::DEFAULT_EXTENSION;

/// Where scripts referenced by the main document are fetched from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScriptLocation {
    /// The directory holding the data file, or nowhere for in-memory data. (Default)
    #[default]
    BesideData,
    /// A specific directory.
    Directory(std::path::PathBuf),
}
