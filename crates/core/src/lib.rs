//! # navtree-core
//!
//! Platform-agnostic model of generated documentation navigation data.
//!
//! This crate provides:
//! - **tree**: the nested table of contents, traversal and link lookup
//! - **index**: the flat page index and its lookup strategies
//! - **chunk**: link-to-position tables the index is split into
//! - **resolve**: on-demand loading of deferred subtrees
//! - **document**: loading a complete navigation data script
//! - **error**: error types
//!
//! ## Design Principle
//!
//! This crate has **no platform dependencies**: scripts that live outside
//! the main document are fetched through the `ScriptSource` trait.

// Re-export foundation crates
pub use navtree_script as script;
pub use navtree_traits as traits;
pub use navtree_types as types;

pub mod chunk;
pub mod document;
pub mod error;
pub mod index;
pub mod resolve;
pub mod tree;

// Re-export commonly used types from foundation crates
pub use types::{Children, Link, PageId, SubtreeKey, TreeNode};

// Re-export from internal modules
pub use chunk::IndexChunk;
pub use document::{BindingNames, NavDocument, SyncMessages};
pub use error::{FormatError, NavError};
pub use index::{INDEX_BINDING, IndexStrategy, PageIndex};
pub use resolve::{load_subtree, resolve};
pub use tree::{Iter, NavTree, TREE_BINDING, Visit};

// Re-export platform abstraction traits
pub use traits::{InMemoryScriptSource, ScriptSource, SharedScript, SourceError};
