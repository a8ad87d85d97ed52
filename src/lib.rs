//! # navtree
//!
//! Loads the navigation data a documentation generator emits for its
//! sidebar (`navtreedata.js` and the scripts it refers to) and answers
//! questions about it: which nodes lead to a page, where a page sits in the
//! flat index, and what a deferred subtree contains.
//!
//! ```ignore
//! use navtree::Navigator;
//!
//! let nav = Navigator::builder().with_data_file("html/navtreedata.js")?.build()?;
//! if let Some(chain) = nav.locate("group__odp__atomic.html")? {
//!     for node in chain {
//!         println!("{}", node.title);
//!     }
//! }
//! ```

pub mod error;
pub mod navigator;

pub use error::NavigatorError;
pub use navigator::config::{BindingNames, IndexStrategy, ScriptLocation};
pub use navigator::{Navigator, NavigatorBuilder};

// Re-export the model so most users only depend on this crate
pub use navtree_core::{
    Children, FormatError, IndexChunk, Link, NavDocument, NavError, NavTree, PageId, PageIndex,
    SubtreeKey, SyncMessages, TreeNode, Visit,
};
pub use navtree_core::{InMemoryScriptSource, ScriptSource, SharedScript, SourceError};
pub use navtree_resource::FilesystemScriptSource;
