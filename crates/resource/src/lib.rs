//! Script sources for navigation data.
//!
//! This crate provides platform-specific implementations of the
//! `ScriptSource` trait from navtree-traits.
//!
//! ## Available Sources
//!
//! - [`FilesystemScriptSource`]: Loads scripts from a local directory
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory source from navtree-traits:
//! - [`InMemoryScriptSource`]: Pre-populated in-memory storage

mod filesystem;

pub use filesystem::{DEFAULT_EXTENSION, FilesystemScriptSource};

// Re-export the in-memory source from navtree-traits for convenience
pub use navtree_traits::InMemoryScriptSource;
