//! Expansion of child lists, fetching deferred subtrees on demand.

use crate::error::{FormatError, NavError};
use crate::tree::load_nodes;
use log::debug;
use navtree_script::parse_script;
use navtree_traits::ScriptSource;
use navtree_types::{Children, SubtreeKey, TreeNode};
use std::borrow::Cow;

/// The children of `node`.
///
/// Inline children are returned as they are, without copying; a leaf has
/// none. Deferred children are fetched from `source`: the script named after
/// the key must bind a variable of the same name.
pub fn resolve<'a>(
    node: &'a TreeNode,
    source: &dyn ScriptSource,
) -> Result<Cow<'a, [TreeNode]>, NavError> {
    match &node.children {
        Children::Leaf => Ok(Cow::Borrowed(&[])),
        Children::Inline(nodes) => Ok(Cow::Borrowed(nodes)),
        Children::Deferred(key) => load_subtree(key, source).map(Cow::Owned),
    }
}

/// Fetches and loads the subtree stored under `key`.
pub fn load_subtree(
    key: &SubtreeKey,
    source: &dyn ScriptSource,
) -> Result<Vec<TreeNode>, NavError> {
    debug!("Resolving deferred subtree '{}' via {}", key, source.name());
    let text = source.load(key.as_str())?;
    let mut script = parse_script(&text)?;
    let raw = script
        .take(key.as_str())
        .ok_or_else(|| FormatError::MissingBinding(key.to_string()))?;
    Ok(load_nodes(&raw, key.as_str())?)
}
