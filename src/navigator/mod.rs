//! The query facade over a loaded navigation data set.
//!
//! A [`Navigator`] owns the parsed document and the source used to fetch
//! the scripts it refers to, so callers can expand deferred subtrees and
//! locate pages through the chunked index without handling scripts
//! themselves.

mod builder;
pub mod config;

pub use builder::NavigatorBuilder;

use crate::error::NavigatorError;
use navtree_core::{
    BindingNames, Children, Link, NavDocument, NavTree, PageIndex, ScriptSource, SubtreeKey,
    SyncMessages, TreeNode, resolve,
};
use std::borrow::Cow;
use std::sync::Arc;

/// Immutable after construction; shareable across threads.
#[derive(Debug, Clone)]
pub struct Navigator {
    document: NavDocument,
    source: Arc<dyn ScriptSource>,
    names: BindingNames,
}

impl Navigator {
    pub fn new(document: NavDocument, source: Arc<dyn ScriptSource>, names: BindingNames) -> Self {
        Self {
            document,
            source,
            names,
        }
    }

    pub fn builder() -> NavigatorBuilder {
        NavigatorBuilder::new()
    }

    pub fn document(&self) -> &NavDocument {
        &self.document
    }

    pub fn tree(&self) -> &NavTree {
        &self.document.tree
    }

    pub fn index(&self) -> Option<&PageIndex> {
        self.document.index.as_ref()
    }

    pub fn sync_messages(&self) -> Option<&SyncMessages> {
        self.document.sync.as_ref()
    }

    pub fn source(&self) -> &dyn ScriptSource {
        self.source.as_ref()
    }

    /// Chain of loaded nodes leading to the first node linking to `target`.
    pub fn find_by_link(&self, target: &str) -> Option<Vec<&TreeNode>> {
        self.document.tree.find_by_link(target)
    }

    /// Position of `id` in the page index, `None` if absent or there is no index.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index().and_then(|index| index.index_of(id))
    }

    /// The children of `node`, fetching them if they are deferred.
    pub fn children<'a>(&self, node: &'a TreeNode) -> Result<Cow<'a, [TreeNode]>, NavigatorError> {
        Ok(resolve(node, self.source.as_ref())?)
    }

    /// Finds the node for `link` through the chunked index, fetching
    /// deferred subtrees along its path.
    ///
    /// Falls back to the page without its anchor when the exact link isn't
    /// indexed. Returns the owned chain from a root to the node.
    pub fn locate(&self, link: &str) -> Result<Option<Vec<TreeNode>>, NavigatorError> {
        if let Some(chain) = self.locate_exact(link)? {
            return Ok(Some(chain));
        }
        let parsed = Link::new(link);
        if parsed.page() != link {
            log::debug!("'{}' is not indexed; retrying with page '{}'", link, parsed.page());
            return self.locate_exact(parsed.page());
        }
        Ok(None)
    }

    fn locate_exact(&self, link: &str) -> Result<Option<Vec<TreeNode>>, NavigatorError> {
        let Some(chunk) = self
            .document
            .chunk_for(link, self.source.as_ref(), &self.names)?
        else {
            return Ok(None);
        };
        match chunk.positions(link) {
            Some(positions) => self.walk(positions),
            None => Ok(None),
        }
    }

    /// Follows child positions from the roots, resolving deferred children.
    fn walk(&self, positions: &[usize]) -> Result<Option<Vec<TreeNode>>, NavigatorError> {
        let mut chain: Vec<TreeNode> = Vec::with_capacity(positions.len());
        for &pos in positions {
            let node = {
                let level: Cow<'_, [TreeNode]> = match chain.last() {
                    None => Cow::Borrowed(self.document.tree.roots()),
                    Some(parent) => resolve(parent, self.source.as_ref())?,
                };
                match level.get(pos) {
                    Some(node) => node.clone(),
                    None => return Ok(None),
                }
            };
            chain.push(node);
        }
        Ok((!chain.is_empty()).then_some(chain))
    }

    /// A copy of the tree with every deferred subtree fetched and inlined.
    ///
    /// A key that refers back to one of its own ancestors is left deferred.
    pub fn expand(&self) -> Result<NavTree, NavigatorError> {
        let mut ancestry = Vec::new();
        let roots = self.expand_nodes(self.document.tree.roots(), &mut ancestry)?;
        Ok(NavTree::new(roots))
    }

    fn expand_nodes(
        &self,
        nodes: &[TreeNode],
        ancestry: &mut Vec<SubtreeKey>,
    ) -> Result<Vec<TreeNode>, NavigatorError> {
        nodes
            .iter()
            .map(|node| -> Result<TreeNode, NavigatorError> {
                let children = match &node.children {
                    Children::Leaf => Children::Leaf,
                    Children::Inline(children) => {
                        Children::Inline(self.expand_nodes(children, ancestry)?)
                    }
                    Children::Deferred(key) if ancestry.contains(key) => {
                        log::warn!("Subtree '{}' refers to itself; leaving it deferred", key);
                        Children::Deferred(key.clone())
                    }
                    Children::Deferred(key) => {
                        let fetched = resolve(node, self.source.as_ref())?;
                        ancestry.push(key.clone());
                        let expanded = self.expand_nodes(&fetched, ancestry);
                        ancestry.pop();
                        Children::Inline(expanded?)
                    }
                };
                Ok(TreeNode {
                    title: node.title.clone(),
                    link: node.link.clone(),
                    children,
                })
            })
            .collect()
    }
}
