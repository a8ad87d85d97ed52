use crate::ids::{Link, SubtreeKey};
use serde::Serialize;

/// The child list of a navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Children {
    /// No children (`null` in the source data).
    #[default]
    Leaf,
    /// Children written out in place.
    Inline(Vec<TreeNode>),
    /// Children stored in a separate named table, fetched on demand.
    Deferred(SubtreeKey),
}

impl Children {
    /// Inline children, or `None` for leaves and deferred lists.
    pub fn inline(&self) -> Option<&[TreeNode]> {
        match self {
            Children::Inline(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// The indirection key, when the children live elsewhere.
    pub fn deferred_key(&self) -> Option<&SubtreeKey> {
        match self {
            Children::Deferred(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Children::Leaf)
    }
}

/// One entry of a table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Display title.
    pub title: String,
    /// Target page, possibly with an anchor.
    pub link: Link,
    pub children: Children,
}

impl TreeNode {
    pub fn new(title: impl Into<String>, link: impl Into<Link>, children: Children) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            children,
        }
    }

    /// A node without children.
    pub fn leaf(title: impl Into<String>, link: impl Into<Link>) -> Self {
        Self::new(title, link, Children::Leaf)
    }
}
