//! The navigation tree: loading, traversal and link lookup.

use crate::error::{FormatError, kind_of};
use log::{debug, trace};
use navtree_script::parse_script;
use navtree_types::{Children, Link, SubtreeKey, TreeNode};
use serde::Serialize;
use serde_json::Value;

/// Default binding name of the tree in a navigation data script.
pub const TREE_BINDING: &str = "NAVTREE";

/// A loaded table of contents. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct NavTree {
    roots: Vec<TreeNode>,
}

impl NavTree {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    /// Loads a tree document: an array of `[title, link, children]` entries.
    pub fn load(raw: &Value) -> Result<Self, FormatError> {
        Self::load_named(raw, TREE_BINDING)
    }

    /// Like [`load`](Self::load), with `name` used to locate errors.
    pub fn load_named(raw: &Value, name: &str) -> Result<Self, FormatError> {
        let roots = load_nodes(raw, name)?;
        debug!("Loaded navigation tree '{}' with {} root(s)", name, roots.len());
        Ok(Self::new(roots))
    }

    /// Parses a script and loads the tree bound to `binding`.
    pub fn from_script(source: &str, binding: &str) -> Result<Self, FormatError> {
        let mut script = parse_script(source)?;
        let raw = script
            .take(binding)
            .ok_or_else(|| FormatError::MissingBinding(binding.to_string()))?;
        Self::load_named(&raw, binding)
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Pre-order traversal of all loaded nodes. Deferred subtrees are not fetched.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![self.roots.iter()],
        }
    }

    /// Number of loaded nodes.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Finds the first node, in pre-order, whose link equals `target` verbatim.
    ///
    /// Returns the chain of nodes from a root down to the match.
    pub fn find_by_link(&self, target: &str) -> Option<Vec<&TreeNode>> {
        let found = search(&self.roots, target, true).pop();
        trace!("find_by_link('{}') -> {}", target, found.is_some());
        found
    }

    /// Every chain leading to a node whose link equals `target`, in pre-order.
    pub fn find_all_by_link(&self, target: &str) -> Vec<Vec<&TreeNode>> {
        search(&self.roots, target, false)
    }

    /// Follows child positions from the roots.
    ///
    /// `[0, 2]` is the third child of the first root. Returns `None` when a
    /// position is out of range, the path is empty, or the path runs into
    /// a deferred child list.
    pub fn node_at(&self, positions: &[usize]) -> Option<Vec<&TreeNode>> {
        if positions.is_empty() {
            return None;
        }
        let mut chain = Vec::with_capacity(positions.len());
        let mut level: &[TreeNode] = &self.roots;
        for &pos in positions {
            let node = level.get(pos)?;
            chain.push(node);
            level = node.children.inline().unwrap_or_default();
        }
        Some(chain)
    }

    /// Keys of every deferred subtree referenced by the loaded nodes.
    pub fn deferred_keys(&self) -> Vec<&SubtreeKey> {
        self.iter()
            .filter_map(|visit| visit.node.children.deferred_key())
            .collect()
    }
}

impl<'a> IntoIterator for &'a NavTree {
    type Item = Visit<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// A node reached during traversal, with its depth (roots are at 0).
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a TreeNode,
    pub depth: usize,
}

/// Pre-order iterator over a [`NavTree`].
pub struct Iter<'a> {
    stack: Vec<std::slice::Iter<'a, TreeNode>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Visit<'a>> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let next = self.stack.last_mut()?.next();
            match next {
                Some(node) => {
                    if let Children::Inline(children) = &node.children {
                        self.stack.push(children.iter());
                    }
                    return Some(Visit { node, depth });
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Chains to nodes linking to `target`, in pre-order. Walks with an explicit
/// stack so the depth of the tree doesn't matter.
fn search<'a>(
    roots: &'a [TreeNode],
    target: &str,
    first_only: bool,
) -> Vec<Vec<&'a TreeNode>> {
    let mut hits = Vec::new();
    let mut path: Vec<&'a TreeNode> = Vec::new();
    let mut stack = vec![roots.iter()];
    while let Some(level) = stack.last_mut() {
        let Some(node) = level.next() else {
            stack.pop();
            continue;
        };
        path.truncate(stack.len() - 1);
        path.push(node);
        if node.link == *target {
            hits.push(path.clone());
            if first_only {
                break;
            }
        }
        if let Children::Inline(children) = &node.children {
            stack.push(children.iter());
        }
    }
    hits
}

// --- Loading ---

/// Loads an array of entries; `at` names the array for error messages.
pub(crate) fn load_nodes(raw: &Value, at: &str) -> Result<Vec<TreeNode>, FormatError> {
    let entries = raw.as_array().ok_or_else(|| FormatError::NotAnArray {
        at: at.to_string(),
        found: kind_of(raw),
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| load_node(entry, &format!("{}[{}]", at, i)))
        .collect()
}

fn load_node(raw: &Value, at: &str) -> Result<TreeNode, FormatError> {
    let fields = raw.as_array().ok_or_else(|| FormatError::NotAnArray {
        at: at.to_string(),
        found: kind_of(raw),
    })?;
    let [title, link, children] = fields.as_slice() else {
        return Err(FormatError::Arity {
            at: at.to_string(),
            found: fields.len(),
        });
    };

    let title = string_field(title, at, "title")?;
    let link = string_field(link, at, "link")?;
    let children = match children {
        Value::Null => Children::Leaf,
        Value::String(key) => Children::Deferred(SubtreeKey::new(key.as_str())),
        Value::Array(_) => Children::Inline(load_nodes(children, &format!("{}[2]", at))?),
        other => {
            return Err(FormatError::InvalidChildren {
                at: at.to_string(),
                found: kind_of(other),
            });
        }
    };

    Ok(TreeNode {
        title: title.to_string(),
        link: Link::new(link),
        children,
    })
}

fn string_field<'v>(
    value: &'v Value,
    at: &str,
    field: &'static str,
) -> Result<&'v str, FormatError> {
    value.as_str().ok_or_else(|| FormatError::NotAString {
        at: at.to_string(),
        field,
        found: kind_of(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NavTree {
        NavTree::load(&json!([
            ["Manual", "index.html", [
                ["Introduction", "index.html#sec_1", null],
                ["Guidelines", "api_guide_lines.html", [
                    ["Naming", "api_guide_lines.html#naming", null],
                    ["Get", "api_guide_lines.html#get", null]
                ]],
                ["Modules", "modules.html", "modules"]
            ]],
            ["Appendix", "appendix.html", null]
        ]))
        .unwrap()
    }

    #[test]
    fn test_load_single_leaf() {
        let tree = NavTree::load(&json!([["A", "a.html", null]])).unwrap();
        let nodes: Vec<_> = tree.iter().map(|v| v.node).collect();
        assert_eq!(nodes, vec![&TreeNode::leaf("A", "a.html")]);
    }

    #[test]
    fn test_traversal_is_preorder_with_depths() {
        let tree = sample();
        let visited: Vec<_> = tree
            .iter()
            .map(|v| (v.node.title.as_str(), v.depth))
            .collect();
        assert_eq!(
            visited,
            vec![
                ("Manual", 0),
                ("Introduction", 1),
                ("Guidelines", 1),
                ("Naming", 2),
                ("Get", 2),
                ("Modules", 1),
                ("Appendix", 0),
            ]
        );
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_deferred_children_are_kept_as_keys() {
        let tree = sample();
        let keys: Vec<_> = tree.deferred_keys().iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["modules"]);
    }

    #[test]
    fn test_find_by_link_returns_chain() {
        let tree = sample();
        let chain = tree.find_by_link("api_guide_lines.html#get").unwrap();
        let titles: Vec<_> = chain.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Manual", "Guidelines", "Get"]);
    }

    #[test]
    fn test_find_by_link_miss() {
        let tree = sample();
        assert!(tree.find_by_link("z.html").is_none());
        // Links are compared verbatim, fragments included
        assert!(tree.find_by_link("api_guide_lines.html#nope").is_none());
    }

    #[test]
    fn test_find_by_link_prefers_first_in_preorder() {
        let tree = NavTree::load(&json!([
            ["Data Structures", "annotated.html", [
                ["Data Structures", "annotated.html", "annotated_dup"]
            ]]
        ]))
        .unwrap();
        assert_eq!(tree.find_by_link("annotated.html").unwrap().len(), 1);

        let all = tree.find_all_by_link("annotated.html");
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].len(), 2);
    }

    #[test]
    fn test_find_by_link_in_deep_tree() {
        let mut node = TreeNode::leaf("leaf", "leaf.html");
        for depth in (0..1_000).rev() {
            node = TreeNode::new(
                format!("n{}", depth),
                format!("n{}.html", depth),
                Children::Inline(vec![node]),
            );
        }
        let tree = NavTree::new(vec![node]);

        let chain = tree.find_by_link("leaf.html").unwrap();
        assert_eq!(chain.len(), 1_001);
        assert_eq!(chain[0].title, "n0");
        assert_eq!(tree.find_all_by_link("n999.html").len(), 1);
        assert!(tree.find_by_link("n1000.html").is_none());
    }

    #[test]
    fn test_node_at() {
        let tree = sample();
        let chain = tree.node_at(&[0, 1, 0]).unwrap();
        assert_eq!(chain.last().unwrap().link.as_str(), "api_guide_lines.html#naming");
        assert!(tree.node_at(&[0, 9]).is_none());
        assert!(tree.node_at(&[]).is_none());
        // Position inside a deferred list needs resolving first
        assert!(tree.node_at(&[0, 2, 0]).is_none());
    }

    #[test]
    fn test_non_string_title_rejected() {
        let err = NavTree::load(&json!([[123, "x.html", null]])).unwrap_err();
        assert_eq!(
            err,
            FormatError::NotAString {
                at: "NAVTREE[0]".to_string(),
                field: "title",
                found: "a number",
            }
        );
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let err = NavTree::load(&json!([["A", "a.html"]])).unwrap_err();
        assert!(matches!(err, FormatError::Arity { found: 2, .. }));
    }

    #[test]
    fn test_nested_error_location() {
        let err = NavTree::load(&json!([["A", "a.html", [["B", null, null]]]])).unwrap_err();
        assert_eq!(
            err,
            FormatError::NotAString {
                at: "NAVTREE[0][2][0]".to_string(),
                field: "link",
                found: "null",
            }
        );
    }

    #[test]
    fn test_invalid_children_rejected() {
        let err = NavTree::load(&json!([["A", "a.html", 7]])).unwrap_err();
        assert!(matches!(err, FormatError::InvalidChildren { .. }));
    }

    #[test]
    fn test_root_must_be_array() {
        let err = NavTree::load(&json!({ "A": "a.html" })).unwrap_err();
        assert!(matches!(err, FormatError::NotAnArray { found: "an object", .. }));
    }

    #[test]
    fn test_from_script() {
        let tree =
            NavTree::from_script(r#"var NAVTREE = [ [ "A", "a.html", null ] ];"#, "NAVTREE")
                .unwrap();
        assert_eq!(tree.roots().len(), 1);

        let err = NavTree::from_script("var OTHER = [];", "NAVTREE").unwrap_err();
        assert_eq!(err, FormatError::MissingBinding("NAVTREE".to_string()));
    }
}
