//! A whole navigation data script: tree, page index and panel captions.

use crate::chunk::IndexChunk;
use crate::error::{FormatError, NavError, kind_of};
use crate::index::{INDEX_BINDING, IndexStrategy, PageIndex};
use crate::tree::{NavTree, TREE_BINDING};
use log::debug;
use navtree_script::{Script, parse_script};
use navtree_traits::ScriptSource;
use serde::Serialize;
use serde_json::Value;

/// Variable and script names used by a navigation data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingNames {
    pub tree: String,
    pub index: String,
    pub sync_on: String,
    pub sync_off: String,
    /// Script name prefix of index chunks, followed by the chunk number.
    pub chunk_prefix: String,
}

impl Default for BindingNames {
    fn default() -> Self {
        Self {
            tree: TREE_BINDING.to_string(),
            index: INDEX_BINDING.to_string(),
            sync_on: "SYNCONMSG".to_string(),
            sync_off: "SYNCOFFMSG".to_string(),
            chunk_prefix: "navtreeindex".to_string(),
        }
    }
}

impl BindingNames {
    /// Name of the script holding chunk `n` (`navtreeindex3`).
    pub fn chunk_script(&self, n: usize) -> String {
        format!("{}{}", self.chunk_prefix, n)
    }

    /// Variable bound by chunk `n` (`NAVTREEINDEX3`).
    pub fn chunk_binding(&self, n: usize) -> String {
        format!("{}{}", self.index, n)
    }
}

/// Captions of the toggle that links the tree panel to the page panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncMessages {
    /// Shown while synchronisation is on.
    pub on: String,
    /// Shown while synchronisation is off.
    pub off: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavDocument {
    pub tree: NavTree,
    pub index: Option<PageIndex>,
    pub sync: Option<SyncMessages>,
}

impl NavDocument {
    /// Parses a navigation data script.
    ///
    /// The tree binding is required. The index is optional, as are the
    /// captions, though those must come as a pair.
    pub fn from_script(source: &str, names: &BindingNames) -> Result<Self, FormatError> {
        Self::from_parsed(parse_script(source)?, names)
    }

    pub fn from_parsed(mut script: Script, names: &BindingNames) -> Result<Self, FormatError> {
        let raw_tree = script
            .take(&names.tree)
            .ok_or_else(|| FormatError::MissingBinding(names.tree.clone()))?;
        let tree = NavTree::load_named(&raw_tree, &names.tree)?;

        let index = script
            .take(&names.index)
            .map(|raw| PageIndex::load_named(&raw, &names.index))
            .transpose()?;

        let on = script.take(&names.sync_on);
        let off = script.take(&names.sync_off);
        let sync = match (on, off) {
            (None, None) => None,
            (Some(on), Some(off)) => Some(SyncMessages {
                on: caption(on, &names.sync_on)?,
                off: caption(off, &names.sync_off)?,
            }),
            (Some(_), None) => return Err(FormatError::MissingBinding(names.sync_off.clone())),
            (None, Some(_)) => return Err(FormatError::MissingBinding(names.sync_on.clone())),
        };

        for unused in script.names() {
            debug!("Ignoring binding '{}'", unused);
        }

        Ok(Self { tree, index, sync })
    }

    pub fn with_index_strategy(mut self, strategy: IndexStrategy) -> Self {
        self.index = self.index.map(|index| index.with_strategy(strategy));
        self
    }

    /// Fetches the index chunk that covers `link`, if the document has an index.
    ///
    /// Returns `Ok(None)` when there is no index or `link` sorts before it.
    pub fn chunk_for(
        &self,
        link: &str,
        source: &dyn ScriptSource,
        names: &BindingNames,
    ) -> Result<Option<IndexChunk>, NavError> {
        let Some(n) = self.index.as_ref().and_then(|index| index.chunk_for(link)) else {
            return Ok(None);
        };
        let script_name = names.chunk_script(n);
        debug!("Link '{}' is covered by index chunk '{}'", link, script_name);
        let text = source.load(&script_name)?;
        Ok(Some(IndexChunk::from_script(&text, &names.chunk_binding(n))?))
    }
}

fn caption(value: Value, name: &str) -> Result<String, FormatError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(FormatError::NotAString {
            at: name.to_string(),
            field: "caption",
            found: kind_of(&other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navtree_traits::InMemoryScriptSource;

    const DATA: &str = r#"
var NAVTREE =
[
  [ "API Reference Manual", "index.html", [
    [ "Introduction", "index.html#sec_1", null ],
    [ "Modules", "modules.html", "modules" ]
  ] ]
];

var NAVTREEINDEX =
[
"annotated.html",
"group__odp__atomic.html"
];

var SYNCONMSG = 'click to disable panel synchronisation';
var SYNCOFFMSG = 'click to enable panel synchronisation';"#;

    #[test]
    fn test_from_script() {
        let doc = NavDocument::from_script(DATA, &BindingNames::default()).unwrap();
        assert_eq!(doc.tree.len(), 3);
        assert_eq!(doc.index.as_ref().map(PageIndex::len), Some(2));
        assert_eq!(
            doc.sync,
            Some(SyncMessages {
                on: "click to disable panel synchronisation".to_string(),
                off: "click to enable panel synchronisation".to_string(),
            })
        );
    }

    #[test]
    fn test_tree_only_document() {
        let doc = NavDocument::from_script(
            r#"var NAVTREE = [ [ "A", "a.html", null ] ];"#,
            &BindingNames::default(),
        )
        .unwrap();
        assert!(doc.index.is_none());
        assert!(doc.sync.is_none());
    }

    #[test]
    fn test_missing_tree() {
        let err = NavDocument::from_script("var NAVTREEINDEX = [];", &BindingNames::default())
            .unwrap_err();
        assert_eq!(err, FormatError::MissingBinding("NAVTREE".to_string()));
    }

    #[test]
    fn test_unpaired_caption() {
        let err = NavDocument::from_script(
            "var NAVTREE = []; var SYNCONMSG = 'on';",
            &BindingNames::default(),
        )
        .unwrap_err();
        assert_eq!(err, FormatError::MissingBinding("SYNCOFFMSG".to_string()));
    }

    #[test]
    fn test_custom_names() {
        let names = BindingNames {
            tree: "TOC".to_string(),
            ..BindingNames::default()
        };
        let doc = NavDocument::from_script("var TOC = [];", &names).unwrap();
        assert!(doc.tree.is_empty());
        assert_eq!(names.chunk_script(2), "navtreeindex2");
        assert_eq!(names.chunk_binding(2), "NAVTREEINDEX2");
    }

    #[test]
    fn test_chunk_for_fetches_covering_chunk() {
        let doc = NavDocument::from_script(DATA, &BindingNames::default()).unwrap();
        let source = InMemoryScriptSource::new()
            .with("navtreeindex0", r#"var NAVTREEINDEX0 = { "annotated.html": [0, 3] };"#)
            .unwrap()
            .with("navtreeindex1", r#"var NAVTREEINDEX1 = { "modules.html": [0, 1] };"#)
            .unwrap();

        let names = BindingNames::default();
        let chunk = doc.chunk_for("modules.html", &source, &names).unwrap().unwrap();
        assert_eq!(chunk.positions("modules.html"), Some(&[0, 1][..]));

        assert!(doc.chunk_for("aaa.html", &source, &names).unwrap().is_none());
    }
}
