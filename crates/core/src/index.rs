//! The flat page index used to keep the tree panel in sync with the shown page.

use crate::error::{FormatError, kind_of};
use log::{debug, trace, warn};
use navtree_types::PageId;
use serde::Serialize;
use serde_json::Value;

/// Default binding name of the page index in a navigation data script.
pub const INDEX_BINDING: &str = "NAVTREEINDEX";

/// How [`PageIndex`] lookups search the entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexStrategy {
    /// Binary search when the entries were verified to be sorted at load,
    /// linear scan otherwise. (Default)
    #[default]
    Auto,
    /// Always scan linearly, whatever the order of the entries.
    Linear,
}

/// An ordered list of page identifiers.
///
/// Duplicates are allowed. Sortedness is checked once at construction and
/// only then used to speed up lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageIndex {
    entries: Vec<PageId>,
    #[serde(skip)]
    sorted: bool,
    #[serde(skip)]
    strategy: IndexStrategy,
}

impl PageIndex {
    pub fn new(entries: Vec<PageId>) -> Self {
        let sorted = entries.is_sorted();
        if !sorted {
            warn!(
                "Page index of {} entries is not sorted; lookups will scan linearly",
                entries.len()
            );
        }
        Self {
            entries,
            sorted,
            strategy: IndexStrategy::default(),
        }
    }

    /// Loads an index document: an array of strings.
    pub fn load(raw: &Value) -> Result<Self, FormatError> {
        Self::load_named(raw, INDEX_BINDING)
    }

    /// Like [`load`](Self::load), with `name` used to locate errors.
    pub fn load_named(raw: &Value, name: &str) -> Result<Self, FormatError> {
        let items = raw.as_array().ok_or_else(|| FormatError::NotAnArray {
            at: name.to_string(),
            found: kind_of(raw),
        })?;

        let entries = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(PageId::new)
                    .ok_or_else(|| FormatError::NotAString {
                        at: format!("{}[{}]", name, i),
                        field: "page identifier",
                        found: kind_of(item),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Loaded page index '{}' with {} entries", name, entries.len());
        Ok(Self::new(entries))
    }

    pub fn with_strategy(mut self, strategy: IndexStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> IndexStrategy {
        self.strategy
    }

    /// Whether the entries are in non-decreasing byte order.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Whether lookups use binary search.
    pub fn uses_binary_search(&self) -> bool {
        self.sorted && self.strategy == IndexStrategy::Auto
    }

    /// Position of the first entry equal to `id`.
    ///
    /// The result doesn't depend on the search strategy.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        let found = if self.uses_binary_search() {
            let pos = self.entries.partition_point(|e| e.as_str() < id);
            self.entries
                .get(pos)
                .filter(|e| e.as_str() == id)
                .map(|_| pos)
        } else {
            self.entries.iter().position(|e| e.as_str() == id)
        };
        trace!("index_of('{}') -> {:?}", id, found);
        found
    }

    /// Position of the entry starting the index chunk that covers `link`.
    ///
    /// Each entry is the first link of one chunk, so the covering chunk is the
    /// greatest entry not after `link` (the last one among equal entries).
    /// Returns `None` when `link` sorts before every entry.
    pub fn chunk_for(&self, link: &str) -> Option<usize> {
        let found = if self.uses_binary_search() {
            self.entries
                .partition_point(|e| e.as_str() <= link)
                .checked_sub(1)
        } else {
            self.entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.as_str() <= link)
                .max_by(|(_, a), (_, b)| a.cmp(b))
                .map(|(pos, _)| pos)
        };
        trace!("chunk_for('{}') -> {:?}", link, found);
        found
    }

    pub fn get(&self, pos: usize) -> Option<&PageId> {
        self.entries.get(pos)
    }

    pub fn entries(&self) -> &[PageId] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageId> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
