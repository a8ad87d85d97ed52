//! Index chunks: tables mapping a link to the position path of its tree node.
//!
//! A large index is split across `navtreeindex<N>` scripts, each binding
//! `NAVTREEINDEX<N>`. Entry N of the [`PageIndex`](crate::PageIndex) holds the
//! first link of chunk N.

use crate::error::{FormatError, kind_of};
use log::debug;
use navtree_script::parse_script;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexChunk {
    paths: HashMap<String, Vec<usize>>,
}

impl IndexChunk {
    /// Loads a chunk document: an object of link to position array.
    pub fn load(raw: &Value, name: &str) -> Result<Self, FormatError> {
        let entries = raw.as_object().ok_or_else(|| FormatError::NotAnObject {
            at: name.to_string(),
            found: kind_of(raw),
        })?;

        let mut paths = HashMap::with_capacity(entries.len());
        for (link, positions) in entries {
            let at = format!("{}[{:?}]", name, link);
            let items = positions.as_array().ok_or_else(|| FormatError::NotAnArray {
                at: at.clone(),
                found: kind_of(positions),
            })?;
            let path = items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|n| usize::try_from(n).ok())
                        .ok_or_else(|| FormatError::InvalidPosition {
                            at: at.clone(),
                            found: item.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            paths.insert(link.clone(), path);
        }

        debug!("Loaded index chunk '{}' with {} links", name, paths.len());
        Ok(Self { paths })
    }

    /// Parses a chunk script and loads the chunk bound to `binding`.
    pub fn from_script(source: &str, binding: &str) -> Result<Self, FormatError> {
        let mut script = parse_script(source)?;
        let raw = script
            .take(binding)
            .ok_or_else(|| FormatError::MissingBinding(binding.to_string()))?;
        Self::load(&raw, binding)
    }

    /// The position path recorded for exactly `link`.
    pub fn positions(&self, link: &str) -> Option<&[usize]> {
        self.paths.get(link).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
