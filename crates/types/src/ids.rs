//! Newtype wrappers for navigation links and identifiers
//!
//! These types keep the different kinds of strings found in navigation data
//! (node links, page index entries, deferred subtree keys) from being mixed up.

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// A page-relative link target, optionally carrying a `#fragment` anchor
/// (e.g. `api_guide_lines.html#naming`).
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Link(Arc<str>);

impl Link {
    /// Creates a new Link from a string
    pub fn new(link: impl Into<Arc<str>>) -> Self {
        Self(link.into())
    }

    /// Returns the full link, fragment included
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The page part of the link, everything before the first `#`.
    pub fn page(&self) -> &str {
        match self.0.split_once('#') {
            Some((page, _)) => page,
            None => &self.0,
        }
    }

    /// The anchor after the first `#`, if there is one.
    ///
    /// A trailing `#` with nothing after it counts as no fragment.
    pub fn fragment(&self) -> Option<&str> {
        self.0
            .split_once('#')
            .map(|(_, fragment)| fragment)
            .filter(|fragment| !fragment.is_empty())
    }
}

impl From<String> for Link {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for Link {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for Link {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Link {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// An entry of the flat page index
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PageId(Arc<str>);

impl PageId {
    /// Creates a new PageId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this page ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// The name of a subtree stored outside the document that references it.
///
/// The same name is used for the script holding the subtree and for the
/// variable it binds (`modules` -> `modules.js` -> `var modules = [...]`).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SubtreeKey(Arc<str>);

impl SubtreeKey {
    /// Creates a new SubtreeKey from a string
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Returns the string representation of this key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SubtreeKey {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for SubtreeKey {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for SubtreeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubtreeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for SubtreeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
