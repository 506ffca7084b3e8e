use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Closed set of destinations a node can navigate to.
///
/// Implementors are plain enums. The `as_str()` value is used as a path
/// segment and in string-keyed operations, so once published it must not
/// be renamed.
pub trait NavTarget:
    Clone + Eq + Hash + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// All variants, in declaration order.
    fn all() -> &'static [Self];

    /// Stable key for paths and dispatch.
    fn as_str(&self) -> &'static str;

    /// Parse from a key. Unknown keys return `None`.
    fn parse(key: &str) -> Option<Self> {
        Self::all().iter().find(|t| t.as_str() == key).cloned()
    }
}

/// Location of a node in the tree, from the root down.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub const ROOT: &'static str = "root";

    pub fn root() -> Self {
        Self(vec![Self::ROOT.to_string()])
    }

    /// Parse the `a/b/c` display form. Empty segments are skipped.
    pub fn parse(s: &str) -> Option<Self> {
        let segments: Vec<String> = s
            .split('/')
            .filter(|seg| !seg.is_empty())
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(Self(segments))
        }
    }

    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    /// Path of the enclosing node; `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() > 1 {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        } else {
            None
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or(Self::ROOT)
    }

    /// True if `self` equals `other` or is one of its ancestors.
    pub fn contains(&self, other: &NodePath) -> bool {
        other.0.len() >= self.0.len() && other.0[..self.0.len()] == self.0[..]
    }

    /// Segments of `other` below `self`, if `other` is inside this subtree.
    pub fn route_to<'a>(&self, other: &'a NodePath) -> Option<&'a [String]> {
        if self.contains(other) {
            Some(&other.0[self.0.len()..])
        } else {
            None
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Identity of a constructed child within its parent.
///
/// A back stack may hold the same target more than once; `occurrence`
/// counts equal targets earlier in the active sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChildKey<T> {
    pub target: T,
    pub occurrence: usize,
}

impl<T: NavTarget> ChildKey<T> {
    pub fn segment(&self) -> String {
        if self.occurrence == 0 {
            self.target.as_str().to_string()
        } else {
            format!("{}#{}", self.target.as_str(), self.occurrence)
        }
    }

    /// Keys for every element of an active sequence, in order.
    pub fn for_sequence(elements: &[T]) -> Vec<ChildKey<T>> {
        let mut seen: HashMap<&T, usize> = HashMap::new();
        elements
            .iter()
            .map(|target| {
                let count = seen.entry(target).or_insert(0);
                let key = ChildKey {
                    target: target.clone(),
                    occurrence: *count,
                };
                *count += 1;
                key
            })
            .collect()
    }
}
