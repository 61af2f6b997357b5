//! Set comparison and source attribution.

use std::collections::{BTreeMap, BTreeSet};

/// Names in `required` that are absent from `ground_truth`.
///
/// ```
/// use std::collections::BTreeSet;
/// use pincheck::compare::missing;
///
/// let required: BTreeSet<String> = ["numpy", "scipy"].map(String::from).into();
/// let pinned: BTreeSet<String> = ["numpy"].map(String::from).into();
/// let expected: BTreeSet<String> = ["scipy"].map(String::from).into();
/// assert_eq!(missing(&required, &pinned), expected);
/// ```
pub fn missing(required: &BTreeSet<String>, ground_truth: &BTreeSet<String>) -> BTreeSet<String> {
    required.difference(ground_truth).cloned().collect()
}

/// Package sets labeled by the manifest that declared them, in load order.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    entries: Vec<(String, BTreeSet<String>)>,
}

impl Sources {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the packages declared by `source`.
    pub fn push(&mut self, source: impl Into<String>, packages: BTreeSet<String>) {
        self.entries.push((source.into(), packages));
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no source was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Packages declared by a source.
    pub fn get(&self, source: &str) -> Option<&BTreeSet<String>> {
        self.entries
            .iter()
            .find(|(label, _)| label == source)
            .map(|(_, packages)| packages)
    }

    /// Union of every source's packages.
    pub fn union(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .flat_map(|(_, packages)| packages.iter().cloned())
            .collect()
    }

    /// Sources that declared `package`.
    pub fn sources_for(&self, package: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, packages)| packages.contains(package))
            .map(|(label, _)| label.as_str())
            .collect()
    }

    /// Map each name in `missing` to the sources that declared it.
    pub fn attribute(&self, missing: &BTreeSet<String>) -> BTreeMap<String, Vec<String>> {
        missing
            .iter()
            .map(|name| {
                let sources = self
                    .sources_for(name)
                    .into_iter()
                    .map(String::from)
                    .collect();
                (name.clone(), sources)
            })
            .collect()
    }
}
