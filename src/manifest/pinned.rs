//! Pinned manifest parsing and rewriting.
//!
//! A pinned manifest is a conda export: one `name=version=build` line per
//! package, preceded by a block of comment lines. Lines are kept verbatim so
//! a filtered manifest can be written back without touching versions.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use super::name::normalize_name;
use crate::error::{PincheckError, Result};

/// Comment text that marks a section label written by [`PinnedManifest::render`].
const SECTION_MARKER: &str = "packages from";

/// A parsed pinned manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinnedManifest {
    header: Vec<String>,
    entries: BTreeMap<String, String>,
}

/// A labeled group of pinned lines in a rewritten manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Label written as a `# <label>` comment above the lines.
    pub label: String,
    /// Pinned lines keyed by normalized package name.
    pub entries: BTreeMap<String, String>,
}

impl Section {
    /// Create a section.
    pub fn new(label: impl Into<String>, entries: BTreeMap<String, String>) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }
}

impl PinnedManifest {
    /// Parse manifest text.
    ///
    /// Comment and blank lines before the first package line form the
    /// header; section labels from a previous rewrite are dropped from it so
    /// that rewriting is idempotent.
    pub fn parse(content: &str) -> Self {
        let mut header = Vec::new();
        let mut entries = BTreeMap::new();
        let mut in_header = true;

        for line in content.lines() {
            let stripped = line.trim();

            if stripped.contains('=') && !stripped.starts_with('#') {
                in_header = false;
                let name = normalize_name(stripped.split('=').next().unwrap_or_default());
                if !name.is_empty() {
                    entries.insert(name, line.to_string());
                }
                continue;
            }

            if in_header
                && (stripped.is_empty() || stripped.starts_with('#'))
                && !stripped.to_lowercase().contains(SECTION_MARKER)
            {
                header.push(line.to_string());
            }
        }

        while header.last().is_some_and(|l| l.trim().is_empty()) {
            header.pop();
        }

        Self { header, entries }
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PincheckError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Header lines retained for the rewrite.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of pinned packages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest pins nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `name` (already normalized) is pinned.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The literal line pinning `name`.
    pub fn line(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// All pinned package names.
    pub fn names(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }

    /// Pinned lines for the subset of `names` that is pinned.
    pub fn filter(&self, names: &BTreeSet<String>) -> BTreeMap<String, String> {
        names
            .iter()
            .filter_map(|name| {
                self.entries
                    .get(name)
                    .map(|line| (name.clone(), line.clone()))
            })
            .collect()
    }

    /// Render the header followed by each non-empty section.
    pub fn render(&self, sections: &[Section]) -> String {
        let mut out = String::new();
        for line in &self.header {
            out.push_str(line);
            out.push('\n');
        }

        for section in sections.iter().filter(|s| !s.entries.is_empty()) {
            out.push_str("\n# ");
            out.push_str(&section.label);
            out.push('\n');
            for line in section.entries.values() {
                out.push_str(line);
                out.push('\n');
            }
        }

        out
    }

    /// Overwrite `path` with the rendered sections.
    pub fn rewrite(&self, path: &Path, sections: &[Section]) -> Result<()> {
        fs::write(path, self.render(sections))?;
        tracing::debug!("Rewrote {}", path.display());
        Ok(())
    }
}
