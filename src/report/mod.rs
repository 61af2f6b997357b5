//! Validation reports.
//!
//! Every report is fixed-format plain text framed by 70-character `=`
//! rules, so CI logs and pull request bodies can quote it verbatim.
//!
//! - [`python`] - pinned-manifest reports for `validate` and `filter`
//! - [`r`] - R package report appended to the build log
//! - [`conda`] - conda environment presence report for `check-env`

pub mod conda;
pub mod python;
pub mod r;

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::Result;

pub use conda::PresenceReport;
pub use python::{FilterReport, PinnedValidationReport};
pub use r::RReport;

/// Width of the `=` rules framing a report.
pub const RULE_WIDTH: usize = 70;

/// Missing package name mapped to the sources that declared it.
pub type MissingPackages = BTreeMap<String, Vec<String>>;

/// A rendered validation report.
pub trait Report {
    /// Whether validation passed.
    fn is_success(&self) -> bool;

    /// Render the report text.
    fn render(&self) -> String;

    /// Write the report to `path`, replacing any previous content.
    fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }

    /// Append the report to `path`, creating it if needed.
    fn append_to(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Line-oriented text buffer used by the reports.
#[derive(Debug, Default)]
pub struct TextBuilder {
    buf: String,
}

impl TextBuilder {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` followed by a newline.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
        self
    }

    /// Append an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Append a full-width `=` rule.
    pub fn rule(&mut self) -> &mut Self {
        self.line("=".repeat(RULE_WIDTH))
    }

    /// Append one `  - name` / `    Found in: ...` pair per missing package.
    ///
    /// Packages without a recorded source are attributed to `fallback`.
    pub fn missing(&mut self, missing: &MissingPackages, fallback: Option<&str>) -> &mut Self {
        for (name, sources) in missing {
            self.line(format!("  - {}", name));
            if !sources.is_empty() {
                self.line(format!("    Found in: {}", sources.join(", ")));
            } else if let Some(fallback) = fallback {
                self.line(format!("    Found in: {}", fallback));
            }
        }
        self
    }

    /// Consume the buffer.
    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}
