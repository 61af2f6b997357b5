//! R package report.

use super::{MissingPackages, Report, TextBuilder};

/// Result of validating R packages against the pinned R script.
///
/// The report is appended to the Python build log, so it opens with two
/// blank lines to separate it from what came before.
#[derive(Debug, Clone)]
pub struct RReport {
    /// Install script file name, e.g. `install.R`.
    pub install_label: String,
    /// Rocker script label, e.g. `/rocker_scripts/install_geospatial.sh`.
    pub script_label: String,
    /// Pinned R file name.
    pub pinned_label: String,
    /// Packages declared in the install script.
    pub install_count: usize,
    /// Packages declared in the rocker script.
    pub script_count: usize,
    /// Unique packages across both.
    pub expected_total: usize,
    /// Packages in the pinned file.
    pub pinned_total: usize,
    /// Missing packages and the scripts declaring them.
    pub missing: MissingPackages,
}

impl RReport {
    fn script_name(&self) -> &str {
        self.script_label
            .rsplit('/')
            .next()
            .unwrap_or(&self.script_label)
    }
}

impl Report for RReport {
    fn is_success(&self) -> bool {
        self.missing.is_empty()
    }

    fn render(&self) -> String {
        let mut out = TextBuilder::new();
        out.blank()
            .blank()
            .rule()
            .line("R Package Validation Report")
            .rule()
            .blank()
            .line(format!(
                "Packages in {}: {}",
                self.install_label, self.install_count
            ))
            .line(format!(
                "Packages in {}: {}",
                self.script_label, self.script_count
            ))
            .line(format!(
                "Total unique R packages expected: {}",
                self.expected_total
            ))
            .line(format!(
                "Total packages in {}: {}",
                self.pinned_label, self.pinned_total
            ))
            .blank();

        if self.is_success() {
            out.line("STATUS: SUCCESS")
                .rule()
                .blank()
                .line(format!(
                    "All R packages from {} and {} are",
                    self.install_label,
                    self.script_name()
                ))
                .line(format!("present in {}.", self.pinned_label))
                .blank()
                .line(format!(
                    "The {} file contains all required packages",
                    self.pinned_label
                ))
                .line("from both the custom install script and the rocker geospatial script.");
        } else {
            out.line("STATUS: FAILED")
                .rule()
                .blank()
                .line(format!(
                    "The following R packages are specified in {} or",
                    self.install_label
                ))
                .line(format!(
                    "{} but were NOT found in {}:",
                    self.script_name(),
                    self.pinned_label
                ))
                .blank()
                .missing(&self.missing, None)
                .blank()
                .line(format!("Total missing packages: {}", self.missing.len()))
                .blank()
                .line("To resolve this issue:")
                .line("  1. Check if these packages failed to install in the container")
                .line("  2. Review the container build logs for errors")
                .line("  3. Fix any installation issues and rebuild the container")
                .line(format!(
                    "  4. Re-run the pin-packages workflow to update {}",
                    self.pinned_label
                ));
        }

        out.blank().rule();
        out.finish()
    }
}
