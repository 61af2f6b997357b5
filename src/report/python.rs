//! Python package reports.

use super::{MissingPackages, Report, TextBuilder};

/// Result of checking env files against the pinned manifest (`validate`).
#[derive(Debug, Clone)]
pub struct PinnedValidationReport {
    /// Env file pattern, e.g. `env-*.yml`.
    pub env_label: String,
    /// Pinned manifest file name.
    pub pinned_label: String,
    /// Missing packages and the env files declaring them.
    pub missing: MissingPackages,
}

impl Report for PinnedValidationReport {
    fn is_success(&self) -> bool {
        self.missing.is_empty()
    }

    fn render(&self) -> String {
        let mut out = TextBuilder::new();
        out.blank().rule();

        if self.is_success() {
            out.line("VALIDATION PASSED: All packages are present!")
                .rule()
                .blank()
                .line(format!(
                    "All packages from {} files are present in {}",
                    self.env_label, self.pinned_label
                ));
            return out.finish();
        }

        out.line(format!(
            "VALIDATION FAILED: Missing packages in {}",
            self.pinned_label
        ))
        .rule()
        .blank()
        .line(format!(
            "The following packages are in {} files but not in {}:",
            self.env_label, self.pinned_label
        ))
        .blank()
        .missing(&self.missing, None)
        .blank()
        .line(format!("Total missing packages: {}", self.missing.len()))
        .blank()
        .line("To resolve this issue:")
        .line("  1. If these packages should be in the container image, rebuild the")
        .line("     container and run the 'Pin Package Versions' workflow to update")
        .line(format!("     {}", self.pinned_label))
        .line(format!(
            "  2. If these packages are not needed, remove them from the {} files",
            self.env_label
        ))
        .rule();
        out.finish()
    }
}

/// Counts and result of the filter-and-validate run (`filter`).
#[derive(Debug, Clone)]
pub struct FilterReport {
    /// Label of the base environment, e.g. `py-rocket-base`.
    pub base_label: String,
    /// Env file pattern, e.g. `environment/env-*.yml`.
    pub env_label: String,
    /// Pinned manifest file name.
    pub pinned_label: String,
    /// Package count per feedstock, in configured order.
    pub feedstock_counts: Vec<(String, usize)>,
    /// Base packages not provided by any feedstock.
    pub other_base: usize,
    /// Unique packages across the whole base environment.
    pub base_total: usize,
    /// Unique packages across the env files.
    pub env_total: usize,
    /// Unique packages retained in the rewritten manifest.
    pub pinned_total: usize,
    /// Missing packages and the env files declaring them.
    pub missing: MissingPackages,
}

impl Report for FilterReport {
    fn is_success(&self) -> bool {
        self.missing.is_empty()
    }

    fn render(&self) -> String {
        let mut out = TextBuilder::new();
        out.rule().line("Python Package Validation Report").rule().blank();

        for (name, count) in &self.feedstock_counts {
            out.line(format!("Packages from {} feedstock: {}", name, count));
        }
        out.line(format!(
            "Other packages from {}: {}",
            self.base_label, self.other_base
        ))
        .line(format!(
            "Total packages from {}: {}",
            self.base_label, self.base_total
        ))
        .line(format!(
            "Total unique packages in {} files: {}",
            self.env_label, self.env_total
        ))
        .line(format!(
            "Total packages in filtered {}: {}",
            self.pinned_label, self.pinned_total
        ))
        .blank();

        if self.is_success() {
            out.line("STATUS: SUCCESS")
                .rule()
                .blank()
                .line(format!(
                    "All Python packages from the {} environment and",
                    self.base_label
                ))
                .line(format!(
                    "{} files are present in the container image and have been",
                    self.env_label
                ))
                .line(format!("pinned in {}.", self.pinned_label))
                .blank()
                .line("The pinned file includes:");
            for (name, _) in &self.feedstock_counts {
                out.line(format!("  - Packages from {} feedstock", name));
            }
            out.line(format!("  - Other packages from {}", self.base_label))
                .line(format!("  - Packages from {} files", self.env_label))
                .blank()
                .line("Packages not declared by these sources are left out of the pinned file.");
        } else {
            out.line("STATUS: FAILED")
                .rule()
                .blank()
                .line(format!(
                    "The following packages are in {} or {} files",
                    self.env_label, self.base_label
                ))
                .line("but were NOT found in the container image:")
                .blank()
                .missing(
                    &self.missing,
                    Some(format!("{} environment", self.base_label).as_str()),
                )
                .blank()
                .line(format!("Total missing packages: {}", self.missing.len()))
                .blank()
                .line("To resolve this issue:")
                .line("  1. Check if these packages failed to install in the container")
                .line("  2. Review the container build logs for errors")
                .line("  3. Fix any installation issues and rebuild the container")
                .line("  4. If packages are not needed, remove them from the respective files");
        }

        out.blank().rule();
        out.finish()
    }
}
