//! Conda environment presence report.

use super::{MissingPackages, Report, TextBuilder};

/// Result of checking env file dependencies against an installed listing.
#[derive(Debug, Clone)]
pub struct PresenceReport {
    /// Conda environment that was listed.
    pub env_name: String,
    /// Env files that were read, for display.
    pub env_files: Vec<String>,
    /// Env file pattern, e.g. `env-*.yml`.
    pub env_label: String,
    /// Unique packages required by the env files.
    pub required_total: usize,
    /// Packages in the installed listing.
    pub installed_total: usize,
    /// Missing packages and the env files declaring them.
    pub missing: MissingPackages,
}

impl Report for PresenceReport {
    fn is_success(&self) -> bool {
        self.missing.is_empty()
    }

    fn render(&self) -> String {
        let mut out = TextBuilder::new();
        out.line(format!("Checked conda env: {}", self.env_name))
            .line(format!("Env files: {}", self.env_files.join(", ")))
            .line(format!(
                "Required conda packages (from yml deps): {}",
                self.required_total
            ))
            .line(format!("Installed conda packages: {}", self.installed_total))
            .blank();

        if self.is_success() {
            out.line(format!(
                "OK: all conda packages listed in {} are present.",
                self.env_label
            ));
        } else {
            out.line("MISSING packages:").missing(&self.missing, None);
        }

        out.finish()
    }
}
