//! Filter command implementation.
//!
//! The `pincheck filter` command trims the pinned manifest down to the
//! packages the image actually declares, grouped by where they came from,
//! and writes a validation report to the build log.
//!
//! Missing packages are reported but never fail the job: the pinned
//! manifest is exported from a built image and the report is for humans.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::base_env::BaseEnvironment;
use crate::cli::args::FilterArgs;
use crate::compare::missing;
use crate::config::PincheckConfig;
use crate::error::Result;
use crate::feedstock::{FeedstockResolver, RecipeFetcher};
use crate::manifest::{discover_files, PinnedManifest, Section};
use crate::report::{FilterReport, Report};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{file_label, load_env_sources};

/// The filter command implementation.
pub struct FilterCommand {
    repo_root: PathBuf,
    config: PincheckConfig,
    env_glob: String,
    pinned_file: PathBuf,
    base_env_file: PathBuf,
    log_file: PathBuf,
    offline: bool,
}

impl FilterCommand {
    /// Create a new filter command.
    pub fn new(repo_root: &Path, config: &PincheckConfig, args: FilterArgs) -> Self {
        let python = &config.python;
        Self {
            repo_root: repo_root.to_path_buf(),
            env_glob: args.glob.unwrap_or_else(|| python.env_glob.clone()),
            pinned_file: repo_root.join(args.pinned.unwrap_or_else(|| python.pinned_file.clone())),
            base_env_file: repo_root
                .join(args.base_env.unwrap_or_else(|| python.base_env_file.clone())),
            log_file: repo_root.join(args.log.unwrap_or_else(|| python.log_file.clone())),
            offline: args.offline || config.feedstocks.offline,
            config: config.clone(),
        }
    }

    fn resolver(&self) -> Result<FeedstockResolver> {
        if self.offline {
            return Ok(FeedstockResolver::offline());
        }
        let settings = &self.config.feedstocks;
        let fetcher = RecipeFetcher::with_timeout(Duration::from_secs(settings.timeout_secs))?;
        Ok(FeedstockResolver::new(
            Box::new(fetcher),
            settings.recipe_url.clone(),
        ))
    }

    /// Build the labeled sections of the filtered manifest.
    fn sections(
        &self,
        pinned: &PinnedManifest,
        base: &BaseEnvironment,
        env_packages: &BTreeSet<String>,
    ) -> Vec<Section> {
        let mut sections: Vec<Section> = base
            .feedstocks
            .iter()
            .map(|f| {
                Section::new(
                    format!("Packages from {} feedstock", f.name),
                    pinned.filter(&f.packages),
                )
            })
            .collect();

        sections.push(Section::new(
            format!(
                "Other packages from {} environment",
                self.config.python.base_label
            ),
            pinned.filter(&base.other),
        ));
        sections.push(Section::new(
            format!("Packages from {} files", self.env_glob),
            pinned.filter(env_packages),
        ));
        sections
    }
}

impl Command for FilterCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.pinned_file.exists() {
            ui.error(&format!("{} not found", self.pinned_file.display()));
            return Ok(CommandResult::failure(1));
        }

        let python = &self.config.python;
        let resolver = self.resolver()?;

        ui.message(&format!(
            "Parsing {}...",
            file_label(&self.base_env_file)
        ));
        let base = BaseEnvironment::load(
            &self.base_env_file,
            &python.base_exclude,
            &self.config.feedstocks.packages,
            &resolver,
        );
        for feedstock in &base.feedstocks {
            ui.detail(&format!(
                "  {} feedstock: {} packages ({:?})",
                feedstock.name,
                feedstock.packages.len(),
                feedstock.origin
            ));
        }
        let base_all = base.all();
        ui.message(&format!(
            "Found {} packages from {}",
            base_all.len(),
            python.base_label
        ));

        ui.message(&format!("Parsing {} files...", self.env_glob));
        let files = discover_files(&self.repo_root, &self.env_glob)?;
        if files.is_empty() {
            ui.warning(&format!("No {} files found", self.env_glob));
        }
        let sources = load_env_sources(&files, ui);
        let env_packages = sources.union();
        ui.message(&format!(
            "Found {} unique packages in env files",
            env_packages.len()
        ));

        let pinned_label = file_label(&self.pinned_file);
        let pinned = PinnedManifest::load(&self.pinned_file)?;
        ui.message(&format!(
            "Found {} packages in {}",
            pinned.len(),
            pinned_label
        ));

        let sections = self.sections(&pinned, &base, &env_packages);
        pinned.rewrite(&self.pinned_file, &sections)?;

        let kept: BTreeSet<String> = sections
            .iter()
            .flat_map(|s| s.entries.keys().cloned())
            .collect();
        ui.message(&format!(
            "Filtered {} to {} packages",
            pinned_label,
            kept.len()
        ));

        let target: BTreeSet<String> = base_all.union(&env_packages).cloned().collect();
        let missing = missing(&target, &kept);

        let report = FilterReport {
            base_label: python.base_label.clone(),
            env_label: self.env_glob.clone(),
            pinned_label,
            feedstock_counts: base
                .feedstocks
                .iter()
                .map(|f| (f.name.clone(), f.packages.len()))
                .collect(),
            other_base: base.other.len(),
            base_total: base_all.len(),
            env_total: env_packages.len(),
            pinned_total: kept.len(),
            missing: sources.attribute(&missing),
        };
        report.write_to(&self.log_file)?;
        ui.message(&format!("Report written to {}", self.log_file.display()));

        if report.is_success() {
            ui.success("All required packages are present in the pinned manifest");
            Ok(CommandResult::success())
        } else {
            ui.warning(&format!(
                "{} packages are missing from {}",
                report.missing.len(),
                report.pinned_label
            ));
            Ok(CommandResult::reported_failure())
        }
    }
}
