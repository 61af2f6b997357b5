//! Validate-r command implementation.
//!
//! The `pincheck validate-r` command checks the R packages declared in
//! `install.R` and in the rocker geospatial script against the pinned R
//! script, and appends its report to the Python build log.
//!
//! The rocker script lives inside the container, so it is normally piped
//! in on stdin:
//!
//! ```bash
//! docker run --rm image cat /rocker_scripts/install_geospatial.sh \
//!   | pincheck validate-r
//! ```

use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::args::ValidateRArgs;
use crate::compare::{missing, Sources};
use crate::config::PincheckConfig;
use crate::error::{PincheckError, Result};
use crate::manifest::{parse_install_r, parse_install_script, parse_pinned_r};
use crate::report::{RReport, Report};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::file_label;

/// The validate-r command implementation.
pub struct ValidateRCommand {
    install_r: PathBuf,
    pinned_r: PathBuf,
    geospatial: Option<PathBuf>,
    rocker_script: String,
    log_file: PathBuf,
}

impl ValidateRCommand {
    /// Create a new validate-r command.
    pub fn new(repo_root: &Path, config: &PincheckConfig, args: ValidateRArgs) -> Self {
        let r = &config.r;
        let geospatial = args
            .geospatial
            .filter(|p| p != Path::new("-"))
            .map(|p| repo_root.join(p));
        Self {
            install_r: repo_root.join(args.install_r.unwrap_or_else(|| r.install_script.clone())),
            pinned_r: repo_root.join(args.pinned_r.unwrap_or_else(|| r.pinned_file.clone())),
            rocker_script: geospatial
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| r.rocker_script.clone()),
            geospatial,
            log_file: repo_root.join(args.log.unwrap_or_else(|| r.log_file.clone())),
        }
    }

    fn read_geospatial(&self) -> Result<String> {
        match &self.geospatial {
            Some(path) => {
                if !path.exists() {
                    return Err(PincheckError::InputNotFound { path: path.clone() });
                }
                Ok(std::fs::read_to_string(path)?)
            }
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

impl Command for ValidateRCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        for required in [&self.install_r, &self.pinned_r] {
            if !required.exists() {
                ui.error(&format!("{} not found", required.display()));
                return Ok(CommandResult::failure(1));
            }
        }

        let install_label = file_label(&self.install_r);
        ui.message(&format!("Parsing {}...", install_label));
        let install_packages = parse_install_r(&std::fs::read_to_string(&self.install_r)?);
        ui.message(&format!("Found {} packages", install_packages.len()));

        ui.message(&format!("Parsing {}...", self.rocker_script));
        let script = self.read_geospatial()?;
        let script_packages = if script.trim().is_empty() {
            ui.warning("Geospatial script content is empty");
            BTreeSet::new()
        } else {
            parse_install_script(&script)
        };
        ui.message(&format!("Found {} packages", script_packages.len()));

        let pinned_label = file_label(&self.pinned_r);
        ui.message(&format!("Parsing {}...", pinned_label));
        let pinned = parse_pinned_r(&std::fs::read_to_string(&self.pinned_r)?);
        ui.message(&format!("Found {} pinned packages", pinned.len()));

        let install_count = install_packages.len();
        let script_count = script_packages.len();
        let mut sources = Sources::new();
        sources.push(install_label.clone(), install_packages);
        sources.push(file_label(Path::new(&self.rocker_script)), script_packages);
        let expected = sources.union();

        let missing = missing(&expected, &pinned);
        let report = RReport {
            install_label,
            script_label: self.rocker_script.clone(),
            pinned_label,
            install_count,
            script_count,
            expected_total: expected.len(),
            pinned_total: pinned.len(),
            missing: sources.attribute(&missing),
        };
        report.append_to(&self.log_file)?;
        ui.message(&format!("Report appended to {}", self.log_file.display()));

        if report.is_success() {
            ui.success("All R packages are present in the pinned R script");
            Ok(CommandResult::success())
        } else {
            ui.warning(&format!(
                "{} R packages are missing from {}",
                report.missing.len(),
                report.pinned_label
            ));
            Ok(CommandResult::reported_failure())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const INSTALL_R: &str = r#"
list.of.packages <- c("rstac", "quarto")
remotes::install_github("hvillalo/echogram")
"#;

    const GEOSPATIAL: &str = "\
install2.r --error --skipinstalled -n \"$NCPUS\" \\
    sf \\
    terra
";

    const PINNED_R: &str = r#"
remotes::install_version("rstac", version = "1.0.1")
remotes::install_version("quarto", version = "1.4")
remotes::install_version("sf", version = "1.0-16")
remotes::install_github("hvillalo/echogram@3f2b1c0")
"#;

    fn setup(pinned: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("install.R"), INSTALL_R).unwrap();
        fs::write(temp.path().join("packages-r-pinned.R"), pinned).unwrap();
        fs::write(temp.path().join("install_geospatial.sh"), GEOSPATIAL).unwrap();
        temp
    }

    fn args(temp: &TempDir) -> ValidateRArgs {
        ValidateRArgs {
            geospatial: Some(temp.path().join("install_geospatial.sh")),
            ..Default::default()
        }
    }

    #[test]
    fn missing_packages_are_reported_not_fatal() {
        let temp = setup(PINNED_R);
        let cmd = ValidateRCommand::new(temp.path(), &PincheckConfig::default(), args(&temp));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 0);
        let log = fs::read_to_string(temp.path().join("build.log")).unwrap();
        assert!(log.contains("R Package Validation Report"));
        assert!(log.contains("Packages in install.R: 3\n"));
        assert!(log.contains("  - terra\n    Found in: install_geospatial.sh\n"));
        assert!(log.contains("Total missing packages: 1"));
    }

    #[test]
    fn appends_to_existing_log() {
        let temp = setup(&format!("{PINNED_R}remotes::install_version(\"terra\", version = \"1.7\")\n"));
        fs::write(temp.path().join("build.log"), "python report\n").unwrap();
        let cmd = ValidateRCommand::new(temp.path(), &PincheckConfig::default(), args(&temp));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        let log = fs::read_to_string(temp.path().join("build.log")).unwrap();
        assert!(log.starts_with("python report\n\n\n"));
        assert!(log.contains("STATUS: SUCCESS"));
    }

    #[test]
    fn empty_geospatial_script_warns() {
        let temp = setup(PINNED_R);
        fs::write(temp.path().join("install_geospatial.sh"), "  \n").unwrap();
        let cmd = ValidateRCommand::new(temp.path(), &PincheckConfig::default(), args(&temp));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.warnings(), ["Geospatial script content is empty".to_string()]);
    }

    #[test]
    fn missing_install_r_exits_one() {
        let temp = setup(PINNED_R);
        fs::remove_file(temp.path().join("install.R")).unwrap();
        let cmd = ValidateRCommand::new(temp.path(), &PincheckConfig::default(), args(&temp));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("install.R not found"));
        assert!(!temp.path().join("build.log").exists());
    }

    #[test]
    fn geospatial_path_is_relative_to_repo_root() {
        let temp = setup(PINNED_R);
        let cmd = ValidateRCommand::new(
            temp.path(),
            &PincheckConfig::default(),
            ValidateRArgs {
                geospatial: Some(PathBuf::from("install_geospatial.sh")),
                ..Default::default()
            },
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 0);
        assert_eq!(cmd.geospatial, Some(temp.path().join("install_geospatial.sh")));
        let log = fs::read_to_string(temp.path().join("build.log")).unwrap();
        assert!(log.contains("  - terra\n    Found in: install_geospatial.sh\n"));
    }

    #[test]
    fn dash_means_stdin() {
        let temp = TempDir::new().unwrap();
        let cmd = ValidateRCommand::new(
            temp.path(),
            &PincheckConfig::default(),
            ValidateRArgs {
                geospatial: Some(PathBuf::from("-")),
                ..Default::default()
            },
        );
        assert!(cmd.geospatial.is_none());
        assert_eq!(cmd.rocker_script, "/rocker_scripts/install_geospatial.sh");
    }
}
