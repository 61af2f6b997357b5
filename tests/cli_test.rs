//! Integration tests for the pincheck binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PINNED: &str = "\
# This file may be used to create an environment using:
# $ conda create --name <env> --file <this file>
# platform: linux-64
dask=2024.11.2=pyhd8ed1ab_0
gh-scoped-creds=4.1=pyhd8ed1ab_0
jupyterlab=4.3.1=pyhff2d567_0
libgcc=14.2.0=h77fa898_1
numpy=1.26.4=py312heda63a1_0
xarray=2024.10.0=pyhd8ed1ab_0
";

const ENV_GEO: &str = r#"
name: geo
channels:
  - conda-forge
dependencies:
  - xarray>=2024.10
  - numpy
"#;

const CONDA_LIST: &str = r#"[
  {"name": "numpy", "version": "1.26.4", "channel": "conda-forge"},
  {"name": "xarray", "version": "2024.10.0", "channel": "conda-forge"}
]"#;

fn setup_repo(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(temp.path().join(name), content).unwrap();
    }
    temp
}

fn pincheck(repo: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("pincheck"));
    cmd.arg("--repo-root").arg(repo.path()).arg("--no-color");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pincheck"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("validate-r"))
        .stdout(predicate::str::contains("check-env"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pincheck"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pincheck"));
    cmd.assert().failure();
    Ok(())
}

#[test]
fn validate_passes() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[
        ("env-geo.yml", ENV_GEO),
        ("packages-python-pinned.yaml", PINNED),
    ]);
    pincheck(&repo)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("VALIDATION PASSED"));
    Ok(())
}

#[test]
fn validate_fails_on_missing_package() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[
        ("env-geo.yml", "dependencies:\n  - xarray\n  - rioxarray\n"),
        ("packages-python-pinned.yaml", PINNED),
    ]);
    pincheck(&repo)
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("VALIDATION FAILED"))
        .stdout(predicate::str::contains(
            "  - rioxarray\n    Found in: env-geo.yml",
        ));
    Ok(())
}

#[test]
fn validate_missing_pinned_file_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[("env-geo.yml", ENV_GEO)]);
    pincheck(&repo)
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("packages-python-pinned.yaml not found"));
    Ok(())
}

#[test]
fn check_env_reads_listing_file() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[("env-geo.yml", ENV_GEO), ("listing.json", CONDA_LIST)]);
    pincheck(&repo)
        .args(["check-env", "--installed-json"])
        .arg(repo.path().join("listing.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked conda env: notebook"))
        .stdout(predicate::str::contains(
            "OK: all conda packages listed in env-*.yml are present.",
        ));
    Ok(())
}

#[test]
fn check_env_reads_listing_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[("env-geo.yml", "dependencies:\n  - numpy\n  - zarr\n")]);
    pincheck(&repo)
        .args(["check-env", "--env", "analysis", "--installed-json", "-"])
        .write_stdin(CONDA_LIST)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Checked conda env: analysis"))
        .stdout(predicate::str::contains("MISSING packages:"))
        .stdout(predicate::str::contains("  - zarr\n    Found in: env-geo.yml"));
    Ok(())
}

#[test]
fn check_env_without_env_files_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[("listing.json", CONDA_LIST)]);
    pincheck(&repo)
        .args(["check-env", "--installed-json"])
        .arg(repo.path().join("listing.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No files matched env-*.yml"));
    Ok(())
}

#[test]
fn filter_rewrites_pinned_and_writes_log() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[
        ("env-geo.yml", ENV_GEO),
        ("packages-python-pinned.yaml", PINNED),
        (
            "base-environment.yaml",
            "dependencies:\n  - python=3.12\n  - pangeo-notebook\n  - gh-scoped-creds\n",
        ),
    ]);
    pincheck(&repo)
        .args(["filter", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let pinned = fs::read_to_string(repo.path().join("packages-python-pinned.yaml"))?;
    assert!(pinned.starts_with("# This file may be used to create an environment using:\n"));
    assert!(pinned.contains("\n# Packages from pangeo-notebook feedstock\njupyterlab=4.3.1"));
    assert!(pinned.contains("\n# Other packages from py-rocket-base environment\ngh-scoped-creds="));
    assert!(pinned.contains("\n# Packages from env-*.yml files\nnumpy=1.26.4"));
    assert!(!pinned.contains("libgcc"));

    let log = fs::read_to_string(repo.path().join("build.log"))?;
    assert!(log.contains("Python Package Validation Report"));
    assert!(log.contains("STATUS: FAILED"));
    Ok(())
}

#[test]
fn filter_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[
        ("env-geo.yml", ENV_GEO),
        ("packages-python-pinned.yaml", PINNED),
    ]);
    let path = repo.path().join("packages-python-pinned.yaml");

    pincheck(&repo).args(["filter", "--offline"]).assert().success();
    let first = fs::read_to_string(&path)?;
    pincheck(&repo).args(["filter", "--offline"]).assert().success();
    let second = fs::read_to_string(&path)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn validate_r_appends_to_log() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[
        ("install.R", "list.of.packages <- c(\"rstac\", \"quarto\")\n"),
        (
            "packages-r-pinned.R",
            "remotes::install_version(\"rstac\", version = \"1.0.1\")\n\
             remotes::install_version(\"quarto\", version = \"1.4\")\n",
        ),
        ("build.log", "python section\n"),
    ]);
    pincheck(&repo)
        .arg("validate-r")
        .write_stdin("install2.r --error \\\n    sf \\\n    terra\n")
        .assert()
        .success();

    let log = fs::read_to_string(repo.path().join("build.log"))?;
    assert!(log.starts_with("python section\n\n\n===="));
    assert!(log.contains("R Package Validation Report"));
    assert!(log.contains("STATUS: FAILED"));
    assert!(log.contains("  - sf\n    Found in: install_geospatial.sh"));
    assert!(log.contains("  - terra\n    Found in: install_geospatial.sh"));
    Ok(())
}

#[test]
fn explicit_missing_config_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[]);
    pincheck(&repo)
        .arg("--config")
        .arg(repo.path().join("nope.yml"))
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope.yml not found"));
    Ok(())
}

#[test]
fn repo_config_changes_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[
        (".pincheck.yml", "python:\n  pinned_file: pinned.txt\n"),
        ("env-geo.yml", ENV_GEO),
        ("pinned.txt", PINNED),
    ]);
    pincheck(&repo)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("present in pinned.txt"));
    Ok(())
}

#[test]
fn check_env_glob_wildcard_directory() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[("listing.json", CONDA_LIST)]);
    fs::create_dir(repo.path().join("environment"))?;
    fs::write(repo.path().join("environment").join("env-geo.yml"), ENV_GEO)?;

    pincheck(&repo)
        .args(["check-env", "--glob", "*/env-*.yml", "--installed-json", "listing.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("env-geo.yml"));

    pincheck(&repo)
        .args(["check-env", "--glob", "**/env-*.yml", "--installed-json", "listing.json"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn listing_path_resolves_against_repo_root() -> Result<(), Box<dyn std::error::Error>> {
    let repo = setup_repo(&[("env-geo.yml", ENV_GEO), ("listing.json", CONDA_LIST)]);
    let elsewhere = TempDir::new()?;
    pincheck(&repo)
        .current_dir(elsewhere.path())
        .args(["check-env", "--installed-json", "listing.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: all conda packages"));
    Ok(())
}
