//! Shell install script extraction.
//!
//! Rocker install scripts pass R packages to `install2.r` as a
//! backslash-continued argument list, one package per line, and install
//! Bioconductor packages through `R -e "BiocManager::install('pkg')"`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static BIOC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"BiocManager::install\s*\(\s*["']([^"']+)["']"#).expect("BIOC_REGEX must compile")
});

/// Fragments that mark a continuation line as the start of another command.
const COMMAND_MARKERS: &[&str] = &["R ", "R\t", "apt", "set ", "export", "echo"];

/// Extract R package names from an install shell script.
///
/// ```
/// use pincheck::manifest::parse_install_script;
///
/// let script = "install2.r --error --skipinstalled \\\n    sf \\\n    terra\n";
/// let pkgs = parse_install_script(script);
/// assert!(pkgs.contains("sf") && pkgs.contains("terra"));
/// ```
pub fn parse_install_script(content: &str) -> BTreeSet<String> {
    let mut packages = BTreeSet::new();
    let mut in_install2r = false;

    for line in content.lines() {
        let stripped = line.trim();

        if line.contains("install2.r") && !stripped.starts_with('#') {
            in_install2r = true;
            continue;
        }

        if !in_install2r {
            continue;
        }

        if stripped.is_empty() || stripped.starts_with('#') {
            in_install2r = false;
            continue;
        }

        let candidate = stripped.trim_end_matches('\\').trim();
        if !candidate.is_empty() && !candidate.starts_with('-') && !candidate.starts_with('$') {
            if COMMAND_MARKERS.iter().any(|m| candidate.contains(m)) {
                in_install2r = false;
                continue;
            }
            packages.insert(candidate.to_string());
        }

        if !stripped.ends_with('\\') {
            in_install2r = false;
        }
    }

    for caps in BIOC_REGEX.captures_iter(content) {
        packages.insert(caps[1].to_string());
    }

    packages
}
