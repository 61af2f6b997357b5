//! R source extraction.
//!
//! `install.R` declares packages as quoted elements of `c(...)` vectors and
//! through `remotes::install_github("owner/repo")` calls. The pinned R file
//! uses one `remotes::install_version("pkg", ...)` or `install_github` call
//! per line. R package names are case-sensitive and are kept as written.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static VECTOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"c\s*\(\s*([^)]+)\s*\)").expect("VECTOR_REGEX must compile"));

static QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']([^"']+)["']"#).expect("QUOTED_REGEX must compile"));

static GITHUB_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"remotes::install_github\s*\(\s*["']([^/"']+)/([^"'@]+)"#)
        .expect("GITHUB_REGEX must compile")
});

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^remotes::install_version\s*\(\s*["']([^"']+)["']"#)
        .expect("VERSION_REGEX must compile")
});

/// Extract package names from an `install.R` script.
///
/// ```
/// use pincheck::manifest::parse_install_r;
///
/// let pkgs = parse_install_r(r#"list.of.packages <- c("quarto","reticulate")"#);
/// assert_eq!(pkgs.len(), 2);
/// assert!(pkgs.contains("quarto"));
/// ```
pub fn parse_install_r(content: &str) -> BTreeSet<String> {
    let mut packages = BTreeSet::new();

    for vector in VECTOR_REGEX.captures_iter(content) {
        for quoted in QUOTED_REGEX.captures_iter(&vector[1]) {
            packages.insert(quoted[1].to_string());
        }
    }

    for github in GITHUB_REGEX.captures_iter(content) {
        packages.insert(github[2].to_string());
    }

    packages
}

/// Extract package names from a pinned R install script.
///
/// Only lines that start with an install call count; commented-out pins
/// are ignored.
pub fn parse_pinned_r(content: &str) -> BTreeSet<String> {
    let mut packages = BTreeSet::new();

    for line in content.lines() {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        if let Some(caps) = VERSION_REGEX.captures(stripped) {
            packages.insert(caps[1].to_string());
            continue;
        }

        if stripped.starts_with("remotes::install_github") {
            if let Some(caps) = GITHUB_REGEX.captures(stripped) {
                packages.insert(caps[2].to_string());
            }
        }
    }

    packages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_vector_elements() {
        let script = r#"
list.of.packages <- c("quarto", "reticulate",
                      'rstac', "gdalcubes")
new.packages <- list.of.packages[!(list.of.packages %in% installed.packages()[,"Package"])]
if(length(new.packages)) install.packages(new.packages)
"#;
        let pkgs = parse_install_r(script);
        for name in ["quarto", "reticulate", "rstac", "gdalcubes"] {
            assert!(pkgs.contains(name), "missing {name}");
        }
    }

    #[test]
    fn extracts_github_repo_segment() {
        let script = r#"
remotes::install_github("hvillalo/echogram", upgrade = "never")
remotes::install_github('r-spatial/rgee@v1.1.7')
"#;
        let pkgs = parse_install_r(script);
        assert!(pkgs.contains("echogram"));
        assert!(pkgs.contains("rgee"));
        assert!(!pkgs.contains("hvillalo"));
    }

    #[test]
    fn keeps_r_names_case_sensitive() {
        let pkgs = parse_install_r(r#"c("BiocManager", "data.table")"#);
        assert!(pkgs.contains("BiocManager"));
        assert!(pkgs.contains("data.table"));
    }

    #[test]
    fn pinned_r_reads_install_version_and_github() {
        let pinned = r#"
# Pinned R packages
remotes::install_version("quarto", version = "1.4", upgrade = "never")
remotes::install_version('sf', version = "1.0-16")
remotes::install_github("hvillalo/echogram@3f2b1c0")
# remotes::install_version("dropped", version = "0.1")
"#;
        let pkgs = parse_pinned_r(pinned);
        let expected: BTreeSet<String> = ["echogram", "quarto", "sf"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(pkgs, expected);
    }
}
