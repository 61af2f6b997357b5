//! Package name normalization and dependency-spec splitting.

use regex::Regex;
use std::sync::LazyLock;

/// First version or comparison operator in a dependency spec.
static OPERATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"==|>=|<=|!=|~=|=|>|<").expect("OPERATOR_REGEX must compile"));

/// Normalize a conda-style package name.
///
/// Trims, lower-cases and folds `_` into `-`, so `NumPy`, `numpy` and
/// `num_py`/`num-py` compare the way conda compares them.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}

/// Extract the normalized package name from a dependency spec.
///
/// ```
/// use pincheck::manifest::extract_name;
///
/// assert_eq!(extract_name("xarray>=2024.10"), "xarray");
/// assert_eq!(extract_name("py-xgboost~=2.1.1=cpu*"), "py-xgboost");
/// assert_eq!(extract_name("numpy"), "numpy");
/// ```
pub fn extract_name(spec: &str) -> String {
    let spec = spec.split('#').next().unwrap_or_default();
    let spec = spec.trim().trim_matches(|c| c == '\'' || c == '"');

    let name = match OPERATOR_REGEX.find(spec) {
        Some(m) => &spec[..m.start()],
        None => spec,
    };

    normalize_name(name)
}
