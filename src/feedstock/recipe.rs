//! Feedstock recipe parsing.
//!
//! conda-forge recipes are Jinja-templated, so `meta.yaml` is scanned line
//! by line instead of being deserialized.

use std::collections::BTreeSet;

use crate::manifest::normalize_name;

/// Collect the `requirements: run:` list of a recipe.
///
/// Version constraints and selectors are cut off; Jinja entries such as
/// `{{ pin_compatible('numpy') }}` are skipped.
pub fn parse_run_requirements(content: &str) -> BTreeSet<String> {
    let mut packages = BTreeSet::new();
    let mut in_requirements = false;
    let mut run_indent: Option<usize> = None;

    for line in content.lines() {
        let stripped = line.trim();
        let indent = line.len() - line.trim_start().len();

        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        if stripped.starts_with("requirements:") {
            in_requirements = true;
            continue;
        }

        let Some(run) = run_indent else {
            if in_requirements && stripped.starts_with("run:") {
                run_indent = Some(indent);
            }
            continue;
        };

        if let Some(item) = stripped.strip_prefix('-') {
            let name = item
                .trim()
                .split(|c: char| "><=~!".contains(c) || c.is_whitespace())
                .next()
                .unwrap_or_default();
            if !name.is_empty() && !name.starts_with('{') {
                packages.insert(normalize_name(name));
            }
            continue;
        }

        if stripped.contains(':') && indent <= run {
            break;
        }
    }

    packages
}

/// Hardcoded run requirements used when a recipe cannot be fetched.
pub fn fallback_dependencies(feedstock: &str) -> BTreeSet<String> {
    let names: &[&str] = match feedstock {
        "pangeo-notebook" => &[
            "pangeo-dask",
            "dask-labextension",
            "ipywidgets",
            "jupyter-server-proxy",
            "jupyterhub-singleuser",
            "jupyterlab",
            "nbgitpuller",
        ],
        "pangeo-dask" => &["dask", "distributed", "dask-gateway"],
        _ => &[],
    };
    names.iter().map(|s| s.to_string()).collect()
}
