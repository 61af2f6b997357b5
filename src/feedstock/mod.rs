//! Feedstock dependency resolution.
//!
//! Meta-packages such as `pangeo-notebook` pull in their dependencies
//! through a conda-forge recipe. The resolver fetches the recipe, reads its
//! run requirements, and falls back to a hardcoded set whenever the
//! network is unavailable.

pub mod fetch;
pub mod recipe;

use std::collections::BTreeSet;

use crate::error::PincheckError;

pub use fetch::{RecipeFetcher, RecipeSource, DEFAULT_TIMEOUT};
pub use recipe::{fallback_dependencies, parse_run_requirements};

/// Default location of a feedstock's recipe; `{name}` is the package name.
pub const DEFAULT_RECIPE_URL: &str =
    "https://raw.githubusercontent.com/conda-forge/{name}-feedstock/main/recipe/meta.yaml";

/// Where a feedstock's dependency set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Parsed from the fetched recipe.
    Fetched,
    /// Taken from the hardcoded fallback.
    Fallback,
}

/// The resolved dependency set of one feedstock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedstock {
    /// Meta-package name, e.g. `pangeo-notebook`.
    pub name: String,
    /// Normalized run requirements.
    pub packages: BTreeSet<String>,
    /// How the set was obtained.
    pub origin: Origin,
}

/// Expand a recipe URL template for `name`.
pub fn recipe_url(template: &str, name: &str) -> String {
    template.replace("{name}", name)
}

/// Resolves feedstock dependency sets.
pub struct FeedstockResolver {
    source: Option<Box<dyn RecipeSource>>,
    url_template: String,
}

impl FeedstockResolver {
    /// Create a resolver that fetches recipes from `source`.
    pub fn new(source: Box<dyn RecipeSource>, url_template: impl Into<String>) -> Self {
        Self {
            source: Some(source),
            url_template: url_template.into(),
        }
    }

    /// Create a resolver that never touches the network.
    pub fn offline() -> Self {
        Self {
            source: None,
            url_template: DEFAULT_RECIPE_URL.to_string(),
        }
    }

    /// Resolve the run requirements of `name`.
    pub fn resolve(&self, name: &str) -> Feedstock {
        let fallback = || Feedstock {
            name: name.to_string(),
            packages: fallback_dependencies(name),
            origin: Origin::Fallback,
        };

        let Some(source) = &self.source else {
            tracing::debug!("Offline: using fallback dependencies for {}", name);
            return fallback();
        };

        let url = recipe_url(&self.url_template, name);
        match source.fetch_recipe(&url) {
            Ok(content) => {
                let packages = parse_run_requirements(&content);
                tracing::info!("Fetched {} dependencies from {} feedstock", packages.len(), name);
                Feedstock {
                    name: name.to_string(),
                    packages,
                    origin: Origin::Fetched,
                }
            }
            Err(e) => {
                let err = PincheckError::Fetch {
                    url,
                    message: e.to_string(),
                };
                tracing::warn!("{}", err);
                tracing::warn!("Using fallback hardcoded dependencies");
                fallback()
            }
        }
    }
}
