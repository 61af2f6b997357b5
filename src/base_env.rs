//! Base environment expansion.
//!
//! The image is built on a base environment whose file names meta-packages
//! like `pangeo-notebook`. Those are replaced by their feedstock run
//! requirements, each kept as its own group so the pinned manifest can
//! label where a package came from.

use std::collections::BTreeSet;
use std::path::Path;

use crate::feedstock::{Feedstock, FeedstockResolver};
use crate::manifest::{normalize_name, read_env_file};

/// Package groups derived from the base environment file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseEnvironment {
    /// One resolved group per configured meta-package, in configured order.
    pub feedstocks: Vec<Feedstock>,
    /// Base packages not provided by any feedstock.
    pub other: BTreeSet<String>,
}

impl BaseEnvironment {
    /// Load and expand the base environment file.
    ///
    /// A missing or malformed file is logged and yields no packages at all;
    /// feedstocks are only resolved when the file could be read.
    pub fn load(
        path: &Path,
        exclude: &[String],
        metapackages: &[String],
        resolver: &FeedstockResolver,
    ) -> Self {
        let mut declared = match read_env_file(path) {
            Ok(packages) => packages,
            Err(e) => {
                tracing::warn!("{}", e);
                return Self::default();
            }
        };

        for name in exclude {
            declared.remove(&normalize_name(name));
        }

        Self::expand(declared, metapackages, resolver)
    }

    /// Split declared base packages into feedstock groups and the rest.
    pub fn expand(
        mut declared: BTreeSet<String>,
        metapackages: &[String],
        resolver: &FeedstockResolver,
    ) -> Self {
        let feedstocks: Vec<Feedstock> = metapackages
            .iter()
            .map(|name| resolver.resolve(&normalize_name(name)))
            .collect();

        for feedstock in &feedstocks {
            declared.remove(&feedstock.name);
        }

        let other = declared
            .into_iter()
            .filter(|name| !feedstocks.iter().any(|f| f.packages.contains(name)))
            .collect();

        Self { feedstocks, other }
    }

    /// Every package the base environment contributes.
    pub fn all(&self) -> BTreeSet<String> {
        self.feedstocks
            .iter()
            .flat_map(|f| f.packages.iter().cloned())
            .chain(self.other.iter().cloned())
            .collect()
    }
}
