//! HTTP recipe fetching.
//!
//! Provides a blocking HTTP client for fetching conda-forge feedstock
//! recipes with a bounded timeout.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Default timeout for a recipe fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A source of recipe text.
///
/// Implemented by [`RecipeFetcher`] for real requests; tests substitute
/// canned recipes.
pub trait RecipeSource {
    /// Fetch the recipe at `url`.
    fn fetch_recipe(&self, url: &str) -> Result<String>;
}

/// Fetches recipes over HTTP/HTTPS.
pub struct RecipeFetcher {
    client: Client,
    timeout: Duration,
}

impl RecipeFetcher {
    /// Create a fetcher with the default 10-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pincheck/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl RecipeSource for RecipeFetcher {
    fn fetch_recipe(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        Ok(response.text()?)
    }
}
