mod lookup;
mod queries;

use std::collections::BTreeSet;

use tracing::info;

pub use lookup::{Lookup, NotFound};
pub use queries::{
    ChecksumQuery, LTS_MARKER, checksum_for_release, current_lts, enumerate_releases, version_token,
};

use crate::cloud::{Catalog, DiskImage};
use crate::error::CatalogError;
use crate::transport::CatalogSource;

/// Answers release queries against a catalogue source.
///
/// Nothing is cached: every query fetches and parses the catalogue again and
/// drops it once the answer is known.
pub struct ReleaseResolver<S> {
    source: S,
    base_for_paths: Option<String>,
}

impl<S: CatalogSource> ReleaseResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            base_for_paths: None,
        }
    }

    /// Mirror root used to build download URLs for resolved disk images.
    pub fn with_base_for_paths(mut self, base_for_paths: impl Into<String>) -> Self {
        self.base_for_paths = Some(base_for_paths.into());
        self
    }

    async fn load(&self) -> Result<Catalog, CatalogError> {
        let bytes = self.source.fetch().await?;
        let catalog = Catalog::from_slice(&bytes)?;
        info!(
            location = self.source.location(),
            content_id = catalog.content_id().unwrap_or("unknown"),
            updated = catalog.updated().unwrap_or("unknown"),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub async fn releases(&self) -> Result<Lookup<BTreeSet<String>>, CatalogError> {
        Ok(enumerate_releases(&self.load().await?))
    }

    pub async fn current_lts(&self) -> Result<Lookup<String>, CatalogError> {
        Ok(current_lts(&self.load().await?))
    }

    pub async fn checksum_for_release(
        &self,
        release_name: &str,
        arch: Option<&str>,
    ) -> Result<Lookup<DiskImage>, CatalogError> {
        let catalog = self.load().await?;
        let query = ChecksumQuery::new(release_name)
            .arch(arch)
            .base_for_paths(self.base_for_paths.as_deref());
        Ok(checksum_for_release(&catalog, &query))
    }
}
