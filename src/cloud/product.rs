use indexmap::IndexMap;
use serde::Deserialize;

use super::lenient;

const KNOWN_ARCHES: &[&str] = &["amd64", "arm64", "armhf", "i386", "ppc64el", "riscv64", "s390x"];

/// One release/architecture variant of the distribution.
#[derive(Debug, Default, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::optional")]
    arch: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    release: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    release_codename: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    release_title: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    supported: Option<bool>,

    #[serde(default, deserialize_with = "lenient::entries")]
    versions: IndexMap<String, super::Version>,
}

impl Product {
    pub fn release(&self) -> Option<&str> {
        self.release.as_deref()
    }

    pub fn release_codename(&self) -> Option<&str> {
        self.release_codename.as_deref()
    }

    pub fn release_title(&self) -> Option<&str> {
        self.release_title.as_deref()
    }

    /// Absent or non-boolean `supported` means unsupported.
    pub fn is_supported(&self) -> bool {
        self.supported.unwrap_or(false)
    }

    /// Builds keyed by serial, in document order.
    pub fn versions(&self) -> &IndexMap<String, super::Version> {
        &self.versions
    }

    /// Architecture of the product, falling back to the last `:` segment of the
    /// product id (e.g. `com.ubuntu.cloud:server:20.04:amd64`).
    pub fn resolve_arch<'a>(&'a self, product_id: &'a str) -> Option<&'a str> {
        if let Some(arch) = self.arch.as_deref() {
            return Some(arch);
        }

        product_id
            .rsplit(':')
            .next()
            .filter(|tail| KNOWN_ARCHES.contains(tail))
    }
}
