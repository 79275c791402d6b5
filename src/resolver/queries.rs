use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use super::{Lookup, NotFound};
use crate::cloud::{Catalog, DiskImage, Product, absolute_url};

/// Literal marker identifying long-term-support releases in `release_title`.
pub const LTS_MARKER: &str = "LTS";

fn version_regex() -> &'static Regex {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    VERSION_RE.get_or_init(|| Regex::new(r"[0-9]+\.[0-9]+").expect("invalid version token regex"))
}

/// First `<digits>.<digits>` fragment of `release_name`, or the whole name when
/// there is none ("Ubuntu 20.04 LTS" -> "20.04", "focal" -> "focal").
pub fn version_token(release_name: &str) -> &str {
    version_regex()
        .find(release_name)
        .map_or(release_name, |m| m.as_str())
}

/// Titles of every supported product that declares a `release`.
pub fn enumerate_releases(catalog: &Catalog) -> Lookup<BTreeSet<String>> {
    let Some(products) = catalog.products() else {
        warn!("'products' field not found in the fetched catalog");
        return Lookup::NotFound(NotFound::MissingProducts { release: None });
    };

    let releases = products
        .values()
        .filter(|product| product.is_supported() && product.release().is_some())
        .filter_map(Product::release_title)
        .map(str::to_owned)
        .collect();

    Lookup::Found(releases)
}

/// Greatest supported title containing [`LTS_MARKER`].
///
/// Titles are compared as plain strings, not as version numbers.
pub fn current_lts(catalog: &Catalog) -> Lookup<String> {
    let Some(products) = catalog.products() else {
        warn!("'products' field not found in the fetched catalog");
        return Lookup::NotFound(NotFound::MissingProducts { release: None });
    };

    products
        .values()
        .filter(|product| product.is_supported())
        .filter_map(Product::release_title)
        .filter(|title| title.contains(LTS_MARKER))
        .max()
        .map_or(Lookup::NotFound(NotFound::NoLtsRelease), |title| {
            Lookup::Found(title.to_owned())
        })
}

/// Parameters of a checksum lookup. Only `release_name` is required.
#[derive(Debug, Clone, Copy)]
pub struct ChecksumQuery<'a> {
    release_name: &'a str,
    arch: Option<&'a str>,
    base_for_paths: Option<&'a str>,
}

impl<'a> ChecksumQuery<'a> {
    pub fn new(release_name: &'a str) -> Self {
        Self {
            release_name,
            arch: None,
            base_for_paths: None,
        }
    }

    /// Skip products built for other architectures.
    pub fn arch(mut self, arch: Option<&'a str>) -> Self {
        self.arch = arch;
        self
    }

    /// Mirror root used to turn item paths into download URLs.
    pub fn base_for_paths(mut self, base_for_paths: Option<&'a str>) -> Self {
        self.base_for_paths = base_for_paths;
        self
    }
}

fn matches_token(product: &Product, token: &str) -> bool {
    [
        product.release(),
        product.release_codename(),
        product.release_title(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.contains(token))
}

/// Checksum of the `disk1.img` artifact of the first build, in document order,
/// of the first supported product matching the release name.
///
/// A matching product without any `disk1.img` is passed over in favour of the
/// next matching one. The first `disk1.img` found ends the search.
pub fn checksum_for_release(catalog: &Catalog, query: &ChecksumQuery<'_>) -> Lookup<DiskImage> {
    let release = query.release_name;
    let token = version_token(release);
    debug!(release, token, "resolving disk image checksum");

    let Some(products) = catalog.products() else {
        warn!(release, "'products' field not found in the fetched catalog");
        return Lookup::NotFound(NotFound::MissingProducts {
            release: Some(release.to_owned()),
        });
    };

    let mut release_matched = false;
    let mut arch_matched = false;

    for (product_id, product) in products {
        if !product.is_supported() || !matches_token(product, token) {
            continue;
        }
        release_matched = true;

        let arch = product.resolve_arch(product_id);
        if let Some(wanted) = query.arch
            && arch != Some(wanted)
        {
            continue;
        }

        arch_matched = true;

        let Some((version_id, item)) = product
            .versions()
            .iter()
            .find_map(|(version_id, version)| version.disk_image().map(|item| (version_id, item)))
        else {
            debug!(product_id, "matching product has no disk1.img");
            continue;
        };

        let Some(sha256) = item.sha256() else {
            warn!(product_id, version_id, "disk1.img has no sha256");
            return Lookup::NotFound(NotFound::MissingChecksum {
                release: release.to_owned(),
            });
        };

        let url = match (query.base_for_paths, item.path()) {
            (Some(base), Some(path)) => Some(absolute_url(base, path)),
            _ => None,
        };

        return Lookup::Found(DiskImage::new(
            product_id.as_str(),
            version_id.as_str(),
            product.release_title().map(str::to_owned),
            arch.map(str::to_owned),
            url,
            sha256,
        ));
    }

    warn!(release, "could not find SHA256 for disk1.img");
    let release = release.to_owned();
    Lookup::NotFound(match query.arch {
        _ if arch_matched => NotFound::NoDiskImage { release },
        Some(arch) if release_matched => NotFound::NoMatchingArch {
            release,
            arch: arch.to_owned(),
        },
        _ => NotFound::NoMatchingRelease { release },
    })
}
