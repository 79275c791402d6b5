use std::fmt;

/// Result of a query that ran to completion. Transport and parse failures are
/// reported separately through [`crate::error::CatalogError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound(NotFound),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound(_) => None,
        }
    }
}

/// Why a query came back empty-handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    /// The catalogue has no usable `products` mapping. `release` is set when
    /// the query was looking for a specific release.
    MissingProducts { release: Option<String> },
    NoLtsRelease,
    NoMatchingRelease { release: String },
    /// The release exists, but not for the requested architecture.
    NoMatchingArch { release: String, arch: String },
    /// A supported product matched but none of its builds has a `disk1.img`.
    NoDiskImage { release: String },
    /// The first `disk1.img` found carries no checksum.
    MissingChecksum { release: String },
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFound::MissingProducts { release: None } => {
                f.write_str("'products' field not found in the fetched catalog")
            }
            NotFound::MissingProducts {
                release: Some(release),
            } => write!(
                f,
                "SHA256 not found for release {release}: 'products' field not found in the fetched catalog"
            ),
            NotFound::NoLtsRelease => f.write_str("No LTS version found!"),
            NotFound::NoMatchingRelease { release } => {
                write!(f, "no supported release matches '{release}'")
            }
            NotFound::NoMatchingArch { release, arch } => {
                write!(f, "release '{release}' has no supported images for architecture '{arch}'")
            }
            NotFound::NoDiskImage { release } => {
                write!(f, "SHA256 not found for release {release}: no disk1.img artifact")
            }
            NotFound::MissingChecksum { release } => {
                write!(f, "SHA256 not found for release {release}: disk1.img has no sha256")
            }
        }
    }
}
